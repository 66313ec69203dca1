use super::*;

#[test]
fn empty_object_yields_stock_scene() {
    let cfg = SceneConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, SceneConfig::default());
    assert_eq!(cfg.title, "Hierarchical Modeling in 2D");
    assert_eq!(cfg.canvas().unwrap(), Canvas::new(700, 500).unwrap());
    assert_eq!(cfg.fps().unwrap(), Fps { num: 1000, den: 30 });
    assert_eq!(cfg.style(), SceneStyle::default());
}

#[test]
fn partial_overrides_keep_other_defaults() {
    let cfg = SceneConfig::from_json_str(
        r##"{
            "width": 350,
            "viewport": { "preserve_aspect": true },
            "background": "#000000",
            "border": null
        }"##,
    )
    .unwrap();
    assert_eq!(cfg.width, 350);
    assert_eq!(cfg.height, 500);
    assert!(cfg.viewport.preserve_aspect);
    assert_eq!(cfg.viewport.xright, 7.0);
    let style = cfg.style();
    assert_eq!(style.background, Some(color::BLACK));
    assert_eq!(style.border, None);
}

#[test]
fn unknown_fields_are_rejected() {
    let err = SceneConfig::from_json_str(r#"{ "widht": 10 }"#).unwrap_err();
    assert!(matches!(err, SceneError::Serde(_)));
}

#[test]
fn invalid_values_fail_validation() {
    for json in [
        r#"{ "width": 0 }"#,
        r#"{ "height": 70000 }"#,
        r#"{ "tick_period_ms": 0 }"#,
        r#"{ "viewport": { "xleft": 1.0, "xright": 1.0 } }"#,
        r##"{ "border": { "color": "#ffffff", "width_px": -1.0 } }"##,
    ] {
        let err = SceneConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, SceneError::Validation(_)), "{json}: {err}");
    }
}

#[test]
fn missing_file_is_reported_with_path() {
    let err = SceneConfig::from_path("does/not/exist.json").unwrap_err();
    assert!(err.to_string().contains("does/not/exist.json"));
}

#[test]
fn serialized_config_reloads_unchanged() {
    let cfg = SceneConfig {
        tick_period_ms: 40,
        ..SceneConfig::default()
    };
    let json = serde_json::to_string(&cfg).unwrap();
    assert_eq!(SceneConfig::from_json_str(&json).unwrap(), cfg);
}
