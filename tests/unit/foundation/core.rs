use super::*;

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 500).is_err());
    assert!(Canvas::new(700, 0).is_err());
    assert_eq!(
        Canvas::new(700, 500).unwrap(),
        Canvas {
            width: 700,
            height: 500
        }
    );
}

#[test]
fn fps_from_tick_period() {
    let fps = Fps::from_tick_period_ms(30).unwrap();
    assert_eq!(fps, Fps { num: 1000, den: 30 });
    assert!((fps.frame_duration_secs() - 0.03).abs() < 1e-12);
    assert!(Fps::from_tick_period_ms(0).is_err());
}

#[test]
fn hex_and_premul_colors() {
    assert_eq!(
        Rgba8Premul::from_rgb_hex(0xDD8800),
        Rgba8Premul::opaque(0xDD, 0x88, 0x00)
    );
    assert_eq!(
        Rgba8Premul::from_straight_rgba(255, 0, 0, 128).to_array(),
        [128, 0, 0, 128]
    );
    assert_eq!(Rgba8Premul::transparent().to_array(), [0, 0, 0, 0]);
}
