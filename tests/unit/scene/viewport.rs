use super::*;

fn canvas(w: u32, h: u32) -> Canvas {
    Canvas::new(w, h).unwrap()
}

fn assert_point_eq(a: Point, b: Point) {
    assert!(
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9,
        "{a:?} != {b:?}"
    );
}

#[test]
fn default_viewport_maps_corners_and_flips_y() {
    let m = ViewportSpec::default().map(canvas(700, 500)).unwrap();
    assert_point_eq(m.world_to_device(Point::new(0.0, 4.0)), Point::ORIGIN);
    assert_point_eq(
        m.world_to_device(Point::new(7.0, -1.0)),
        Point::new(700.0, 500.0),
    );
    // World up is device down.
    let lo = m.world_to_device(Point::new(1.0, 0.0));
    let hi = m.world_to_device(Point::new(1.0, 1.0));
    assert!(hi.y < lo.y);
    assert!((m.pixel_size - 0.01).abs() < 1e-12);
}

#[test]
fn device_to_world_inverts() {
    let m = ViewportSpec::default().map(canvas(700, 500)).unwrap();
    assert_point_eq(
        m.device_to_world(Point::new(350.0, 250.0)),
        Point::new(3.5, 1.5),
    );
}

#[test]
fn pixel_size_is_positive_and_finite_for_any_nonzero_device() {
    let spec = ViewportSpec::default();
    for (w, h) in [(1, 1), (1, 5000), (5000, 1), (700, 500), (3, 65535)] {
        let m = spec.map(canvas(w, h)).unwrap();
        assert!(m.pixel_size > 0.0 && m.pixel_size.is_finite(), "{w}x{h}");
    }
}

#[test]
fn pixel_size_takes_smaller_axis() {
    let m = ViewportSpec::default().map(canvas(1400, 500)).unwrap();
    // x: 7/1400 = 0.005, y: 5/500 = 0.01
    assert!((m.pixel_size - 0.005).abs() < 1e-12);
}

#[test]
fn zero_device_dimensions_are_rejected() {
    let spec = ViewportSpec::default();
    let bad = Canvas {
        width: 0,
        height: 10,
    };
    assert!(matches!(spec.map(bad), Err(SceneError::Validation(_))));
}

#[test]
fn degenerate_bounds_are_rejected() {
    let flat = ViewportSpec {
        ytop: 1.0,
        ybottom: 1.0,
        ..ViewportSpec::default()
    };
    assert!(flat.map(canvas(10, 10)).is_err());

    let nan = ViewportSpec {
        xleft: f64::NAN,
        ..ViewportSpec::default()
    };
    assert!(nan.validate().is_err());
}

#[test]
fn preserve_aspect_pads_vertical_bounds_on_square_device() {
    let spec = ViewportSpec {
        preserve_aspect: true,
        ..ViewportSpec::default()
    };
    let m = spec.map(canvas(700, 700)).unwrap();
    assert!((m.bounds.ytop - 5.0).abs() < 1e-9);
    assert!((m.bounds.ybottom + 2.0).abs() < 1e-9);
    assert_eq!((m.bounds.xleft, m.bounds.xright), (0.0, 7.0));
    // Undistorted: both axes have the same pixel extent.
    let sx = m.transform.as_coeffs()[0].abs();
    let sy = m.transform.as_coeffs()[3].abs();
    assert!((sx - sy).abs() < 1e-9);
}

#[test]
fn preserve_aspect_pads_horizontal_bounds_on_wide_device() {
    let spec = ViewportSpec {
        preserve_aspect: true,
        ..ViewportSpec::default()
    };
    let m = spec.map(canvas(1400, 500)).unwrap();
    assert!((m.bounds.xleft + 3.5).abs() < 1e-9);
    assert!((m.bounds.xright - 10.5).abs() < 1e-9);
    assert_eq!((m.bounds.ytop, m.bounds.ybottom), (4.0, -1.0));
}

#[test]
fn preserve_aspect_is_identity_when_aspects_match() {
    let spec = ViewportSpec {
        preserve_aspect: true,
        ..ViewportSpec::default()
    };
    let plain = ViewportSpec::default().map(canvas(700, 500)).unwrap();
    let padded = spec.map(canvas(700, 500)).unwrap();
    assert_eq!(plain.bounds, padded.bounds);
}

#[test]
fn deserializes_with_defaults() {
    let spec: ViewportSpec = serde_json::from_str(r#"{ "preserve_aspect": true }"#).unwrap();
    assert_eq!(spec.xright, 7.0);
    assert!(spec.preserve_aspect);
    assert!(serde_json::from_str::<ViewportSpec>(r#"{ "zoom": 2 }"#).is_err());
}

#[test]
fn subnormal_spans_are_rejected() {
    let tiny = ViewportSpec {
        xleft: 0.0,
        xright: 5e-324,
        ytop: 5e-324,
        ybottom: 0.0,
        preserve_aspect: false,
    };
    assert!(matches!(
        tiny.map(canvas(700, 500)),
        Err(SceneError::Validation(_))
    ));
}

#[test]
fn overflowing_spans_are_rejected() {
    let huge = ViewportSpec {
        xleft: -1e308,
        xright: 1e308,
        ytop: 1e308,
        ybottom: -1e308,
        preserve_aspect: false,
    };
    assert!(matches!(huge.validate(), Err(SceneError::Validation(_))));
    assert!(matches!(
        huge.map(canvas(700, 500)),
        Err(SceneError::Validation(_))
    ));
}

#[test]
fn extreme_bounds_never_map_to_a_degenerate_pixel_size() {
    let extremes = [
        (0.0, 1e-300, 1e300, -1e300),
        (-1e300, 1e300, 1e-300, 0.0),
        (0.0, 1e-320, 1.0, 0.0),
        (1e307, -1e307, 0.0, 1.0),
    ];
    for (xleft, xright, ytop, ybottom) in extremes {
        for preserve_aspect in [false, true] {
            let spec = ViewportSpec {
                xleft,
                xright,
                ytop,
                ybottom,
                preserve_aspect,
            };
            match spec.map(canvas(500, 500)) {
                Ok(m) => {
                    assert!(m.pixel_size > 0.0 && m.pixel_size.is_finite(), "{spec:?}");
                    assert!(m.transform.is_finite(), "{spec:?}");
                }
                Err(e) => assert!(matches!(e, SceneError::Validation(_)), "{spec:?}"),
            }
        }
    }
}
