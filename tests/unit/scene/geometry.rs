use super::*;
use kurbo::PathEl;

#[test]
fn ground_is_closed_and_spans_world_width() {
    let g = ground();
    assert!(g.is_closed());
    assert_eq!(g.points().len(), 9);
    let (min_x, max_x) = g
        .points()
        .iter()
        .fold((f64::MAX, f64::MIN), |(lo, hi), p| (lo.min(p.x), hi.max(p.x)));
    assert_eq!((min_x, max_x), (0.0, 7.0));

    let bp = g.to_bezpath();
    assert!(matches!(bp.elements().last(), Some(PathEl::ClosePath)));
    assert_eq!(bp.elements().len(), 10);
}

#[test]
fn vane_extends_along_positive_x() {
    let v = windmill_vane();
    let far = v
        .points()
        .iter()
        .map(|p| p.x)
        .fold(f64::MIN, f64::max);
    assert_eq!(far, 1.5);
    assert_eq!(v.points()[0], Point::ORIGIN);
}

#[test]
fn empty_path_converts_to_nothing() {
    let empty = PolyPath::new(Vec::new(), true);
    assert!(empty.to_bezpath().elements().is_empty());
}

#[test]
fn open_segment_has_no_close() {
    let s = segment(Point::ORIGIN, Point::new(0.75, 0.0));
    assert_eq!(
        s.elements(),
        &[
            PathEl::MoveTo(Point::ORIGIN),
            PathEl::LineTo(Point::new(0.75, 0.0))
        ]
    );
}

#[test]
fn rect_and_disc_bounds() {
    use kurbo::Shape;
    let r = rect(-0.05, 0.0, 0.1, 3.0).bounding_box();
    assert!((r.x0 + 0.05).abs() < 1e-12 && (r.x1 - 0.05).abs() < 1e-12);
    assert!((r.y1 - 3.0).abs() < 1e-12);

    let d = disc(0.5).bounding_box();
    assert!((d.width() - 1.0).abs() < 2e-3);
    assert!(d.center().x.abs() < 2e-3);
}
