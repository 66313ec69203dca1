use super::*;
use crate::foundation::core::{Canvas, Point};
use crate::scene::geometry::{rect, segment};

fn plan(width: u32, height: u32, clear: Option<Rgba8Premul>, ops: Vec<DrawOp>) -> FramePlan {
    FramePlan {
        canvas: Canvas { width, height },
        clear,
        ops,
    }
}

fn near(a: [u8; 4], b: [u8; 4]) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| x.abs_diff(*y) <= 2)
}

#[test]
fn empty_plan_without_clear_is_transparent() {
    let mut backend = CpuBackend::new(RenderSettings::default());
    let frame = backend.render_plan(&plan(8, 4, None, vec![])).unwrap();
    assert_eq!((frame.width, frame.height), (8, 4));
    assert_eq!(frame.data.len(), 8 * 4 * 4);
    assert!(frame.premultiplied);
    assert!(frame.data.iter().all(|&b| b == 0));
}

#[test]
fn plan_clear_wins_over_settings_clear() {
    let mut backend = CpuBackend::new(RenderSettings {
        clear_rgba: Some([0, 0, 255, 255]),
    });
    let f = backend
        .render_plan(&plan(4, 4, Some(Rgba8Premul::opaque(10, 20, 30)), vec![]))
        .unwrap();
    assert!(near(f.pixel(1, 1).unwrap(), [10, 20, 30, 255]));

    let f = backend.render_plan(&plan(4, 4, None, vec![])).unwrap();
    assert!(near(f.pixel(1, 1).unwrap(), [0, 0, 255, 255]));
}

#[test]
fn fill_respects_transform() {
    let red = Rgba8Premul::opaque(255, 0, 0);
    let op = DrawOp::FillPath {
        path: rect(0.0, 0.0, 1.0, 1.0),
        // Unit square scaled to 8x8 and moved to (8, 0): right half of a 16x8 frame.
        transform: Affine::translate((8.0, 0.0)) * Affine::scale(8.0),
        color: red,
    };
    let mut backend = CpuBackend::new(RenderSettings::default());
    let f = backend.render_plan(&plan(16, 8, None, vec![op])).unwrap();
    assert!(near(f.pixel(12, 4).unwrap(), [255, 0, 0, 255]));
    assert_eq!(f.pixel(3, 4).unwrap(), [0, 0, 0, 0]);
}

#[test]
fn stroke_covers_line_and_skips_zero_width() {
    let white = Rgba8Premul::opaque(255, 255, 255);
    let line = segment(Point::new(0.0, 8.0), Point::new(16.0, 8.0));
    let ops = vec![
        DrawOp::StrokePath {
            path: line.clone(),
            transform: Affine::IDENTITY,
            color: white,
            width: 4.0,
        },
        DrawOp::StrokePath {
            path: segment(Point::new(0.0, 2.0), Point::new(16.0, 2.0)),
            transform: Affine::IDENTITY,
            color: white,
            width: 0.0,
        },
    ];
    let mut backend = CpuBackend::new(RenderSettings::default());
    let f = backend.render_plan(&plan(16, 16, None, ops)).unwrap();
    assert!(near(f.pixel(8, 7).unwrap(), [255, 255, 255, 255]));
    assert_eq!(f.pixel(8, 2).unwrap(), [0, 0, 0, 0]);
    assert_eq!(f.pixel(8, 13).unwrap(), [0, 0, 0, 0]);
}

#[test]
fn oversized_canvas_is_rejected() {
    let mut backend = CpuBackend::new(RenderSettings::default());
    let err = backend
        .render_plan(&plan(70_000, 1, None, vec![]))
        .unwrap_err();
    assert!(err.to_string().contains("exceeds u16"));
}

#[test]
fn resizing_between_frames_reallocates() {
    let mut backend = CpuBackend::new(RenderSettings::default());
    let a = backend.render_plan(&plan(4, 4, None, vec![])).unwrap();
    let b = backend.render_plan(&plan(6, 2, None, vec![])).unwrap();
    assert_eq!(a.data.len(), 64);
    assert_eq!(b.data.len(), 48);
}

#[test]
fn frame_pixel_lookup_bounds() {
    let f = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![1, 2, 3, 4, 5, 6, 7, 8],
        premultiplied: true,
    };
    assert_eq!(f.pixel(1, 0), Some([5, 6, 7, 8]));
    assert_eq!(f.pixel(2, 0), None);
    assert_eq!(f.pixel(0, 1), None);
}

#[test]
fn stroked_rect_keeps_square_corners() {
    let gray = Rgba8Premul::opaque(64, 64, 64);
    // Same layout as the panel border: 2 px wide, inset by half the width.
    let op = DrawOp::StrokePath {
        path: rect(1.0, 1.0, 6.0, 6.0),
        transform: Affine::IDENTITY,
        color: gray,
        width: 2.0,
    };
    let mut backend = CpuBackend::new(RenderSettings::default());
    let f = backend.render_plan(&plan(8, 8, None, vec![op])).unwrap();
    for (x, y) in [(0, 0), (7, 0), (0, 7), (7, 7)] {
        assert!(
            near(f.pixel(x, y).unwrap(), [64, 64, 64, 255]),
            "corner ({x},{y}) = {:?}",
            f.pixel(x, y)
        );
    }
    assert_eq!(f.pixel(4, 4).unwrap(), [0, 0, 0, 0]);
}

#[test]
fn open_segments_get_square_caps() {
    let white = Rgba8Premul::opaque(255, 255, 255);
    let op = DrawOp::StrokePath {
        path: segment(Point::new(4.0, 8.0), Point::new(12.0, 8.0)),
        transform: Affine::IDENTITY,
        color: white,
        width: 4.0,
    };
    let mut backend = CpuBackend::new(RenderSettings::default());
    let f = backend.render_plan(&plan(16, 16, None, vec![op])).unwrap();
    // The cap extends 2 px past each endpoint with full height.
    assert!(near(f.pixel(2, 6).unwrap(), [255, 255, 255, 255]));
    assert!(near(f.pixel(13, 9).unwrap(), [255, 255, 255, 255]));
    assert_eq!(f.pixel(1, 8).unwrap(), [0, 0, 0, 0]);
}
