use super::*;
use crate::render::fingerprint::fingerprint_plan;
use crate::scene::compose::SceneStyle;

/// Backend that records the plans it was asked to draw and returns blank frames.
#[derive(Default)]
struct RecordingBackend {
    plans: Vec<FramePlan>,
}

impl RenderBackend for RecordingBackend {
    fn render_plan(&mut self, plan: &FramePlan) -> SceneResult<FrameRGBA> {
        self.plans.push(plan.clone());
        let (w, h) = (plan.canvas.width, plan.canvas.height);
        Ok(FrameRGBA {
            width: w,
            height: h,
            data: vec![0; (w as usize) * (h as usize) * 4],
            premultiplied: true,
        })
    }
}

fn host_at(ticks: u64) -> SceneHost {
    SceneHost::new(
        Scene::new(SceneStyle::default()),
        ViewportSpec::default(),
        Canvas::new(700, 500).unwrap(),
        AnimationClock::at(ticks),
    )
    .unwrap()
}

fn host() -> SceneHost {
    host_at(0)
}

struct FailingBackend;

impl RenderBackend for FailingBackend {
    fn render_plan(&mut self, _plan: &FramePlan) -> SceneResult<FrameRGBA> {
        Err(crate::foundation::error::SceneError::render("surface lost"))
    }
}

#[test]
fn new_host_starts_at_tick_zero_with_pending_redraw() {
    let h = host();
    assert_eq!(h.clock().ticks(), 0);
    assert!(h.redraw_requested());
    assert_eq!(h.canvas(), Canvas::new(700, 500).unwrap());
}

#[test]
fn tick_advances_clock_and_requests_redraw() {
    let mut h = host();
    let mut backend = RecordingBackend::default();
    h.render_frame(&mut backend).unwrap();
    assert!(!h.redraw_requested());

    h.on_tick();
    assert_eq!(h.clock().ticks(), 1);
    assert!(h.redraw_requested());
}

#[test]
fn several_ticks_collapse_into_one_frame_at_latest_clock() {
    let mut h = host();
    let mut backend = RecordingBackend::default();
    for _ in 0..5 {
        h.on_tick();
    }
    h.render_frame(&mut backend).unwrap();
    assert_eq!(backend.plans.len(), 1);

    let expected = Scene::default().compose(AnimationClock::at(5), h.mapping());
    assert_eq!(
        fingerprint_plan(&backend.plans[0]),
        fingerprint_plan(&expected)
    );
}

#[test]
fn resize_applies_to_next_frame() {
    let mut h = host();
    let mut backend = RecordingBackend::default();
    h.on_resize(350, 250).unwrap();
    let frame = h.render_frame(&mut backend).unwrap();
    assert_eq!((frame.width, frame.height), (350, 250));
    assert_eq!(backend.plans[0].canvas, Canvas::new(350, 250).unwrap());
}

#[test]
fn failed_resize_keeps_previous_mapping() {
    let mut h = host();
    let before = *h.mapping();
    assert!(h.on_resize(0, 250).is_err());
    assert_eq!(*h.mapping(), before);
}

#[test]
fn plan_frame_does_not_clear_redraw_request() {
    let h = host_at(42);
    let plan = h.plan_frame();
    assert!(h.redraw_requested());
    assert_eq!(plan.ops.len(), 70);
    assert_eq!(h.clock().ticks(), 42);
}

#[test]
fn failed_render_keeps_redraw_request() {
    let mut h = host();
    h.on_tick();
    assert!(h.render_frame(&mut FailingBackend).is_err());
    assert!(h.redraw_requested());

    let mut backend = RecordingBackend::default();
    h.render_frame(&mut backend).unwrap();
    assert!(!h.redraw_requested());
}

#[test]
fn clock_only_advances_through_ticks() {
    let mut h = host_at(7);
    let mut backend = RecordingBackend::default();
    h.on_resize(140, 100).unwrap();
    h.render_frame(&mut backend).unwrap();
    assert_eq!(h.clock().ticks(), 7);
    h.on_tick();
    h.render_frame(&mut backend).unwrap();
    assert_eq!(h.clock().ticks(), 8);
}
