use super::*;
use crate::driver::clock::AnimationClock;
use crate::encode::sink::InMemorySink;
use crate::foundation::core::Canvas;
use crate::render::backend::FrameRGBA;
use crate::scene::compose::Scene;
use crate::scene::plan::FramePlan;
use crate::scene::viewport::ViewportSpec;

struct BlankBackend;

impl RenderBackend for BlankBackend {
    fn render_plan(&mut self, plan: &FramePlan) -> SceneResult<FrameRGBA> {
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
        Scene::default(),
        ViewportSpec::default(),
        Canvas::new(16, 12).unwrap(),
        AnimationClock::at(ticks),
    )
    .unwrap()
}

fn host() -> SceneHost {
    host_at(0)
}

#[test]
fn fps_follows_tick_period() {
    let d = FrameDriver::new(30, Pacing::Offline).unwrap();
    assert_eq!(d.fps(), Fps { num: 1000, den: 30 });
    assert_eq!(d.period(), Duration::from_millis(30));
    assert_eq!(FrameDriver::default().fps(), d.fps());
}

#[test]
fn zero_period_is_rejected() {
    assert!(matches!(
        FrameDriver::new(0, Pacing::Offline),
        Err(SceneError::Validation(_))
    ));
}

#[test]
fn offline_run_pushes_one_frame_per_tick() {
    let mut h = host();
    let mut sink = InMemorySink::new();
    let stats = FrameDriver::default()
        .run(&mut h, 4, &mut BlankBackend, &mut sink)
        .unwrap();

    assert_eq!(stats.ticks, 3);
    assert_eq!(stats.frames_rendered, 4);
    assert!(sink.is_finished());
    let cfg = sink.config().unwrap();
    assert_eq!((cfg.width, cfg.height), (16, 12));
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, vec![0, 1, 2, 3]);
    assert_eq!(h.clock().ticks(), 3);
}

#[test]
fn run_continues_from_host_clock() {
    let mut h = host_at(10);
    let mut sink = InMemorySink::new();
    FrameDriver::default()
        .run(&mut h, 2, &mut BlankBackend, &mut sink)
        .unwrap();
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, vec![10, 11]);
}

#[test]
fn zero_frames_is_rejected() {
    let mut sink = InMemorySink::new();
    assert!(
        FrameDriver::default()
            .run(&mut host(), 0, &mut BlankBackend, &mut sink)
            .is_err()
    );
}

#[test]
fn real_time_run_takes_at_least_the_tick_periods() {
    let d = FrameDriver::new(5, Pacing::RealTime).unwrap();
    let mut sink = InMemorySink::new();
    let start = Instant::now();
    let stats = d.run(&mut host(), 3, &mut BlankBackend, &mut sink).unwrap();
    assert!(start.elapsed() >= Duration::from_millis(10));
    assert_eq!(stats.frames_rendered, 3);
}
