use std::time::{Duration, Instant};

use crate::driver::host::SceneHost;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{SceneError, SceneResult};
use crate::render::backend::RenderBackend;

/// Default timer interval, in milliseconds.
pub const DEFAULT_TICK_PERIOD_MS: u32 = 30;

/// How the driver spaces ticks in wall-clock time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Pacing {
    /// Tick as fast as frames can be produced.
    #[default]
    Offline,
    /// Sleep the calling thread so ticks land one period apart.
    RealTime,
}

/// Counters for one [`FrameDriver::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DriverStats {
    /// Timer ticks delivered to the host.
    pub ticks: u64,
    /// Frames rendered and pushed to the sink.
    pub frames_rendered: u64,
    /// Real-time ticks that fired after their deadline had already passed.
    pub late_ticks: u64,
}

/// Fixed-interval scheduler feeding a [`SceneHost`] into a [`FrameSink`].
#[derive(Clone, Copy, Debug)]
pub struct FrameDriver {
    period: Duration,
    fps: Fps,
    pacing: Pacing,
}

impl FrameDriver {
    /// Driver firing once every `period_ms` milliseconds.
    pub fn new(period_ms: u32, pacing: Pacing) -> SceneResult<Self> {
        if period_ms == 0 {
            return Err(SceneError::validation("tick period must be > 0 ms"));
        }
        Ok(Self {
            period: Duration::from_millis(u64::from(period_ms)),
            fps: Fps::from_tick_period_ms(period_ms)?,
            pacing,
        })
    }

    /// Timer interval.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Output frame rate implied by the period.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Pacing mode.
    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    /// Render `frames` frames from `host` into `sink`.
    ///
    /// The first frame shows the host's current clock; the host is ticked once before each
    /// following frame. Frame indices are clock ticks, so they increase strictly.
    #[tracing::instrument(skip(self, host, backend, sink), fields(pacing = ?self.pacing))]
    pub fn run(
        &self,
        host: &mut SceneHost,
        frames: u64,
        backend: &mut dyn RenderBackend,
        sink: &mut dyn FrameSink,
    ) -> SceneResult<DriverStats> {
        if frames == 0 {
            return Err(SceneError::validation("frame count must be > 0"));
        }

        let canvas = host.canvas();
        sink.begin(SinkConfig {
            width: canvas.width,
            height: canvas.height,
            fps: self.fps,
        })?;

        let mut stats = DriverStats::default();
        let start = Instant::now();
        for i in 0..frames {
            if i > 0 {
                if self.pacing == Pacing::RealTime && self.wait_for_tick(start, i) {
                    stats.late_ticks += 1;
                }
                host.on_tick();
                stats.ticks += 1;
            }
            if !host.redraw_requested() {
                continue;
            }
            let idx = FrameIndex(host.clock().ticks());
            let frame = host.render_frame(backend)?;
            sink.push_frame(idx, &frame)?;
            stats.frames_rendered += 1;
            tracing::trace!(frame = idx.0, "frame pushed");
        }

        sink.end()?;
        tracing::debug!(
            ticks = stats.ticks,
            frames = stats.frames_rendered,
            late = stats.late_ticks,
            "driver finished"
        );
        Ok(stats)
    }

    /// Sleep until tick `n`'s deadline. Returns `true` when the deadline had already passed.
    fn wait_for_tick(&self, start: Instant, n: u64) -> bool {
        let offset = self.period.saturating_mul(u32::try_from(n).unwrap_or(u32::MAX));
        let deadline = start + offset;
        let now = Instant::now();
        if now >= deadline {
            return true;
        }
        std::thread::sleep(deadline - now);
        false
    }
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self {
            period: Duration::from_millis(u64::from(DEFAULT_TICK_PERIOD_MS)),
            fps: Fps {
                num: 1000,
                den: DEFAULT_TICK_PERIOD_MS,
            },
            pacing: Pacing::Offline,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/driver/scheduler.rs"]
mod tests;
