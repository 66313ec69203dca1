use crate::driver::clock::AnimationClock;
use crate::foundation::core::Canvas;
use crate::foundation::error::SceneResult;
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::scene::compose::Scene;
use crate::scene::plan::FramePlan;
use crate::scene::viewport::{ViewportSpec, WorldMapping};

/// Drawing surface state for one animated scene.
///
/// A host owns the clock and the current world mapping. The surrounding shell reports resizes
/// and timer ticks; each tick raises a redraw request that the next [`SceneHost::render_frame`]
/// satisfies. Several ticks between two redraws collapse into one frame drawn at the latest
/// clock value.
#[derive(Debug)]
pub struct SceneHost {
    scene: Scene,
    viewport: ViewportSpec,
    mapping: WorldMapping,
    clock: AnimationClock,
    redraw_requested: bool,
}

impl SceneHost {
    /// Create a host for `canvas` whose clock starts at `start`, with a first redraw pending.
    ///
    /// After construction the clock only moves through [`SceneHost::on_tick`].
    pub fn new(
        scene: Scene,
        viewport: ViewportSpec,
        canvas: Canvas,
        start: AnimationClock,
    ) -> SceneResult<Self> {
        let mapping = viewport.map(canvas)?;
        Ok(Self {
            scene,
            viewport,
            mapping,
            clock: start,
            redraw_requested: true,
        })
    }

    /// Surface resized: recompute the mapping used by the next frame.
    ///
    /// On error the previous mapping stays in effect.
    pub fn on_resize(&mut self, width: u32, height: u32) -> SceneResult<()> {
        let canvas = Canvas::new(width, height)?;
        self.mapping = self.viewport.map(canvas)?;
        self.redraw_requested = true;
        tracing::debug!(width, height, "surface resized");
        Ok(())
    }

    /// Timer fired: advance the clock by one tick and request a redraw.
    pub fn on_tick(&mut self) {
        self.clock.tick();
        self.redraw_requested = true;
    }

    /// Compose the current frame without rasterizing it.
    pub fn plan_frame(&self) -> FramePlan {
        self.scene.compose(self.clock, &self.mapping)
    }

    /// Compose and rasterize the current frame, clearing the redraw request once a frame has
    /// been produced. A failed render leaves the request pending.
    ///
    /// The clock is read once, so every object in the frame sees the same tick.
    pub fn render_frame(&mut self, backend: &mut dyn RenderBackend) -> SceneResult<FrameRGBA> {
        let clock = self.clock;
        let plan = self.scene.compose(clock, &self.mapping);
        let frame = backend.render_plan(&plan)?;
        self.redraw_requested = false;
        Ok(frame)
    }

    /// Current clock value.
    pub fn clock(&self) -> AnimationClock {
        self.clock
    }

    /// Mapping used for the next frame.
    pub fn mapping(&self) -> &WorldMapping {
        &self.mapping
    }

    /// Current device surface.
    pub fn canvas(&self) -> Canvas {
        self.mapping.canvas
    }

    /// Whether a tick or resize happened since the last rendered frame.
    pub fn redraw_requested(&self) -> bool {
        self.redraw_requested
    }

    /// The scene being animated.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }
}

#[cfg(test)]
#[path = "../../tests/unit/driver/host.rs"]
mod tests;
