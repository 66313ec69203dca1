//! Explicit transform stack.
//!
//! [`Painter`] threads the current local-to-device [`Affine`] through every drawing call and
//! records fills/strokes into a [`FramePlan`]. Composite objects enter a local frame through
//! [`Painter::scoped`], which saves on entry and restores on exit, so sibling objects never see
//! each other's translate/scale/rotate.

use crate::foundation::core::{Affine, BezPath, Canvas, Rgba8Premul, Vec2};
use crate::scene::plan::{DrawOp, FramePlan};

/// Opaque snapshot of a painter transform, returned by [`Painter::save`].
///
/// Not `Clone`: each snapshot is restored at most once.
#[derive(Debug)]
#[must_use = "a saved transform should be handed back to Painter::restore"]
pub struct SavedTransform(Affine);

/// Save/restore bookkeeping for one pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StackStats {
    /// Calls to [`Painter::save`].
    pub saves: u32,
    /// Calls to [`Painter::restore`].
    pub restores: u32,
}

impl StackStats {
    /// Every save has been matched by a restore.
    pub fn is_balanced(self) -> bool {
        self.saves == self.restores
    }
}

/// Records draw ops under a composable current transform.
#[derive(Debug)]
pub struct Painter {
    current: Affine,
    plan: FramePlan,
    stats: StackStats,
}

impl Painter {
    /// Start recording into `plan` with `base` as the current transform.
    pub fn new(plan: FramePlan, base: Affine) -> Self {
        Self {
            current: base,
            plan,
            stats: StackStats::default(),
        }
    }

    /// Current local-to-device transform.
    pub fn transform(&self) -> Affine {
        self.current
    }

    /// Replace the current transform outright (used for device-space overlays).
    pub fn set_transform(&mut self, transform: Affine) {
        self.current = transform;
    }

    /// Snapshot the current transform.
    pub fn save(&mut self) -> SavedTransform {
        self.stats.saves += 1;
        SavedTransform(self.current)
    }

    /// Reinstate exactly the transform captured by `saved`.
    pub fn restore(&mut self, saved: SavedTransform) {
        self.stats.restores += 1;
        self.current = saved.0;
    }

    /// Run `f` inside a local frame; the transform is restored afterwards.
    pub fn scoped<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let saved = self.save();
        let out = f(self);
        self.restore(saved);
        out
    }

    /// Compose a translation onto the current transform.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.current *= Affine::translate(Vec2::new(dx, dy));
    }

    /// Compose a scale onto the current transform.
    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.current *= Affine::scale_non_uniform(sx, sy);
    }

    /// Compose a rotation (radians, counter-clockwise in a y-up world) onto the current transform.
    pub fn rotate(&mut self, theta: f64) {
        self.current *= Affine::rotate(theta);
    }

    /// Fill `path` under the current transform. Empty paths are skipped.
    pub fn fill(&mut self, path: &BezPath, color: Rgba8Premul) {
        if path.elements().is_empty() {
            tracing::trace!("skipping fill of empty path");
            return;
        }
        self.plan.ops.push(DrawOp::FillPath {
            path: path.clone(),
            transform: self.current,
            color,
        });
    }

    /// Stroke `path` with a `width` measured in current local units. Empty paths are skipped.
    pub fn stroke(&mut self, path: &BezPath, color: Rgba8Premul, width: f64) {
        if path.elements().is_empty() {
            tracing::trace!("skipping stroke of empty path");
            return;
        }
        self.plan.ops.push(DrawOp::StrokePath {
            path: path.clone(),
            transform: self.current,
            color,
            width,
        });
    }

    /// Device surface the plan targets.
    pub fn canvas(&self) -> Canvas {
        self.plan.canvas
    }

    /// Save/restore counts so far.
    pub fn stats(&self) -> StackStats {
        self.stats
    }

    /// Ops recorded so far.
    pub fn ops(&self) -> &[DrawOp] {
        &self.plan.ops
    }

    /// Stop recording and return the plan.
    pub fn finish(self) -> FramePlan {
        self.plan
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/painter.rs"]
mod tests;
