use crate::foundation::core::{Affine, BezPath, Canvas, Rgba8Premul};
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
/// Backend-agnostic display list for a single frame.
///
/// Ops are stored back to front. Each op carries the full local-to-device transform that was
/// current when it was issued, so a backend never needs a transform stack of its own.
pub struct FramePlan {
    /// Target surface size.
    pub canvas: Canvas,
    /// Clear color applied before the first op, if any.
    pub clear: Option<Rgba8Premul>,
    /// Ordered draw operations.
    pub ops: Vec<DrawOp>,
}

impl FramePlan {
    /// Empty plan for `canvas`.
    pub fn new(canvas: Canvas, clear: Option<Rgba8Premul>) -> Self {
        Self {
            canvas,
            clear,
            ops: Vec::new(),
        }
    }

    /// Number of fill ops.
    pub fn fill_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::FillPath { .. }))
            .count()
    }

    /// Number of stroke ops.
    pub fn stroke_count(&self) -> usize {
        self.ops.len() - self.fill_count()
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
/// Draw operation emitted while composing a frame.
pub enum DrawOp {
    /// Fill vector path geometry (non-zero winding).
    FillPath {
        /// Path geometry in local space.
        path: BezPath,
        /// Local-to-device transform.
        transform: Affine,
        /// Fill color.
        color: Rgba8Premul,
    },
    /// Stroke vector path geometry.
    StrokePath {
        /// Path geometry in local space.
        path: BezPath,
        /// Local-to-device transform.
        transform: Affine,
        /// Stroke color.
        color: Rgba8Premul,
        /// Line width in local units; scaled by `transform` like the geometry.
        width: f64,
    },
}

impl DrawOp {
    /// Transform the op was issued under.
    pub fn transform(&self) -> Affine {
        match self {
            DrawOp::FillPath { transform, .. } | DrawOp::StrokePath { transform, .. } => *transform,
        }
    }

    /// Paint color.
    pub fn color(&self) -> Rgba8Premul {
        match self {
            DrawOp::FillPath { color, .. } | DrawOp::StrokePath { color, .. } => *color,
        }
    }

    /// Local-space geometry.
    pub fn path(&self) -> &BezPath {
        match self {
            DrawOp::FillPath { path, .. } | DrawOp::StrokePath { path, .. } => path,
        }
    }
}
