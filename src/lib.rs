//! Hierscene draws an animated 2D landscape built entirely from nested affine transforms.
//!
//! Each frame is a pure function of a tick counter and the surface size:
//!
//! - A [`ViewportSpec`] maps the world window onto the device surface ([`WorldMapping`])
//! - [`Scene::compose`] walks the object hierarchy with a [`Painter`] and records a
//!   [`FramePlan`]
//! - A [`RenderBackend`] rasterizes the plan into a premultiplied [`FrameRGBA`]
//! - A [`FrameDriver`] ticks a [`SceneHost`] at a fixed interval and streams frames into a
//!   [`FrameSink`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// JSON run configuration.
pub mod config;
/// Clock, surface host and frame scheduler.
pub mod driver;
/// Encoding sinks.
pub mod encode;
/// Rendering backends.
pub mod render;
/// Scene model: geometry, viewport, transform painter and composition.
pub mod scene;

pub use crate::foundation::core::{
    Affine, BezPath, Canvas, Fps, FrameIndex, Point, Rect, Rgba8Premul, Vec2,
};
pub use crate::foundation::error::{SceneError, SceneResult};

pub use crate::config::{BorderConfig, SceneConfig};
pub use crate::driver::clock::AnimationClock;
pub use crate::driver::host::SceneHost;
pub use crate::driver::scheduler::{DriverStats, FrameDriver, Pacing};
pub use crate::encode::ffmpeg::{FfmpegSink, ffmpeg_available};
pub use crate::encode::png::{PngSequenceSink, write_png};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::render::backend::{
    BackendKind, FrameRGBA, RenderBackend, RenderSettings, create_backend,
};
pub use crate::render::cpu::CpuBackend;
pub use crate::render::fingerprint::{FrameFingerprint, fingerprint_plan};
pub use crate::scene::color::ColorDef;
pub use crate::scene::compose::{Border, Scene, SceneStyle};
pub use crate::scene::geometry::{PolyPath, SceneGeometry};
pub use crate::scene::painter::{Painter, SavedTransform, StackStats};
pub use crate::scene::plan::{DrawOp, FramePlan};
pub use crate::scene::viewport::{ViewportSpec, WorldBounds, WorldMapping};
