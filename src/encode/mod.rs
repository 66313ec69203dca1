//! Encoding sinks.
//!
//! Sinks consume rendered frames in tick order and are fed by [`crate::FrameDriver`].

use crate::foundation::error::SceneResult;
use anyhow::Context as _;
use std::path::Path;

/// MP4 output through the system `ffmpeg` binary.
pub mod ffmpeg;
/// PNG output (single frames and numbered sequences).
pub mod png;
/// Generic frame sink trait and built-in sinks.
pub mod sink;

/// Create the directory that will hold `path`, if it has one.
pub(crate) fn ensure_parent_dir(path: &Path) -> SceneResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output directory '{}'", parent.display()))?;
    }
    Ok(())
}
