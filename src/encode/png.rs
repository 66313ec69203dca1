use crate::encode::ensure_parent_dir;
use crate::encode::sink::{FrameSink, SinkConfig, check_frame};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{SceneError, SceneResult};
use crate::foundation::math::unpremul_u8;
use crate::render::backend::FrameRGBA;
use anyhow::Context as _;
use std::path::{Path, PathBuf};

/// Write one frame as a straight-alpha RGBA PNG.
pub fn write_png(path: &Path, frame: &FrameRGBA) -> SceneResult<()> {
    let mut straight = Vec::new();
    to_straight_rgba8(&mut straight, frame);
    save_png(path, &straight, frame.width, frame.height)
}

fn save_png(path: &Path, rgba: &[u8], width: u32, height: u32) -> SceneResult<()> {
    ensure_parent_dir(path)?;
    image::save_buffer_with_format(
        path,
        rgba,
        width,
        height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

fn to_straight_rgba8(dst: &mut Vec<u8>, frame: &FrameRGBA) {
    dst.clear();
    dst.extend_from_slice(&frame.data);
    if !frame.premultiplied {
        return;
    }
    for px in dst.chunks_exact_mut(4) {
        let a = px[3];
        if a == 255 {
            continue;
        }
        px[0] = unpremul_u8(px[0], a);
        px[1] = unpremul_u8(px[1], a);
        px[2] = unpremul_u8(px[2], a);
    }
}

/// Sink writing `<prefix>_<index>.png` files (index zero-padded to 5 digits) into a directory.
pub struct PngSequenceSink {
    dir: PathBuf,
    prefix: String,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
    scratch: Vec<u8>,
    written: Vec<PathBuf>,
}

impl PngSequenceSink {
    /// Create a sink writing into `dir` with the default `frame` prefix.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            prefix: "frame".to_owned(),
            cfg: None,
            last_idx: None,
            scratch: Vec::new(),
            written: Vec::new(),
        }
    }

    /// Use `prefix` for file names instead of `frame`.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Path of the file written for frame `idx`.
    pub fn path_for(&self, idx: FrameIndex) -> PathBuf {
        self.dir.join(format!("{}_{:05}.png", self.prefix, idx.0))
    }

    /// Files written so far, in order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> SceneResult<()> {
        if self.prefix.contains(['/', '\\']) {
            return Err(SceneError::validation(
                "png sequence prefix must not contain path separators",
            ));
        }
        std::fs::create_dir_all(&self.dir).with_context(|| {
            format!("failed to create output directory '{}'", self.dir.display())
        })?;
        tracing::info!(
            dir = %self.dir.display(),
            width = cfg.width,
            height = cfg.height,
            "png sequence started"
        );
        self.cfg = Some(cfg);
        self.last_idx = None;
        self.written.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> SceneResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| SceneError::encode("png sequence sink not started"))?;
        check_frame(cfg, self.last_idx, idx, frame)?;
        self.last_idx = Some(idx);

        let path = self.path_for(idx);
        to_straight_rgba8(&mut self.scratch, frame);
        save_png(&path, &self.scratch, frame.width, frame.height)?;
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> SceneResult<()> {
        if self.cfg.take().is_none() {
            return Err(SceneError::encode("png sequence sink not started"));
        }
        tracing::info!(frames = self.written.len(), "png sequence finished");
        Ok(())
    }
}
