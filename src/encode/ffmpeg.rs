//! MP4 output through the system `ffmpeg` binary.
//!
//! Video time follows the animation clock: one video frame per tick at `1000 / period_ms` fps.
//! When the driver hands over non-consecutive ticks, the last frame is held for the missing
//! ticks so playback speed still matches the clock.

use std::ffi::OsString;
use std::io::{Read as _, Write as _};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::JoinHandle;

use crate::encode::ensure_parent_dir;
use crate::encode::sink::{FrameSink, SinkConfig, check_frame};
use crate::foundation::core::{FrameIndex, Rgba8Premul};
use crate::foundation::error::{SceneError, SceneResult};
use crate::foundation::math::mul_div255_u16;
use crate::render::backend::FrameRGBA;

const FFMPEG: &str = "ffmpeg";

/// Whether an `ffmpeg` binary answers `-version` on `PATH`.
pub fn ffmpeg_available() -> bool {
    Command::new(FFMPEG)
        .arg("-version")
        .stdin(Stdio::null())
        .output()
        .is_ok_and(|out| out.status.success())
}

/// Streams the animation into an H.264 MP4.
///
/// Frames are composited over an opaque matte before encoding since yuv420p has no alpha.
pub struct FfmpegSink {
    out_path: PathBuf,
    overwrite: bool,
    matte: Rgba8Premul,
    session: Option<Encoder>,
}

struct Encoder {
    cfg: SinkConfig,
    child: Child,
    stdin: ChildStdin,
    stderr: JoinHandle<std::io::Result<Vec<u8>>>,
    last_idx: Option<FrameIndex>,
    opaque: Vec<u8>,
    frames_written: u64,
}

impl FfmpegSink {
    /// Sink writing to `out_path`, replacing an existing file, over an opaque black matte.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            matte: Rgba8Premul::opaque(0, 0, 0),
            session: None,
        }
    }

    /// Refuse to replace an existing file when `false`.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Color shown through transparent pixels. Its alpha is ignored.
    pub fn matte(mut self, matte: Rgba8Premul) -> Self {
        self.matte = Rgba8Premul::opaque(matte.r, matte.g, matte.b);
        self
    }

    fn encoder(&mut self) -> SceneResult<&mut Encoder> {
        self.session
            .as_mut()
            .ok_or_else(|| SceneError::encode("mp4 sink not started"))
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> SceneResult<()> {
        if self.session.is_some() {
            return Err(SceneError::encode("mp4 sink already started"));
        }
        if cfg.width % 2 != 0 || cfg.height % 2 != 0 {
            return Err(SceneError::validation(format!(
                "mp4 output needs even dimensions for yuv420p, got {}x{}",
                cfg.width, cfg.height
            )));
        }
        if !self.overwrite && self.out_path.exists() {
            return Err(SceneError::validation(format!(
                "'{}' already exists",
                self.out_path.display()
            )));
        }
        ensure_parent_dir(&self.out_path)?;
        if !ffmpeg_available() {
            return Err(SceneError::encode("`ffmpeg` not found on PATH"));
        }

        let mut child = Command::new(FFMPEG)
            .args(encoder_args(&cfg, &self.out_path, self.overwrite))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| SceneError::encode(format!("spawn ffmpeg: {e}")))?;
        let (Some(stdin), Some(mut stderr)) = (child.stdin.take(), child.stderr.take()) else {
            return Err(SceneError::encode("ffmpeg pipes were not opened"));
        };
        let stderr = std::thread::spawn(move || {
            let mut buf = Vec::new();
            stderr.read_to_end(&mut buf).map(|_| buf)
        });

        tracing::info!(
            out = %self.out_path.display(),
            width = cfg.width,
            height = cfg.height,
            fps = cfg.fps.as_f64(),
            "mp4 encode started"
        );
        let len = (cfg.width as usize) * (cfg.height as usize) * 4;
        self.session = Some(Encoder {
            cfg,
            child,
            stdin,
            stderr,
            last_idx: None,
            opaque: vec![0; len],
            frames_written: 0,
        });
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> SceneResult<()> {
        let matte = self.matte;
        let enc = self.encoder()?;
        check_frame(&enc.cfg, enc.last_idx, idx, frame)?;

        // `opaque` still holds the previous tick's frame.
        for _ in 0..held_ticks(enc.last_idx, idx) {
            enc.write_opaque()?;
        }
        composite_over_matte(&mut enc.opaque, &frame.data, matte);
        enc.write_opaque()?;
        enc.last_idx = Some(idx);
        Ok(())
    }

    fn end(&mut self) -> SceneResult<()> {
        let Some(enc) = self.session.take() else {
            return Err(SceneError::encode("mp4 sink not started"));
        };
        let frames = enc.frames_written;
        enc.finish()?;
        tracing::info!(out = %self.out_path.display(), frames, "mp4 encode finished");
        Ok(())
    }
}

impl Encoder {
    fn write_opaque(&mut self) -> SceneResult<()> {
        self.stdin
            .write_all(&self.opaque)
            .map_err(|e| SceneError::encode(format!("write frame to ffmpeg: {e}")))?;
        self.frames_written += 1;
        Ok(())
    }

    fn finish(self) -> SceneResult<()> {
        let Encoder {
            mut child,
            stdin,
            stderr,
            ..
        } = self;
        drop(stdin);
        let status = child
            .wait()
            .map_err(|e| SceneError::encode(format!("wait for ffmpeg: {e}")))?;
        let log = stderr
            .join()
            .map_err(|_| SceneError::encode("ffmpeg stderr reader panicked"))?
            .unwrap_or_default();
        if !status.success() {
            return Err(SceneError::encode(format!(
                "ffmpeg failed ({status}): {}",
                String::from_utf8_lossy(&log).trim()
            )));
        }
        Ok(())
    }
}

/// Command line for raw RGBA on stdin at the tick rate, H.264 yuv420p out.
fn encoder_args(cfg: &SinkConfig, out_path: &Path, overwrite: bool) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        if overwrite { "-y" } else { "-n" }.into(),
        "-loglevel".into(),
        "error".into(),
        "-f".into(),
        "rawvideo".into(),
        "-pix_fmt".into(),
        "rgba".into(),
        "-video_size".into(),
        format!("{}x{}", cfg.width, cfg.height).into(),
        "-framerate".into(),
        format!("{}/{}", cfg.fps.num, cfg.fps.den).into(),
        "-i".into(),
        "pipe:0".into(),
    ];
    args.extend(
        ["-an", "-c:v", "libx264", "-pix_fmt", "yuv420p", "-movflags", "+faststart"]
            .map(OsString::from),
    );
    args.push(out_path.as_os_str().to_owned());
    args
}

/// Ticks skipped between two pushed frames, each shown as a repeat of the earlier frame.
fn held_ticks(last: Option<FrameIndex>, idx: FrameIndex) -> u64 {
    last.map_or(0, |last| idx.0.saturating_sub(last.0).saturating_sub(1))
}

/// `dst = src over matte`, with premultiplied `src` and an opaque `matte`.
fn composite_over_matte(dst: &mut [u8], src: &[u8], matte: Rgba8Premul) {
    let matte = [matte.r, matte.g, matte.b].map(u16::from);
    for (out, px) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let cover = 255 - u16::from(px[3]);
        for c in 0..3 {
            out[c] = (u16::from(px[c]) + mul_div255_u16(matte[c], cover)).min(255) as u8;
        }
        out[3] = 255;
    }
}
