//! JSON run configuration.
//!
//! Every field has a default matching the stock scene: a 700x500 panel titled
//! "Hierarchical Modeling in 2D", ticking every 30 ms, viewing world `x in [0, 7]`,
//! `y in [-1, 4]` on a light gray background with a 2 px dark gray border.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::driver::scheduler::DEFAULT_TICK_PERIOD_MS;
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{SceneError, SceneResult};
use crate::scene::color::{self, ColorDef};
use crate::scene::compose::{Border, SceneStyle};
use crate::scene::viewport::ViewportSpec;

/// Largest surface edge the CPU backend can rasterize.
pub const MAX_SURFACE_EDGE: u32 = u16::MAX as u32;

/// Border section of a [`SceneConfig`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BorderConfig {
    /// Line color.
    pub color: ColorDef,
    /// Line width in device pixels.
    pub width_px: f64,
}

/// Run configuration loaded from JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    /// Window or output title.
    pub title: String,
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// Timer interval in milliseconds.
    pub tick_period_ms: u32,
    /// World window shown on the surface.
    pub viewport: ViewportSpec,
    /// Clear color behind the scene; `null` leaves the surface transparent.
    pub background: Option<ColorDef>,
    /// Device-space border; `null` disables it.
    pub border: Option<BorderConfig>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            title: "Hierarchical Modeling in 2D".to_owned(),
            width: 700,
            height: 500,
            tick_period_ms: DEFAULT_TICK_PERIOD_MS,
            viewport: ViewportSpec::default(),
            background: Some(ColorDef::from(color::LIGHT_GRAY)),
            border: Some(BorderConfig {
                color: ColorDef::from(color::DARK_GRAY),
                width_px: 2.0,
            }),
        }
    }
}

impl SceneConfig {
    /// Parse a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> SceneResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| SceneError::serde(format!("parse scene config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json_str(s: &str) -> SceneResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SceneError::validation(format!("open scene config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check sizes, timing, viewport and border values.
    pub fn validate(&self) -> SceneResult<()> {
        if self.width > MAX_SURFACE_EDGE || self.height > MAX_SURFACE_EDGE {
            return Err(SceneError::validation(format!(
                "surface {}x{} exceeds {MAX_SURFACE_EDGE} px per edge",
                self.width, self.height
            )));
        }
        Canvas::new(self.width, self.height)?;
        if self.tick_period_ms == 0 {
            return Err(SceneError::validation("tick_period_ms must be > 0"));
        }
        self.viewport.validate()?;
        if let Some(b) = &self.border
            && !(b.width_px.is_finite() && b.width_px > 0.0)
        {
            return Err(SceneError::validation(
                "border width_px must be finite and > 0",
            ));
        }
        Ok(())
    }

    /// Surface size.
    pub fn canvas(&self) -> SceneResult<Canvas> {
        Canvas::new(self.width, self.height)
    }

    /// Frame rate implied by the tick period.
    pub fn fps(&self) -> SceneResult<Fps> {
        Fps::from_tick_period_ms(self.tick_period_ms)
    }

    /// Presentation style for [`crate::Scene`].
    pub fn style(&self) -> SceneStyle {
        SceneStyle {
            background: self.background.map(ColorDef::to_rgba8_premul),
            border: self.border.map(|b| Border {
                color: b.color.to_rgba8_premul(),
                width_px: b.width_px,
            }),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
