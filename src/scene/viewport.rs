//! World-window to device-pixel mapping.
//!
//! A [`ViewportSpec`] names the world rectangle that should fill the device surface. Mapping it
//! against a [`Canvas`] sends `(xleft, ytop)` to device `(0, 0)` and `(xright, ybottom)` to
//! `(width, height)`. With the default bounds `ytop > ybottom`, so world "up" becomes device
//! "down" and the y axis flips.

use crate::foundation::core::{Affine, Canvas, Point, Vec2};
use crate::foundation::error::{SceneError, SceneResult};
use serde::{Deserialize, Serialize};

/// Requested world bounds plus the aspect-preservation flag.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewportSpec {
    /// World x mapped to the left device edge.
    pub xleft: f64,
    /// World x mapped to the right device edge.
    pub xright: f64,
    /// World y mapped to the top device edge.
    pub ytop: f64,
    /// World y mapped to the bottom device edge.
    pub ybottom: f64,
    /// Pad the bounds on one axis so shapes are never stretched.
    pub preserve_aspect: bool,
}

impl Default for ViewportSpec {
    fn default() -> Self {
        Self {
            xleft: 0.0,
            xright: 7.0,
            ytop: 4.0,
            ybottom: -1.0,
            preserve_aspect: false,
        }
    }
}

/// Effective world bounds after optional aspect padding.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    /// Left edge.
    pub xleft: f64,
    /// Right edge.
    pub xright: f64,
    /// Top edge.
    pub ytop: f64,
    /// Bottom edge.
    pub ybottom: f64,
}

/// Result of mapping a viewport onto a device surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldMapping {
    /// Device surface the mapping targets.
    pub canvas: Canvas,
    /// Bounds actually used, after aspect padding.
    pub bounds: WorldBounds,
    /// World to device transform.
    pub transform: Affine,
    /// Size of one device pixel in world units (smaller of the two axes).
    pub pixel_size: f64,
}

impl WorldMapping {
    /// Map a world point to device pixels.
    pub fn world_to_device(&self, p: Point) -> Point {
        self.transform * p
    }

    /// Map a device pixel position back into world coordinates.
    pub fn device_to_world(&self, p: Point) -> Point {
        self.transform.inverse() * p
    }
}

impl ViewportSpec {
    /// Compute the world to device mapping for `canvas`.
    ///
    /// Rejects degenerate or non-finite bounds; this is the only failure point of a frame, the
    /// drawing algorithm downstream never errors.
    pub fn map(&self, canvas: Canvas) -> SceneResult<WorldMapping> {
        self.validate()?;
        if canvas.width == 0 || canvas.height == 0 {
            return Err(SceneError::validation(format!(
                "device size must be non-zero, got {}x{}",
                canvas.width, canvas.height
            )));
        }

        let width = f64::from(canvas.width);
        let height = f64::from(canvas.height);
        let bounds = if self.preserve_aspect {
            self.padded_bounds(width, height)
        } else {
            WorldBounds {
                xleft: self.xleft,
                xright: self.xright,
                ytop: self.ytop,
                ybottom: self.ybottom,
            }
        };

        let span_x = bounds.xright - bounds.xleft;
        let span_y = bounds.ybottom - bounds.ytop;
        if !(span_x.is_finite() && span_y.is_finite()) {
            return Err(SceneError::validation(
                "viewport span overflows to infinity",
            ));
        }
        let pixel_width = (span_x / width).abs();
        let pixel_height = (span_y / height).abs();
        if !(pixel_width > 0.0 && pixel_height > 0.0) {
            return Err(SceneError::validation(
                "viewport span is too small to resolve one device pixel",
            ));
        }
        let pixel_size = pixel_width.min(pixel_height);

        let transform = Affine::scale_non_uniform(width / span_x, height / span_y)
            * Affine::translate(Vec2::new(-bounds.xleft, -bounds.ytop));
        if !transform.is_finite() {
            return Err(SceneError::validation(
                "viewport bounds produce a non-finite device transform",
            ));
        }

        tracing::debug!(
            width = canvas.width,
            height = canvas.height,
            pixel_size,
            preserve_aspect = self.preserve_aspect,
            "mapped viewport"
        );

        Ok(WorldMapping {
            canvas,
            bounds,
            transform,
            pixel_size,
        })
    }

    /// Check that the bounds describe a non-empty, finite world window.
    pub fn validate(&self) -> SceneResult<()> {
        let all = [self.xleft, self.xright, self.ytop, self.ybottom];
        if all.iter().any(|v| !v.is_finite()) {
            return Err(SceneError::validation("viewport bounds must be finite"));
        }
        if self.xleft == self.xright {
            return Err(SceneError::validation(
                "viewport xleft and xright must differ",
            ));
        }
        if self.ytop == self.ybottom {
            return Err(SceneError::validation(
                "viewport ytop and ybottom must differ",
            ));
        }
        if !((self.xright - self.xleft).is_finite() && (self.ybottom - self.ytop).is_finite()) {
            return Err(SceneError::validation(
                "viewport span overflows to infinity",
            ));
        }
        Ok(())
    }

    fn padded_bounds(&self, width: f64, height: f64) -> WorldBounds {
        let (mut xleft, mut xright) = (self.xleft, self.xright);
        let (mut ytop, mut ybottom) = (self.ytop, self.ybottom);

        let display_aspect = (height / width).abs();
        let requested_aspect = ((ybottom - ytop) / (xright - xleft)).abs();
        if display_aspect > requested_aspect {
            let excess = (ybottom - ytop) * (display_aspect / requested_aspect - 1.0);
            ybottom += excess / 2.0;
            ytop -= excess / 2.0;
        } else if display_aspect < requested_aspect {
            let excess = (xright - xleft) * (requested_aspect / display_aspect - 1.0);
            xright += excess / 2.0;
            xleft -= excess / 2.0;
        }

        WorldBounds {
            xleft,
            xright,
            ytop,
            ybottom,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/viewport.rs"]
mod tests;
