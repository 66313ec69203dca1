use crate::foundation::core::{Affine, BezPath, Rgba8Premul};
use crate::foundation::error::{SceneError, SceneResult};
use crate::foundation::math::unpremul_u8;
use crate::render::backend::{FrameRGBA, RenderBackend, RenderSettings};
use crate::scene::plan::{DrawOp, FramePlan};

/// CPU raster backend powered by `vello_cpu`.
///
/// The render context and target pixmap are kept between frames and only reallocated when the
/// canvas size changes.
pub struct CpuBackend {
    settings: RenderSettings,
    ctx: Option<vello_cpu::RenderContext>,
    pixmap: Option<vello_cpu::Pixmap>,
}

impl CpuBackend {
    /// Create a backend with the given settings.
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            ctx: None,
            pixmap: None,
        }
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut vello_cpu::RenderContext) -> SceneResult<R>,
    ) -> SceneResult<R> {
        let mut ctx = match self.ctx.take() {
            None => vello_cpu::RenderContext::new(width, height),
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            Some(_) => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(&mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }

    fn take_pixmap(&mut self, width: u16, height: u16) -> vello_cpu::Pixmap {
        match self.pixmap.take() {
            Some(pm) if pm.width() == width && pm.height() == height => pm,
            _ => vello_cpu::Pixmap::new(width, height),
        }
    }

    fn clear_color(&self, plan: &FramePlan) -> Option<Rgba8Premul> {
        plan.clear.or_else(|| {
            self.settings
                .clear_rgba
                .map(|[r, g, b, a]| Rgba8Premul::from_straight_rgba(r, g, b, a))
        })
    }
}

impl RenderBackend for CpuBackend {
    #[tracing::instrument(
        skip_all,
        fields(width = plan.canvas.width, height = plan.canvas.height, ops = plan.ops.len())
    )]
    fn render_plan(&mut self, plan: &FramePlan) -> SceneResult<FrameRGBA> {
        let width: u16 = plan
            .canvas
            .width
            .try_into()
            .map_err(|_| SceneError::render("canvas width exceeds u16"))?;
        let height: u16 = plan
            .canvas
            .height
            .try_into()
            .map_err(|_| SceneError::render("canvas height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(SceneError::validation("canvas width/height must be non-zero"));
        }

        let clear = self.clear_color(plan);
        let mut pixmap = self.take_pixmap(width, height);
        self.with_ctx_mut(width, height, |ctx| {
            if let Some(c) = clear {
                ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                ctx.set_paint(paint_color(c));
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                    0.0,
                    0.0,
                    f64::from(width),
                    f64::from(height),
                ));
            }
            for op in &plan.ops {
                draw_op(ctx, op);
            }
            ctx.flush();
            ctx.render_to_pixmap(&mut pixmap);
            Ok(())
        })?;

        let data = pixmap.data_as_u8_slice().to_vec();
        self.pixmap = Some(pixmap);
        Ok(FrameRGBA {
            width: plan.canvas.width,
            height: plan.canvas.height,
            data,
            premultiplied: true,
        })
    }
}

fn draw_op(ctx: &mut vello_cpu::RenderContext, op: &DrawOp) {
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    match op {
        DrawOp::FillPath {
            path,
            transform,
            color,
        } => {
            ctx.set_transform(affine_to_cpu(*transform));
            ctx.set_paint(paint_color(*color));
            ctx.fill_path(&bezpath_to_cpu(path));
        }
        DrawOp::StrokePath {
            path,
            transform,
            color,
            width,
        } => {
            if !(width.is_finite() && *width > 0.0) {
                tracing::trace!(width, "skipping stroke with non-positive width");
                return;
            }
            ctx.set_transform(affine_to_cpu(*transform));
            ctx.set_paint(paint_color(*color));
            ctx.set_stroke(square_stroke(*width));
            ctx.stroke_path(&bezpath_to_cpu(path));
        }
    }
}

/// Mitered joins and square caps, so outlines keep sharp corners and line ends extend by half
/// the width past their endpoints.
fn square_stroke(width: f64) -> vello_cpu::kurbo::Stroke {
    vello_cpu::kurbo::Stroke::new(width)
        .with_join(vello_cpu::kurbo::Join::Miter)
        .with_caps(vello_cpu::kurbo::Cap::Square)
}

fn paint_color(c: Rgba8Premul) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(
        unpremul_u8(c.r, c.a),
        unpremul_u8(c.g, c.a),
        unpremul_u8(c.b, c.a),
        c.a,
    )
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
