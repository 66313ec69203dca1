//! Per-frame scene composition: sky, hills, road, sun, three windmills and a cart.
//!
//! Every composite object is drawn inside [`Painter::scoped`] and is positioned purely from its
//! fixed placement and the [`AnimationClock`]. The loops that fan out rays, vanes and spokes
//! keep rotating the shared transform, so the k-th copy sits at `base + k * step`.

use std::f64::consts::TAU;

use crate::driver::clock::AnimationClock;
use crate::foundation::core::{Affine, Point, Rgba8Premul};
use crate::scene::color;
use crate::scene::geometry::{SceneGeometry, disc, rect, segment};
use crate::scene::painter::Painter;
use crate::scene::plan::FramePlan;
use crate::scene::viewport::WorldMapping;

/// Rays around the sun.
pub const SUN_RAYS: u32 = 13;
/// Vanes per windmill.
pub const WINDMILL_VANES: u32 = 3;
/// Spokes per wheel.
pub const WHEEL_SPOKES: u32 = 15;
/// Ticks for the cart to cross the scene once.
pub const CART_PERIOD: u64 = 300;

/// Sun center in world coordinates.
pub const SUN_POSITION: (f64, f64) = (5.5, 3.3);
/// Windmill feet and uniform scales, drawn left to right.
pub const WINDMILL_PLACEMENTS: [((f64, f64), f64); 3] =
    [((0.75, 1.0), 0.6), ((2.2, 1.3), 0.4), ((3.7, 0.8), 0.7)];
/// Uniform scale applied to the cart.
pub const CART_SCALE: f64 = 0.3;

const RAY_LENGTH: f64 = 0.75;
const POLE_HEIGHT: f64 = 3.0;
const STRIPE_WIDTH_PX: f64 = 5.0;

/// Sun spin: slow clockwise drift.
pub fn sun_rotation(clock: AnimationClock) -> f64 {
    -clock.ticks_f64() / 30.0
}

/// Blade-assembly rotation shared by all windmills.
pub fn windmill_rotation(clock: AnimationClock) -> f64 {
    clock.ticks_f64() / 23.0
}

/// Spoke rotation; same rate as the sun, driven by the clock rather than cart travel.
pub fn wheel_rotation(clock: AnimationClock) -> f64 {
    -clock.ticks_f64() / 30.0
}

/// Horizontal cart position: sweeps `[-3, 10)` once every [`CART_PERIOD`] ticks.
pub fn cart_offset(clock: AnimationClock) -> f64 {
    -3.0 + 13.0 * (clock.phase(CART_PERIOD) as f64) / (CART_PERIOD as f64)
}

/// Device-space frame drawn around the surface edge after the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Border {
    /// Line color.
    pub color: Rgba8Premul,
    /// Line width in device pixels.
    pub width_px: f64,
}

/// Presentation options that sit outside the world-space scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneStyle {
    /// Surface clear color behind the sky rectangle.
    pub background: Option<Rgba8Premul>,
    /// Optional panel border.
    pub border: Option<Border>,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            background: Some(color::LIGHT_GRAY),
            border: Some(Border {
                color: color::DARK_GRAY,
                width_px: 2.0,
            }),
        }
    }
}

/// The animated scene. Holds only immutable geometry and style; all motion comes from the clock
/// handed to [`Scene::compose`].
#[derive(Clone, Debug, Default)]
pub struct Scene {
    geometry: SceneGeometry,
    style: SceneStyle,
}

impl Scene {
    /// Scene with the given style.
    pub fn new(style: SceneStyle) -> Self {
        Self {
            geometry: SceneGeometry::new(),
            style,
        }
    }

    /// Presentation options.
    pub fn style(&self) -> &SceneStyle {
        &self.style
    }

    /// Build the display list for one frame.
    #[tracing::instrument(skip(self, mapping), fields(tick = clock.ticks()))]
    pub fn compose(&self, clock: AnimationClock, mapping: &WorldMapping) -> FramePlan {
        let plan = FramePlan::new(mapping.canvas, self.style.background);
        let mut painter = Painter::new(plan, mapping.transform);
        self.draw(&mut painter, clock, mapping.pixel_size);
        debug_assert!(painter.stats().is_balanced());
        let plan = painter.finish();
        tracing::trace!(ops = plan.ops.len(), "composed frame");
        plan
    }

    /// Draw the scene back to front onto `painter`, whose current transform must be the
    /// world-to-device mapping. Leaves the painter's transform unchanged.
    pub fn draw(&self, p: &mut Painter, clock: AnimationClock, pixel_size: f64) {
        p.fill(&rect(0.0, 0.0, 7.0, 4.0), color::SKY);
        p.fill(self.geometry.ground(), color::GROUND);
        p.fill(&rect(0.0, -0.4, 7.0, 0.8), color::ROAD);
        p.stroke(
            &segment(Point::new(0.0, 0.0), Point::new(7.0, 0.0)),
            color::WHITE,
            STRIPE_WIDTH_PX * pixel_size,
        );

        p.scoped(|p| {
            p.translate(SUN_POSITION.0, SUN_POSITION.1);
            draw_sun(p, clock, pixel_size);
        });

        for ((x, y), s) in WINDMILL_PLACEMENTS {
            p.scoped(|p| {
                p.translate(x, y);
                p.scale(s, s);
                draw_windmill(p, &self.geometry, clock);
            });
        }

        p.scoped(|p| {
            p.translate(cart_offset(clock), 0.0);
            p.scale(CART_SCALE, CART_SCALE);
            draw_cart(p, clock, pixel_size);
        });

        if let Some(border) = self.style.border {
            p.scoped(|p| {
                p.set_transform(Affine::IDENTITY);
                draw_border(p, border);
            });
        }
    }
}

fn draw_sun(p: &mut Painter, clock: AnimationClock, line_width: f64) {
    p.rotate(sun_rotation(clock));
    let ray = segment(Point::ORIGIN, Point::new(RAY_LENGTH, 0.0));
    for _ in 0..SUN_RAYS {
        p.rotate(TAU / f64::from(SUN_RAYS));
        p.stroke(&ray, color::SUN_RAY, line_width);
    }
    let body = disc(0.5);
    p.fill(&body, color::SUN_DISC);
    p.stroke(&body, color::SUN_RAY, line_width);
}

fn draw_windmill(p: &mut Painter, geometry: &SceneGeometry, clock: AnimationClock) {
    p.fill(&rect(-0.05, 0.0, 0.1, POLE_HEIGHT), color::WINDMILL_POLE);
    p.translate(0.0, POLE_HEIGHT);
    p.rotate(windmill_rotation(clock));
    for _ in 0..WINDMILL_VANES {
        p.rotate(TAU / f64::from(WINDMILL_VANES));
        p.fill(geometry.windmill_vane(), color::WINDMILL_VANE);
    }
}

fn draw_cart(p: &mut Painter, clock: AnimationClock, line_width: f64) {
    for wheel_x in [-1.5, 1.5] {
        p.scoped(|p| {
            p.translate(wheel_x, -0.1);
            p.scale(0.8, 0.8);
            draw_wheel(p, clock, line_width);
        });
    }
    p.fill(&rect(-3.0, 0.0, 6.0, 2.0), color::CART_BODY);
    p.fill(&rect(-2.3, 1.0, 2.6, 1.0), color::CART_BODY);
}

fn draw_wheel(p: &mut Painter, clock: AnimationClock, line_width: f64) {
    p.fill(&disc(1.0), color::BLACK);
    p.fill(&disc(0.8), color::WHEEL_FACE);
    p.fill(&disc(0.2), color::BLACK);
    p.rotate(wheel_rotation(clock));
    let spoke = rect(0.0, -0.1, 1.0, 0.2);
    for _ in 0..WHEEL_SPOKES {
        p.rotate(TAU / f64::from(WHEEL_SPOKES));
        p.stroke(&spoke, color::BLACK, line_width);
    }
}

fn draw_border(p: &mut Painter, border: Border) {
    let canvas = p.canvas();
    let inset = border.width_px / 2.0;
    let w = (f64::from(canvas.width) - border.width_px).max(0.0);
    let h = (f64::from(canvas.height) - border.width_px).max(0.0);
    p.stroke(&rect(inset, inset, w, h), border.color, border.width_px);
}

#[cfg(test)]
#[path = "../../tests/unit/scene/compose.rs"]
mod tests;
