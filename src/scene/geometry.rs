//! Static shape library, authored in local coordinates.

use crate::foundation::core::{BezPath, Point, Rect};
use kurbo::Shape;

/// Flattening tolerance for circles, in local units.
const CURVE_TOLERANCE: f64 = 1e-3;

/// An ordered vertex sequence with an open/closed flag.
#[derive(Clone, Debug, PartialEq)]
pub struct PolyPath {
    points: Vec<Point>,
    closed: bool,
}

impl PolyPath {
    /// Build a path from vertices in local coordinates.
    pub fn new(points: impl Into<Vec<Point>>, closed: bool) -> Self {
        Self {
            points: points.into(),
            closed,
        }
    }

    /// Vertices in authoring order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Whether the last vertex connects back to the first.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Convert to a `BezPath`. An empty vertex list yields an empty path, which draws nothing.
    pub fn to_bezpath(&self) -> BezPath {
        let mut out = BezPath::new();
        let Some((first, rest)) = self.points.split_first() else {
            return out;
        };
        out.move_to(*first);
        for p in rest {
            out.line_to(*p);
        }
        if self.closed {
            out.close_path();
        }
        out
    }
}

/// Hill silhouette spanning the full world width, from y=-1 up to the ridge line.
pub fn ground() -> PolyPath {
    PolyPath::new(
        [
            Point::new(0.0, -1.0),
            Point::new(0.0, 0.8),
            Point::new(1.5, 1.65),
            Point::new(1.8, 1.3),
            Point::new(3.0, 2.1),
            Point::new(4.7, 0.7),
            Point::new(6.1, 1.2),
            Point::new(7.0, 0.8),
            Point::new(7.0, -1.0),
        ],
        true,
    )
}

/// One windmill blade pointing along +x from the hub at the origin.
pub fn windmill_vane() -> PolyPath {
    PolyPath::new(
        [
            Point::new(0.0, 0.0),
            Point::new(0.5, 0.1),
            Point::new(1.5, 0.0),
            Point::new(0.5, -0.1),
        ],
        true,
    )
}

/// Axis-aligned rectangle with its minimum corner at `(x, y)`.
pub fn rect(x: f64, y: f64, w: f64, h: f64) -> BezPath {
    Rect::new(x, y, x + w, y + h).to_path(CURVE_TOLERANCE)
}

/// Circle of `radius` centered at the local origin.
pub fn disc(radius: f64) -> BezPath {
    kurbo::Circle::new(Point::ORIGIN, radius).to_path(CURVE_TOLERANCE)
}

/// Open two-point segment.
pub fn segment(from: Point, to: Point) -> BezPath {
    PolyPath::new([from, to], false).to_bezpath()
}

/// Immutable paths shared by every frame; built once per scene.
#[derive(Clone, Debug)]
pub struct SceneGeometry {
    pub(crate) ground: BezPath,
    pub(crate) windmill_vane: BezPath,
}

impl SceneGeometry {
    /// Build the shape library.
    pub fn new() -> Self {
        Self {
            ground: ground().to_bezpath(),
            windmill_vane: windmill_vane().to_bezpath(),
        }
    }

    /// Ground silhouette as a fillable path.
    pub fn ground(&self) -> &BezPath {
        &self.ground
    }

    /// Windmill vane as a fillable path.
    pub fn windmill_vane(&self) -> &BezPath {
        &self.windmill_vane
    }
}

impl Default for SceneGeometry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/geometry.rs"]
mod tests;
