//! Rotation transforms attached to rotated labels and items.
//!
//! A rotation is expressed the way SVG expresses it: an angle in degrees,
//! clockwise positive (y grows downward), around a pivot point. The same value
//! is emitted in the vector description and used by the lint pass to compute
//! the screen-space extent of rotated text.
//!
//! Bounds of a rotated box use the "loose bounds" approach: rotate the four
//! corners of the axis-aligned box and take the axis-aligned box of the result.

use serde::Serialize;

use super::types::{round2, BoundingBox, Point};

/// A clockwise rotation by `angle` degrees around `pivot`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rotation {
    pub angle: f64,
    pub pivot: Point,
}

impl Rotation {
    pub fn new(angle: f64, pivot: Point) -> Self {
        Self { angle, pivot }
    }

    /// True when the rotation would not produce any visible change
    pub fn is_identity(&self) -> bool {
        (self.angle % 360.0).abs() < f64::EPSILON
    }

    /// Copy with angle and pivot rounded to the output precision
    pub fn rounded(&self) -> Rotation {
        Rotation::new(round2(self.angle), self.pivot.rounded())
    }

    /// Rotate a point around the pivot.
    ///
    /// With y pointing down, clockwise rotation is:
    /// ```text
    /// x' = px + (x - px) * cos(θ) - (y - py) * sin(θ)
    /// y' = py + (x - px) * sin(θ) + (y - py) * cos(θ)
    /// ```
    pub fn transform_point(&self, point: Point) -> Point {
        if self.is_identity() {
            return point;
        }

        let (sin_a, cos_a) = self.angle.to_radians().sin_cos();
        let dx = point.x - self.pivot.x;
        let dy = point.y - self.pivot.y;

        Point {
            x: self.pivot.x + dx * cos_a - dy * sin_a,
            y: self.pivot.y + dx * sin_a + dy * cos_a,
        }
    }

    /// Axis-aligned bounds of a rotated box (loose bounds)
    pub fn transform_bounds(&self, bounds: &BoundingBox) -> BoundingBox {
        if self.is_identity() {
            return *bounds;
        }

        let corners = [
            Point::new(bounds.x, bounds.y),
            Point::new(bounds.right(), bounds.y),
            Point::new(bounds.x, bounds.bottom()),
            Point::new(bounds.right(), bounds.bottom()),
        ];
        let rotated: Vec<Point> = corners.iter().map(|p| self.transform_point(*p)).collect();

        // Four corners are always present
        BoundingBox::from_points(&rotated).unwrap_or(*bounds)
    }
}
