//! Angle and coordinate primitives shared by every layout calculator.
//!
//! Angles are in degrees. 0° points along +x and angles grow clockwise on
//! screen because the canvas y axis points down.

use super::types::{BoundingBox, Point, PolarCoord};

/// Degrees to radians
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees.to_radians()
}

/// Radians to degrees
pub fn rad_to_deg(radians: f64) -> f64 {
    radians.to_degrees()
}

/// Normalize an angle into `[0, 360)`
pub fn normalize_angle(angle: f64) -> f64 {
    let mut normalized = angle % 360.0;
    if normalized < 0.0 {
        normalized += 360.0;
    }
    // A tiny negative remainder plus 360 can round up to exactly 360
    if normalized >= 360.0 {
        normalized = 0.0;
    }
    normalized
}

/// Convert a polar coordinate around `center` to a canvas point
pub fn polar_to_cartesian(center: Point, polar: PolarCoord) -> Point {
    let (sin_a, cos_a) = deg_to_rad(normalize_angle(polar.angle)).sin_cos();
    Point {
        x: center.x + polar.radius * cos_a,
        y: center.y + polar.radius * sin_a,
    }
}

/// Inverse of [`polar_to_cartesian`]; the angle is normalized
pub fn cartesian_to_polar(center: Point, point: Point) -> PolarCoord {
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    PolarCoord {
        radius: dx.hypot(dy),
        angle: normalize_angle(rad_to_deg(dy.atan2(dx))),
    }
}

/// Euclidean distance between two points
pub fn distance(a: Point, b: Point) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// True when two boxes overlap on both axes (touching edges do not overlap)
pub fn boxes_overlap(a: &BoundingBox, b: &BoundingBox) -> bool {
    a.intersects(b)
}
