//! Parametric spiral sampling and tangent estimation

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use super::polar::{normalize_angle, rad_to_deg};
use super::types::Point;

/// Spiral family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpiralKind {
    /// `r = a + b·θ`
    Archimedean,
    /// `r = a·e^(b·θ)`
    #[default]
    Logarithmic,
}

/// Curve parameters shared by sampling and path generation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpiralParams {
    pub kind: SpiralKind,
    pub a: f64,
    pub b: f64,
    /// Start angle in degrees
    pub start_angle: f64,
    pub turns: f64,
}

impl SpiralParams {
    /// Radius at polar angle `theta` (radians).
    ///
    /// The logarithmic base radius is floored at 1: with `a = 0` the whole curve
    /// would collapse onto the center.
    pub fn radius_at(&self, theta: f64) -> f64 {
        match self.kind {
            SpiralKind::Archimedean => self.a + self.b * theta,
            SpiralKind::Logarithmic => self.a.max(1.0) * (self.b * theta).exp(),
        }
    }

    /// Point on the curve at progress `t ∈ [0, 1]`
    pub fn point_at(&self, center: Point, t: f64) -> Point {
        let theta = self.start_angle.to_radians() + t * self.turns * TAU;
        let r = self.radius_at(theta);
        Point {
            x: center.x + r * theta.cos(),
            y: center.y + r * theta.sin(),
        }
    }
}

fn progress(i: usize, count: usize) -> f64 {
    if count <= 1 {
        0.0
    } else {
        i as f64 / (count - 1) as f64
    }
}

/// `count` samples evenly spaced in progress from the start angle to the end of the last turn
pub fn spiral_points(center: Point, params: &SpiralParams, count: usize) -> Vec<Point> {
    (0..count)
        .map(|i| params.point_at(center, progress(i, count)))
        .collect()
}

/// Direction of travel at each sample, in normalized degrees.
///
/// Each point differences forward against its successor; the last point
/// differences backward against its predecessor. A lone point gets 0°.
pub fn tangent_angles(points: &[Point]) -> Vec<f64> {
    if points.len() < 2 {
        return vec![0.0; points.len()];
    }
    let last = points.len() - 1;
    (0..points.len())
        .map(|i| {
            let (from, to) = if i == last {
                (points[i - 1], points[i])
            } else {
                (points[i], points[i + 1])
            };
            normalize_angle(rad_to_deg((to.y - from.y).atan2(to.x - from.x)))
        })
        .collect()
}

/// Dense sampling of the curve for drawing its path
pub fn spiral_path(center: Point, params: &SpiralParams, samples: usize) -> Vec<Point> {
    spiral_points(center, params, samples.max(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::polar::distance;

    fn params(kind: SpiralKind, a: f64, b: f64, turns: f64) -> SpiralParams {
        SpiralParams {
            kind,
            a,
            b,
            start_angle: 0.0,
            turns,
        }
    }

    #[test]
    fn test_archimedean_radius_grows_linearly() {
        let c = Point::new(0.0, 0.0);
        let p = params(SpiralKind::Archimedean, 10.0, 5.0, 1.0);
        let points = spiral_points(c, &p, 3);
        assert_eq!(points.len(), 3);
        // t = 0: θ = 0, r = a
        assert!((points[0].x - 10.0).abs() < 1e-9);
        // t = 1: θ = 2π, r = a + 2πb, back on the +x axis
        let expected = 10.0 + 5.0 * TAU;
        assert!((distance(c, points[2]) - expected).abs() < 1e-9);
        assert!(points[2].y.abs() < 1e-6);
    }

    #[test]
    fn test_logarithmic_radius() {
        let c = Point::new(0.0, 0.0);
        let p = params(SpiralKind::Logarithmic, 20.0, 0.35, 2.5);
        let points = spiral_points(c, &p, 12);
        let theta_end = 2.5 * TAU;
        let expected = 20.0 * (0.35 * theta_end).exp();
        assert!((distance(c, points[11]) - expected).abs() < 1e-6);
        assert!((distance(c, points[0]) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_logarithmic_base_floor() {
        let p = params(SpiralKind::Logarithmic, 0.0, 0.2, 1.0);
        assert_eq!(p.radius_at(0.0), 1.0);
    }

    #[test]
    fn test_single_sample_sits_at_start() {
        let c = Point::new(100.0, 100.0);
        let mut p = params(SpiralKind::Archimedean, 50.0, 1.0, 3.0);
        p.start_angle = 90.0;
        let points = spiral_points(c, &p, 1);
        assert_eq!(points.len(), 1);
        assert!((points[0].x - 100.0).abs() < 1e-9);
        assert!((points[0].y - (150.0 + std::f64::consts::FRAC_PI_2)).abs() < 1e-9);
    }

    #[test]
    fn test_tangent_last_point_differences_backward() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
        ];
        let tangents = tangent_angles(&points);
        assert_eq!(tangents.len(), 3);
        assert_eq!(tangents[0], 0.0);
        assert!((tangents[1] - 90.0).abs() < 1e-9);
        // last repeats the incoming direction
        assert_eq!(tangents[2], tangents[1]);
    }

    #[test]
    fn test_tangent_single_point() {
        assert_eq!(tangent_angles(&[Point::new(3.0, 3.0)]), vec![0.0]);
        assert!(tangent_angles(&[]).is_empty());
    }

    #[test]
    fn test_path_sample_count() {
        let p = params(SpiralKind::Archimedean, 0.0, 10.0, 2.0);
        assert_eq!(spiral_path(Point::new(0.0, 0.0), &p, 240).len(), 240);
        assert_eq!(spiral_path(Point::new(0.0, 0.0), &p, 0).len(), 2);
    }
}
