//! Evenly spaced positions around a circle, and the radial lines through them

use serde::{Deserialize, Serialize};

use super::polar::{normalize_angle, polar_to_cartesian};
use super::types::{Point, PolarCoord};

/// Winding direction used when placing successive segments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    #[serde(rename = "cw")]
    Clockwise,
    #[serde(rename = "ccw")]
    CounterClockwise,
}

impl Direction {
    /// +1 for clockwise, -1 for counter-clockwise
    pub fn multiplier(&self) -> f64 {
        match self {
            Direction::Clockwise => 1.0,
            Direction::CounterClockwise => -1.0,
        }
    }
}

/// A straight radial line, e.g. a tick mark or spoke
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub from: Point,
    pub to: Point,
    /// Normalized angle of the line, in degrees
    pub angle: f64,
}

/// Normalized angle of each of `count` segments.
///
/// A `count` of zero yields no angles.
pub fn segment_angles(count: u32, start_angle: f64, direction: Direction) -> Vec<f64> {
    if count == 0 {
        return vec![];
    }
    let step = 360.0 / count as f64;
    let multiplier = direction.multiplier();
    (0..count)
        .map(|i| normalize_angle(start_angle + i as f64 * step * multiplier))
        .collect()
}

/// Positions of `count` points evenly spaced on a circle
pub fn segment_positions(
    center: Point,
    radius: f64,
    count: u32,
    start_angle: f64,
    direction: Direction,
) -> Vec<Point> {
    segment_angles(count, start_angle, direction)
        .into_iter()
        .map(|angle| polar_to_cartesian(center, PolarCoord::new(radius, angle)))
        .collect()
}

/// Lines from `inner_radius` to `outer_radius` at each segment angle
pub fn segment_lines(
    center: Point,
    inner_radius: f64,
    outer_radius: f64,
    count: u32,
    start_angle: f64,
    direction: Direction,
) -> Vec<LineSegment> {
    segment_angles(count, start_angle, direction)
        .into_iter()
        .map(|angle| LineSegment {
            from: polar_to_cartesian(center, PolarCoord::new(inner_radius, angle)),
            to: polar_to_cartesian(center, PolarCoord::new(outer_radius, angle)),
            angle,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::polar::distance;

    #[test]
    fn test_four_segments_clockwise_from_top() {
        let c = Point::new(0.0, 0.0);
        let angles = segment_angles(4, -90.0, Direction::Clockwise);
        assert_eq!(angles, vec![270.0, 0.0, 90.0, 180.0]);

        let points = segment_positions(c, 10.0, 4, -90.0, Direction::Clockwise);
        assert!((points[0].y + 10.0).abs() < 1e-9, "first point at top");
        assert!((points[1].x - 10.0).abs() < 1e-9, "second point on the right");
    }

    #[test]
    fn test_counter_clockwise_reverses_order() {
        let angles = segment_angles(4, 0.0, Direction::CounterClockwise);
        assert_eq!(angles, vec![0.0, 270.0, 180.0, 90.0]);
    }

    #[test]
    fn test_single_segment() {
        let points = segment_positions(Point::new(5.0, 5.0), 3.0, 1, 0.0, Direction::Clockwise);
        assert_eq!(points.len(), 1);
        assert!((points[0].x - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_count_is_empty() {
        assert!(segment_angles(0, 0.0, Direction::Clockwise).is_empty());
    }

    #[test]
    fn test_segment_lines_span_radii() {
        let c = Point::new(50.0, 50.0);
        let lines = segment_lines(c, 20.0, 40.0, 12, -90.0, Direction::Clockwise);
        assert_eq!(lines.len(), 12);
        for line in &lines {
            assert!((distance(c, line.from) - 20.0).abs() < 1e-9);
            assert!((distance(c, line.to) - 40.0).abs() < 1e-9);
        }
        assert_eq!(lines[3].angle, 0.0);
    }
}
