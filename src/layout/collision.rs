//! Iterative pairwise separation of overlapping label boxes.
//!
//! This is a soft layout aid: when the iteration cap is hit the best current
//! positions are returned together with the number of pairs that still
//! overlap, and the caller decides whether that matters.

use crate::log::{debug, warn};

use super::polar::boxes_overlap;
use super::types::{BoundingBox, Point, Size};

/// Default cap on full passes over all pairs
pub const MAX_ITERATIONS: usize = 100;

/// Result of a collision resolution run
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionOutcome {
    /// Adjusted positions, same order as the input
    pub positions: Vec<Point>,
    /// Number of passes that moved at least one pair
    pub iterations: usize,
    /// Pairs still overlapping after the last pass
    pub residual_overlaps: usize,
}

impl CollisionOutcome {
    /// True when no pair of boxes overlaps anymore
    pub fn converged(&self) -> bool {
        self.residual_overlaps == 0
    }
}

fn boxes_for(positions: &[Point], sizes: &[Size]) -> Vec<BoundingBox> {
    positions
        .iter()
        .zip(sizes)
        .map(|(p, s)| BoundingBox::centered(*p, *s))
        .collect()
}

/// Count unordered overlapping pairs among boxes centered on `positions`
pub fn count_overlaps(positions: &[Point], sizes: &[Size]) -> usize {
    let boxes = boxes_for(positions, sizes);
    let mut count = 0;
    for i in 0..boxes.len() {
        for j in (i + 1)..boxes.len() {
            if boxes_overlap(&boxes[i], &boxes[j]) {
                count += 1;
            }
        }
    }
    count
}

/// Push overlapping labels apart.
///
/// Each pass visits every unordered pair whose boxes overlap and moves both
/// labels `min_distance / 2` away from each other along the line between
/// their centers; coincident centers separate along +x. Boxes are rebuilt
/// after every move. Stops after the first pass without overlap or after
/// `max_iterations` passes. Positions without a matching size never move.
pub fn resolve_collisions(
    mut positions: Vec<Point>,
    sizes: &[Size],
    min_distance: f64,
    max_iterations: usize,
) -> CollisionOutcome {
    let n = positions.len().min(sizes.len());
    let half_step = min_distance / 2.0;
    let mut iterations = 0;

    while iterations < max_iterations {
        let mut moved = false;
        for i in 0..n {
            for j in (i + 1)..n {
                let a = BoundingBox::centered(positions[i], sizes[i]);
                let b = BoundingBox::centered(positions[j], sizes[j]);
                if !boxes_overlap(&a, &b) {
                    continue;
                }

                let dx = positions[j].x - positions[i].x;
                let dy = positions[j].y - positions[i].y;
                let len = dx.hypot(dy);
                let (ux, uy) = if len > f64::EPSILON {
                    (dx / len, dy / len)
                } else {
                    (1.0, 0.0)
                };

                positions[i] = positions[i].offset(-ux * half_step, -uy * half_step);
                positions[j] = positions[j].offset(ux * half_step, uy * half_step);
                moved = true;
            }
        }
        if !moved {
            break;
        }
        iterations += 1;
    }

    let residual_overlaps = count_overlaps(&positions[..n], &sizes[..n]);
    if residual_overlaps > 0 {
        warn!(
            residual_overlaps,
            iterations, "label collision resolution hit the iteration cap"
        );
    } else {
        debug!(iterations, labels = n, "label collisions resolved");
    }

    CollisionOutcome {
        positions,
        iterations,
        residual_overlaps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::polar::distance;

    #[test]
    fn test_coincident_boxes_separate() {
        let size = Size::new(30.0, 14.0);
        let outcome = resolve_collisions(
            vec![Point::new(100.0, 100.0), Point::new(100.0, 100.0)],
            &[size, size],
            10.0,
            MAX_ITERATIONS,
        );

        assert!(outcome.converged());
        assert!(outcome.iterations <= MAX_ITERATIONS);
        let [a, b] = [outcome.positions[0], outcome.positions[1]];
        assert!(distance(a, b) >= 10.0);
        assert!(!boxes_overlap(
            &BoundingBox::centered(a, size),
            &BoundingBox::centered(b, size)
        ));
        // symmetric push along x
        assert_eq!(a.y, 100.0);
        assert_eq!(b.y, 100.0);
        assert_eq!(a.x + b.x, 200.0);
    }

    #[test]
    fn test_separated_boxes_do_not_move() {
        let size = Size::new(10.0, 10.0);
        let input = vec![Point::new(0.0, 0.0), Point::new(50.0, 0.0)];
        let outcome = resolve_collisions(input.clone(), &[size, size], 10.0, MAX_ITERATIONS);
        assert_eq!(outcome.positions, input);
        assert_eq!(outcome.iterations, 0);
        assert!(outcome.converged());
    }

    #[test]
    fn test_push_direction_follows_centers() {
        let size = Size::new(10.0, 10.0);
        let outcome = resolve_collisions(
            vec![Point::new(0.0, 0.0), Point::new(0.0, 4.0)],
            &[size, size],
            6.0,
            MAX_ITERATIONS,
        );
        assert_eq!(outcome.positions[0], Point::new(0.0, -3.0));
        assert_eq!(outcome.positions[1], Point::new(0.0, 7.0));
        assert_eq!(outcome.iterations, 1);
    }

    #[test]
    fn test_iteration_cap_reports_residual_overlap() {
        let size = Size::new(1000.0, 1000.0);
        let outcome = resolve_collisions(
            vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)],
            &[size, size],
            0.5,
            3,
        );
        assert_eq!(outcome.iterations, 3);
        assert_eq!(outcome.residual_overlaps, 1);
        assert!(!outcome.converged());
    }

    #[test]
    fn test_count_overlaps() {
        let size = Size::new(10.0, 10.0);
        let points = [
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.0),
            Point::new(100.0, 0.0),
        ];
        assert_eq!(count_overlaps(&points, &[size, size, size]), 1);
    }
}
