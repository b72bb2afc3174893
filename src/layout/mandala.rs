//! Concentric layers of radially repeated elements

use super::labels::{generate_labels, LabelValues};
use super::polar::{normalize_angle, polar_to_cartesian};
use super::segments::{segment_lines, Direction, LineSegment};
use super::types::{Point, PolarCoord};

/// One ring of a mandala
#[derive(Debug, Clone, PartialEq)]
pub struct MandalaLayer {
    /// Ring radius
    pub radius: f64,
    /// Element marker size (diameter)
    pub size: f64,
    /// Number of elements; falls back to the axis count
    pub count: Option<u32>,
    /// Fixed label repeated on every element
    pub label: Option<String>,
    /// Generated labels, used when no fixed label is set
    pub labels: Option<LabelValues>,
    /// Rotate elements to face outward
    pub rotation: bool,
    /// Extra rotation in degrees on top of the outward orientation
    pub offset_rotate: f64,
}

impl MandalaLayer {
    pub fn new(radius: f64, size: f64) -> Self {
        Self {
            radius,
            size,
            count: None,
            label: None,
            labels: None,
            rotation: false,
            offset_rotate: 0.0,
        }
    }

    /// Element count for a mandala with `axes` spokes
    pub fn element_count(&self, axes: u32) -> u32 {
        self.count.unwrap_or(axes)
    }
}

/// A placed element of a layer
#[derive(Debug, Clone, PartialEq)]
pub struct MandalaElement {
    pub position: Point,
    pub angle: f64,
    pub rotation: Option<f64>,
    pub label: Option<String>,
}

/// Place the elements of one layer.
///
/// Elements are spread evenly from `start_angle`, clockwise. With rotation
/// enabled each element is turned to `angle + 90 + offset_rotate`.
pub fn layer_elements(
    center: Point,
    layer: &MandalaLayer,
    axes: u32,
    start_angle: f64,
) -> Vec<MandalaElement> {
    let count = layer.element_count(axes);
    if count == 0 {
        return vec![];
    }

    let labels: Vec<Option<String>> = match (&layer.label, &layer.labels) {
        (Some(fixed), _) => vec![Some(fixed.clone()); count as usize],
        (None, Some(values)) => generate_labels(values, count as usize)
            .into_iter()
            .map(Some)
            .collect(),
        (None, None) => vec![None; count as usize],
    };

    let step = 360.0 / count as f64;
    labels
        .into_iter()
        .enumerate()
        .map(|(i, label)| {
            let angle = normalize_angle(start_angle + i as f64 * step);
            MandalaElement {
                position: polar_to_cartesian(center, PolarCoord::new(layer.radius, angle)),
                angle,
                rotation: layer
                    .rotation
                    .then(|| normalize_angle(angle + 90.0 + layer.offset_rotate)),
                label,
            }
        })
        .collect()
}

/// The `axes` spokes from the center out to `radius`
pub fn axis_lines(center: Point, radius: f64, axes: u32, start_angle: f64) -> Vec<LineSegment> {
    segment_lines(center, 0.0, radius, axes, start_angle, Direction::Clockwise)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::polar::distance;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_count_defaults_to_axes() {
        let layer = MandalaLayer::new(100.0, 10.0);
        let elements = layer_elements(Point::new(0.0, 0.0), &layer, 8, 0.0);
        assert_eq!(elements.len(), 8);
        let angles: Vec<f64> = elements.iter().map(|e| e.angle).collect();
        assert_eq!(
            angles,
            vec![0.0, 45.0, 90.0, 135.0, 180.0, 225.0, 270.0, 315.0]
        );
        for e in &elements {
            assert!((distance(Point::new(0.0, 0.0), e.position) - 100.0).abs() < 1e-9);
            assert_eq!(e.rotation, None);
            assert_eq!(e.label, None);
        }
    }

    #[test]
    fn test_explicit_count_and_rotation() {
        let layer = MandalaLayer {
            count: Some(4),
            rotation: true,
            offset_rotate: 10.0,
            ..MandalaLayer::new(50.0, 5.0)
        };
        let elements = layer_elements(Point::new(0.0, 0.0), &layer, 12, -90.0);
        let rotations: Vec<Option<f64>> = elements.iter().map(|e| e.rotation).collect();
        assert_eq!(
            rotations,
            vec![Some(10.0), Some(100.0), Some(190.0), Some(280.0)]
        );
    }

    #[test]
    fn test_fixed_label_beats_generated() {
        let layer = MandalaLayer {
            count: Some(3),
            label: Some("*".to_string()),
            labels: Some(LabelValues::Numeric),
            ..MandalaLayer::new(50.0, 5.0)
        };
        let labels: Vec<Option<String>> = layer_elements(Point::new(0.0, 0.0), &layer, 6, 0.0)
            .into_iter()
            .map(|e| e.label)
            .collect();
        assert_eq!(labels, vec![Some("*".to_string()); 3]);
    }

    #[test]
    fn test_generated_labels_follow_count() {
        let layer = MandalaLayer {
            labels: Some(LabelValues::Roman),
            ..MandalaLayer::new(50.0, 5.0)
        };
        let labels: Vec<String> = layer_elements(Point::new(0.0, 0.0), &layer, 4, 0.0)
            .into_iter()
            .filter_map(|e| e.label)
            .collect();
        assert_eq!(labels, vec!["I", "II", "III", "IV"]);
    }

    #[test]
    fn test_axis_lines_start_at_center() {
        let lines = axis_lines(Point::new(10.0, 10.0), 100.0, 6, 0.0);
        assert_eq!(lines.len(), 6);
        for line in &lines {
            assert_eq!(line.from, Point::new(10.0, 10.0));
            assert!((distance(line.from, line.to) - 100.0).abs() < 1e-9);
        }
    }
}
