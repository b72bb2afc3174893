//! Default values applied when a scene document leaves a field out

use crate::layout::segments::Direction;
use crate::layout::spiral::SpiralKind;

/// Documented defaults for every optional scene field
#[derive(Debug, Clone)]
pub struct SceneDefaults {
    /// Canvas size (width, height)
    pub canvas_size: (f64, f64),

    /// Default radius as a fraction of the smaller canvas side
    pub radius_ratio: f64,

    /// Default width and height as a fraction of the canvas
    pub extent_ratio: f64,

    /// Start angle for segments and mandala axes; -90 is twelve o'clock
    pub start_angle: f64,

    pub direction: Direction,

    /// Segment count for circle scenes without a `segments` block
    pub circle_segments: u32,

    /// Distance between the ring and its labels
    pub label_offset: f64,

    pub label_font_size: f64,

    /// Gap between grid cells
    pub grid_spacing: f64,

    pub spiral_kind: SpiralKind,
    pub spiral_turns: f64,
    pub spiral_a: f64,
    /// Growth rate for logarithmic spirals; archimedean spirals default to
    /// filling the geometry radius
    pub spiral_log_b: f64,

    /// Marker diameter for mandala layers that do not set a size
    pub mandala_element_size: f64,
}

impl Default for SceneDefaults {
    fn default() -> Self {
        Self {
            canvas_size: (1024.0, 1024.0),
            radius_ratio: 0.4,
            extent_ratio: 0.8,
            start_angle: -90.0,
            direction: Direction::Clockwise,
            circle_segments: 12,
            label_offset: 30.0,
            label_font_size: 16.0,
            grid_spacing: 10.0,
            spiral_kind: SpiralKind::Logarithmic,
            spiral_turns: 2.0,
            spiral_a: 0.0,
            spiral_log_b: 0.35,
            mandala_element_size: 16.0,
        }
    }
}

impl SceneDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the canvas size
    pub fn with_canvas_size(mut self, width: f64, height: f64) -> Self {
        self.canvas_size = (width, height);
        self
    }

    /// Set the start angle for segments and mandala axes
    pub fn with_start_angle(mut self, angle: f64) -> Self {
        self.start_angle = angle;
        self
    }

    /// Set the label ring offset
    pub fn with_label_offset(mut self, offset: f64) -> Self {
        self.label_offset = offset;
        self
    }

    /// Default radius for a canvas
    pub fn radius_for(&self, width: f64, height: f64) -> f64 {
        width.min(height) * self.radius_ratio
    }

    /// Default width and height for a canvas
    pub fn extent_for(&self, width: f64, height: f64) -> (f64, f64) {
        (width * self.extent_ratio, height * self.extent_ratio)
    }

    /// Archimedean growth rate that reaches `radius` after `turns` full turns
    pub fn archimedean_b(&self, radius: f64, turns: f64) -> f64 {
        if turns <= 0.0 {
            return 0.0;
        }
        radius / (turns * std::f64::consts::TAU)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_geometry_ratios() {
        let defaults = SceneDefaults::default();
        assert_eq!(defaults.radius_for(1024.0, 1024.0), 409.6);
        assert_eq!(defaults.radius_for(800.0, 500.0), 200.0);
        assert_eq!(defaults.extent_for(1000.0, 500.0), (800.0, 400.0));
    }

    #[test]
    fn test_builder_pattern() {
        let defaults = SceneDefaults::new()
            .with_canvas_size(640.0, 480.0)
            .with_start_angle(0.0)
            .with_label_offset(12.0);
        assert_eq!(defaults.canvas_size, (640.0, 480.0));
        assert_eq!(defaults.start_angle, 0.0);
        assert_eq!(defaults.label_offset, 12.0);
    }

    #[test]
    fn test_archimedean_b_fills_radius() {
        let defaults = SceneDefaults::default();
        let b = defaults.archimedean_b(400.0, 2.0);
        assert!((b * 2.0 * std::f64::consts::TAU - 400.0).abs() < 1e-9);
        assert_eq!(defaults.archimedean_b(400.0, 0.0), 0.0);
    }
}
