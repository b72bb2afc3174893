//! Configuration for the layout engine

use super::collision::MAX_ITERATIONS;
use super::types::Size;
use super::venn::DEFAULT_OFFSET_RATIO;

/// Tunables for assembling a vector description
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Font size for labels that do not set their own
    pub label_font_size: f64,

    /// Estimated glyph advance as a fraction of the font size
    pub char_width_ratio: f64,

    /// Estimated line height as a fraction of the font size
    pub line_height_ratio: f64,

    /// Distance overlapping labels are pushed apart per pass
    pub collision_min_distance: f64,

    /// Cap on collision resolution passes
    pub collision_max_iterations: usize,

    /// Venn circle center offset as a fraction of the radius
    pub venn_offset_ratio: f64,

    /// Clock hand lengths as fractions of the face radius (hour, minute, second)
    pub hand_length_ratios: (f64, f64, f64),

    /// Clock tick lengths (hour, minute)
    pub tick_lengths: (f64, f64),

    /// Samples used to draw a spiral path
    pub spiral_path_samples: usize,

    /// Radius of point markers on segments and spiral items
    pub marker_radius: f64,

    /// Stroke width for outlines and lines
    pub stroke_width: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            label_font_size: 16.0,
            char_width_ratio: 0.6,
            line_height_ratio: 1.2,
            collision_min_distance: 10.0,
            collision_max_iterations: MAX_ITERATIONS,
            venn_offset_ratio: DEFAULT_OFFSET_RATIO,
            hand_length_ratios: (0.5, 0.75, 0.9),
            tick_lengths: (20.0, 10.0),
            spiral_path_samples: 240,
            marker_radius: 6.0,
            stroke_width: 2.0,
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default label font size
    pub fn with_label_font_size(mut self, size: f64) -> Self {
        self.label_font_size = size;
        self
    }

    /// Set the collision push distance and pass cap
    pub fn with_collision(mut self, min_distance: f64, max_iterations: usize) -> Self {
        self.collision_min_distance = min_distance;
        self.collision_max_iterations = max_iterations;
        self
    }

    /// Set the Venn center offset ratio
    pub fn with_venn_offset_ratio(mut self, ratio: f64) -> Self {
        self.venn_offset_ratio = ratio;
        self
    }

    /// Set the clock hand length ratios
    pub fn with_hand_lengths(mut self, hour: f64, minute: f64, second: f64) -> Self {
        self.hand_length_ratios = (hour, minute, second);
        self
    }

    /// Set the number of samples for spiral paths
    pub fn with_spiral_path_samples(mut self, samples: usize) -> Self {
        self.spiral_path_samples = samples;
        self
    }

    /// Estimated extent of a single-line label
    pub fn label_size(&self, text: &str, font_size: f64) -> Size {
        Size::new(
            text.chars().count() as f64 * font_size * self.char_width_ratio,
            font_size * self.line_height_ratio,
        )
    }
}
