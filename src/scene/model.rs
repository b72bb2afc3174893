//! Typed, fully defaulted scene specification consumed by the assembler

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::layout::clock::ClockTime;
use crate::layout::labels::LabelValues;
use crate::layout::mandala::MandalaLayer;
use crate::layout::segments::Direction;
use crate::layout::spiral::{SpiralKind, SpiralParams};
use crate::layout::types::{Point, SceneType};

/// Output canvas size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Canvas {
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Placement geometry shared by every scene type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub center: Point,
    pub radius: f64,
    pub width: f64,
    pub height: f64,
}

/// Evenly spaced segments around the main circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segments {
    pub count: u32,
    pub start_angle: f64,
    pub direction: Direction,
}

/// Which side of the ring labels sit on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelPlacement {
    #[default]
    Outside,
    Inside,
    On,
}

impl LabelPlacement {
    /// Radius of the label ring for a circle of `radius`
    pub fn label_radius(&self, radius: f64, offset: f64) -> f64 {
        match self {
            LabelPlacement::Outside => radius + offset,
            LabelPlacement::Inside => (radius - offset).max(0.0),
            LabelPlacement::On => radius,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelSpec {
    pub values: LabelValues,
    pub placement: LabelPlacement,
    pub offset_radius: f64,
    pub font_size: f64,
    /// Turn each label tangent to the ring
    pub rotate: bool,
}

/// Optional per-primitive color overrides; values are palette tokens or literal colors
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ItemStyle {
    pub fill: Option<String>,
    pub stroke: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HandStyle {
    pub color: Option<String>,
    pub width: Option<f64>,
    /// Length as a fraction of the face radius
    pub length: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HandStyles {
    pub hour: HandStyle,
    pub minute: HandStyle,
    pub second: HandStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClockSpec {
    pub time: ClockTime,
    pub hands: HandStyles,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VennSpec {
    pub sets: [String; 3],
    /// Comma-joined set names to region label, e.g. `"A,B" → "both"`
    pub overlaps: BTreeMap<String, String>,
    pub set_colors: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridItem {
    pub label: String,
    pub style: ItemStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridSpec {
    pub rows: u32,
    pub cols: u32,
    pub cell_width: f64,
    pub cell_height: f64,
    pub spacing: f64,
    pub items: Vec<GridItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpiralItem {
    pub label: String,
    pub rotation: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpiralSpec {
    pub kind: SpiralKind,
    pub count: u32,
    pub a: f64,
    pub b: f64,
    pub start_angle: f64,
    pub turns: f64,
    pub items: Vec<SpiralItem>,
}

impl SpiralSpec {
    pub fn params(&self) -> SpiralParams {
        SpiralParams {
            kind: self.kind,
            a: self.a,
            b: self.b,
            start_angle: self.start_angle,
            turns: self.turns,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MandalaSpec {
    pub axes: u32,
    pub start_angle: f64,
    pub layers: Vec<MandalaLayer>,
}

/// Type-specific payload
#[derive(Debug, Clone, PartialEq)]
pub enum SceneKind {
    Circle,
    Clock(ClockSpec),
    Venn(VennSpec),
    Grid(GridSpec),
    Spiral(SpiralSpec),
    Mandala(MandalaSpec),
}

/// A validated scene with every default applied
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub canvas: Canvas,
    pub geometry: Geometry,
    pub segments: Option<Segments>,
    pub labels: Option<LabelSpec>,
    pub kind: SceneKind,
}

impl Scene {
    pub fn scene_type(&self) -> SceneType {
        match self.kind {
            SceneKind::Circle => SceneType::Circle,
            SceneKind::Clock(_) => SceneType::Clock,
            SceneKind::Venn(_) => SceneType::Venn,
            SceneKind::Grid(_) => SceneType::Grid,
            SceneKind::Spiral(_) => SceneType::Spiral,
            SceneKind::Mandala(_) => SceneType::Mandala,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_radius_by_placement() {
        assert_eq!(LabelPlacement::Outside.label_radius(100.0, 30.0), 130.0);
        assert_eq!(LabelPlacement::Inside.label_radius(100.0, 30.0), 70.0);
        assert_eq!(LabelPlacement::Inside.label_radius(10.0, 30.0), 0.0);
        assert_eq!(LabelPlacement::On.label_radius(100.0, 30.0), 100.0);
    }

    #[test]
    fn test_canvas_center() {
        let canvas = Canvas {
            width: 800.0,
            height: 600.0,
        };
        assert_eq!(canvas.center(), Point::new(400.0, 300.0));
    }
}
