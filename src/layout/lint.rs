//! Lint checks for assembled scenes.
//!
//! Runs after assembly to report residual defects: label boxes that still
//! overlap after collision resolution, and geometry placed off the canvas.
//! Warnings never fail a render.

use std::fmt;

use super::config::LayoutConfig;
use super::types::{BoundingBox, Group, Point, Primitive, TextAnchor, TextPrimitive, VectorScene};

/// A lint warning about a scene defect
#[derive(Debug, Clone, PartialEq)]
pub struct LintWarning {
    pub category: LintCategory,
    pub message: String,
}

/// Category of lint defect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintCategory {
    Overlap,
    Bounds,
}

impl fmt::Display for LintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintCategory::Overlap => write!(f, "overlap"),
            LintCategory::Bounds => write!(f, "bounds"),
        }
    }
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.category, self.message)
    }
}

/// Run all lint checks on an assembled scene.
pub fn check(scene: &VectorScene, config: &LayoutConfig) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    for group in &scene.groups {
        check_label_overlaps(group, config, &mut warnings);
    }
    let canvas = scene.canvas();
    for group in &scene.groups {
        check_bounds(group, &canvas, &mut warnings);
    }
    warnings
}

// ── Label overlap ────────────────────────────────────────────────

/// Estimated box of a rendered text primitive.
///
/// The baseline sits at `position.y + dy`; a `dy` of 0.35em centers the glyphs
/// on the anchor point.
pub fn estimate_text_bbox(text: &TextPrimitive, config: &LayoutConfig) -> BoundingBox {
    let font_size = text.style.font_size.unwrap_or(config.label_font_size);
    let size = config.label_size(&text.content, font_size);

    let x = match text.anchor {
        TextAnchor::Start => text.position.x,
        TextAnchor::Middle => text.position.x - size.width / 2.0,
        TextAnchor::End => text.position.x - size.width,
    };
    let center_y = text.position.y + (text.dy.0 - 0.35) * font_size;
    let bounds = BoundingBox::new(x, center_y - size.height / 2.0, size.width, size.height);

    match &text.rotation {
        Some(rotation) => rotation.transform_bounds(&bounds),
        None => bounds,
    }
}

fn check_label_overlaps(group: &Group, config: &LayoutConfig, warnings: &mut Vec<LintWarning>) {
    let boxes: Vec<(&TextPrimitive, BoundingBox)> = group
        .texts()
        .map(|text| (text, estimate_text_bbox(text, config)))
        .collect();

    for i in 0..boxes.len() {
        for j in (i + 1)..boxes.len() {
            let (a, box_a) = &boxes[i];
            let (b, box_b) = &boxes[j];
            if box_a.intersects(box_b) {
                let overlap_w = box_a.right().min(box_b.right()) - box_a.x.max(box_b.x);
                let overlap_h = box_a.bottom().min(box_b.bottom()) - box_a.y.max(box_b.y);
                warnings.push(LintWarning {
                    category: LintCategory::Overlap,
                    message: format!(
                        "labels \"{}\" and \"{}\" in group \"{}\" overlap by {:.0}x{:.0}px",
                        a.content, b.content, group.label, overlap_w, overlap_h
                    ),
                });
            }
        }
    }

    for child in &group.children {
        if let Primitive::Group(nested) = child {
            check_label_overlaps(nested, config, warnings);
        }
    }
}

// ── Canvas bounds ────────────────────────────────────────────────

/// Points a primitive is positioned by
fn anchor_points(primitive: &Primitive) -> Vec<Point> {
    match primitive {
        Primitive::Circle { center, .. } => vec![*center],
        Primitive::Line { from, to, .. } => vec![*from, *to],
        Primitive::Polyline { points, .. } => points.clone(),
        Primitive::Rect { bounds, .. } => vec![
            Point::new(bounds.x, bounds.y),
            Point::new(bounds.right(), bounds.bottom()),
        ],
        Primitive::Text(text) => vec![text.position],
        Primitive::Group(_) => vec![],
    }
}

fn primitive_name(primitive: &Primitive) -> String {
    match primitive {
        Primitive::Circle { id, .. }
        | Primitive::Line { id, .. }
        | Primitive::Polyline { id, .. }
        | Primitive::Rect { id, .. } => match id {
            Some(id) => format!("\"{}\"", id),
            None => "<anon>".to_string(),
        },
        Primitive::Text(text) => format!("text \"{}\"", text.content),
        Primitive::Group(group) => format!("group \"{}\"", group.label),
    }
}

fn check_bounds(group: &Group, canvas: &BoundingBox, warnings: &mut Vec<LintWarning>) {
    for child in &group.children {
        if let Primitive::Group(nested) = child {
            check_bounds(nested, canvas, warnings);
            continue;
        }
        if let Some(outside) = anchor_points(child)
            .into_iter()
            .find(|p| !canvas.contains(*p))
        {
            warnings.push(LintWarning {
                category: LintCategory::Bounds,
                message: format!(
                    "{} in group \"{}\" is off the canvas at ({}, {})",
                    primitive_name(child),
                    group.label,
                    outside.x,
                    outside.y
                ),
            });
        }
    }
}
