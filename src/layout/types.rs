//! Core types for the layout engine and the vector description it produces

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use super::transform::Rotation;

/// Round to the two decimal places used by the vector description.
///
/// Negative zero is folded into positive zero so that serialized output is stable.
pub fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// A 2D point in canvas space (origin top-left, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate by a vector
    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    /// Copy of this point with both coordinates rounded to two decimals
    pub fn rounded(&self) -> Point {
        Point::new(round2(self.x), round2(self.y))
    }
}

/// Polar coordinate: angle in degrees, 0° pointing right, clockwise on screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PolarCoord {
    pub radius: f64,
    pub angle: f64,
}

impl PolarCoord {
    pub fn new(radius: f64, angle: f64) -> Self {
        Self { radius, angle }
    }
}

/// Width and height of a label or item
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle, `(x, y)` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Box of the given size centered on a point
    pub fn centered(center: Point, size: Size) -> Self {
        Self::new(
            center.x - size.width / 2.0,
            center.y - size.height / 2.0,
            size.width,
            size.height,
        )
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center point of the bounding box
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// Check if this bounding box contains a point (edges inclusive)
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }

    /// Check if this bounding box overlaps another; shared edges do not count
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Smallest box containing both
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        BoundingBox::new(x, y, right - x, bottom - y)
    }

    /// Smallest box containing all points, `None` for an empty slice
    pub fn from_points(points: &[Point]) -> Option<BoundingBox> {
        let first = points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(BoundingBox::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }

    fn rounded(&self) -> BoundingBox {
        BoundingBox::new(
            round2(self.x),
            round2(self.y),
            round2(self.width),
            round2(self.height),
        )
    }
}

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

/// Vertical baseline shift in `em` units, serialized as e.g. `"-0.3em"`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Em(pub f64);

impl fmt::Display for Em {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}em", self.0)
    }
}

impl Serialize for Em {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Resolved presentation attributes of a primitive
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Style {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
}

impl Style {
    /// Outline-only stroke
    pub fn stroked(color: impl Into<String>, width: f64) -> Self {
        Self {
            fill: Some("none".to_string()),
            stroke: Some(color.into()),
            stroke_width: Some(width),
            ..Self::default()
        }
    }

    /// Solid fill without outline
    pub fn filled(color: impl Into<String>) -> Self {
        Self {
            fill: Some(color.into()),
            ..Self::default()
        }
    }

    /// Text fill and size
    pub fn text(color: impl Into<String>, font_size: f64) -> Self {
        Self {
            fill: Some(color.into()),
            font_size: Some(font_size),
            ..Self::default()
        }
    }

    /// Set the opacity
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Merge another style set, with other taking precedence
    pub fn merge(&self, other: &Style) -> Style {
        Style {
            fill: other.fill.clone().or_else(|| self.fill.clone()),
            stroke: other.stroke.clone().or_else(|| self.stroke.clone()),
            stroke_width: other.stroke_width.or(self.stroke_width),
            opacity: other.opacity.or(self.opacity),
            font_size: other.font_size.or(self.font_size),
        }
    }
}

/// A text label placed at a point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextPrimitive {
    pub content: String,
    pub position: Point,
    pub anchor: TextAnchor,
    pub dy: Em,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<Rotation>,
    pub style: Style,
}

/// A named group of primitives, addressed by its semantic layer label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub label: String,
    pub children: Vec<Primitive>,
}

impl Group {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: vec![],
        }
    }

    /// Append a primitive
    pub fn push(&mut self, primitive: Primitive) {
        self.children.push(primitive);
    }

    /// Text primitives directly inside this group
    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.children.iter().filter_map(|child| match child {
            Primitive::Text(text) => Some(text),
            _ => None,
        })
    }

    /// Find a nested group by label (depth-first, including self)
    pub fn find(&self, label: &str) -> Option<&Group> {
        if self.label == label {
            return Some(self);
        }
        self.children.iter().find_map(|child| match child {
            Primitive::Group(group) => group.find(label),
            _ => None,
        })
    }
}

/// A drawing primitive in the vector description
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Circle {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        center: Point,
        radius: f64,
        style: Style,
    },
    Line {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        from: Point,
        to: Point,
        style: Style,
    },
    Polyline {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        points: Vec<Point>,
        closed: bool,
        style: Style,
    },
    Rect {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        bounds: BoundingBox,
        style: Style,
    },
    Text(TextPrimitive),
    Group(Group),
}

// Constructors round every coordinate to the output precision.
impl Primitive {
    pub fn circle(id: Option<String>, center: Point, radius: f64, style: Style) -> Self {
        Primitive::Circle {
            id,
            center: center.rounded(),
            radius: round2(radius),
            style,
        }
    }

    pub fn line(id: Option<String>, from: Point, to: Point, style: Style) -> Self {
        Primitive::Line {
            id,
            from: from.rounded(),
            to: to.rounded(),
            style,
        }
    }

    pub fn polyline(id: Option<String>, points: &[Point], closed: bool, style: Style) -> Self {
        Primitive::Polyline {
            id,
            points: points.iter().map(Point::rounded).collect(),
            closed,
            style,
        }
    }

    pub fn rect(id: Option<String>, bounds: BoundingBox, style: Style) -> Self {
        Primitive::Rect {
            id,
            bounds: bounds.rounded(),
            style,
        }
    }

    pub fn text(
        content: impl Into<String>,
        position: Point,
        anchor: TextAnchor,
        dy: Em,
        rotation: Option<Rotation>,
        style: Style,
    ) -> Self {
        Primitive::Text(TextPrimitive {
            content: content.into(),
            position: position.rounded(),
            anchor,
            dy,
            rotation: rotation.map(|r| r.rounded()),
            style,
        })
    }
}

/// The scene kinds the assembler produces descriptions for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneType {
    Circle,
    Clock,
    Venn,
    Grid,
    Spiral,
    Mandala,
}

impl fmt::Display for SceneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SceneType::Circle => "circle",
            SceneType::Clock => "clock",
            SceneType::Venn => "venn",
            SceneType::Grid => "grid",
            SceneType::Spiral => "spiral",
            SceneType::Mandala => "mandala",
        };
        f.write_str(name)
    }
}

/// The complete vector description of one scene
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VectorScene {
    pub scene_type: SceneType,
    pub width: f64,
    pub height: f64,
    pub groups: Vec<Group>,
}

impl VectorScene {
    pub fn new(scene_type: SceneType, width: f64, height: f64) -> Self {
        Self {
            scene_type,
            width,
            height,
            groups: vec![],
        }
    }

    /// Find a group anywhere in the tree by its layer label
    pub fn group(&self, label: &str) -> Option<&Group> {
        self.groups.iter().find_map(|group| group.find(label))
    }

    /// Labels of the top-level groups in drawing order
    pub fn layer_labels(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.label.as_str()).collect()
    }

    /// The canvas rectangle
    pub fn canvas(&self) -> BoundingBox {
        BoundingBox::new(0.0, 0.0, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.23456), 1.23);
        assert_eq!(round2(1.235001), 1.24);
        assert_eq!(round2(-0.001), 0.0);
        assert!(round2(-0.001).is_sign_positive());
    }

    #[test]
    fn test_bounding_box_edges() {
        let bb = BoundingBox::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(bb.right(), 110.0);
        assert_eq!(bb.bottom(), 70.0);
    }

    #[test]
    fn test_bounding_box_centered() {
        let bb = BoundingBox::centered(Point::new(50.0, 50.0), Size::new(20.0, 10.0));
        assert_eq!(bb, BoundingBox::new(40.0, 45.0, 20.0, 10.0));
        assert_eq!(bb.center(), Point::new(50.0, 50.0));
    }

    #[test]
    fn test_bounding_box_intersects() {
        let a = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
        let b = BoundingBox::new(50.0, 50.0, 100.0, 100.0);
        let c = BoundingBox::new(200.0, 200.0, 50.0, 50.0);
        let touching = BoundingBox::new(100.0, 0.0, 50.0, 50.0);

        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
        assert!(!a.intersects(&touching));
    }

    #[test]
    fn test_bounding_box_from_points() {
        let bb = BoundingBox::from_points(&[
            Point::new(3.0, 4.0),
            Point::new(-1.0, 10.0),
            Point::new(5.0, 0.0),
        ])
        .unwrap();
        assert_eq!(bb, BoundingBox::new(-1.0, 0.0, 6.0, 10.0));
        assert!(BoundingBox::from_points(&[]).is_none());
    }

    #[test]
    fn test_style_merge() {
        let base = Style::stroked("#333333", 2.0);
        let over = Style {
            stroke: Some("red".to_string()),
            ..Style::default()
        };
        let merged = base.merge(&over);
        assert_eq!(merged.stroke.as_deref(), Some("red"));
        assert_eq!(merged.stroke_width, Some(2.0));
        assert_eq!(merged.fill.as_deref(), Some("none"));
    }

    #[test]
    fn test_em_display() {
        assert_eq!(Em(-0.3).to_string(), "-0.3em");
        assert_eq!(Em(0.35).to_string(), "0.35em");
    }

    #[test]
    fn test_primitive_constructors_round() {
        let prim = Primitive::circle(None, Point::new(1.005_1, 2.333_3), 9.876_5, Style::default());
        match prim {
            Primitive::Circle { center, radius, .. } => {
                assert_eq!(center, Point::new(1.01, 2.33));
                assert_eq!(radius, 9.88);
            }
            other => panic!("unexpected primitive {other:?}"),
        }
    }

    #[test]
    fn test_group_find_nested() {
        let mut outer = Group::new("outer");
        let mut inner = Group::new("inner");
        inner.push(Primitive::text(
            "A",
            Point::new(0.0, 0.0),
            TextAnchor::Middle,
            Em(0.35),
            None,
            Style::default(),
        ));
        outer.push(Primitive::Group(inner));

        let mut scene = VectorScene::new(SceneType::Circle, 100.0, 100.0);
        scene.groups.push(outer);

        let found = scene.group("inner").expect("nested group");
        assert_eq!(found.texts().count(), 1);
        assert_eq!(scene.layer_labels(), vec!["outer"]);
    }
}
