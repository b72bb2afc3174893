//! SVG generation from assembled scenes

use crate::layout::{round2, Group, Point, Primitive, Style, TextPrimitive, VectorScene};
use crate::stylesheet::Stylesheet;

use super::SvgConfig;

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    styles: Vec<String>,
    elements: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            styles: vec![],
            elements: vec![],
            indent: 1,
        }
    }

    /// Add stylesheet rules that apply to the whole document
    pub fn add_stylesheet(&mut self, stylesheet: &Stylesheet) {
        if let Some(family) = stylesheet.colors.get("font-family") {
            let prefix = self.prefix();
            self.styles
                .push(format!(".{}text {{ font-family: {}; }}", prefix, family));
        }
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    fn class_list(&self, kind: &str) -> String {
        let prefix = self.prefix();
        format!("{prefix}shape {prefix}{kind}")
    }

    /// Add a full-canvas background rectangle
    pub fn add_background(&mut self, width: f64, height: f64, color: &str) {
        self.elements.push(format!(
            r#"{}<rect class="{}background" x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
            self.indent_str(),
            self.prefix(),
            num(width),
            num(height),
            escape_xml(color)
        ));
    }

    /// Add a rectangle element
    pub fn add_rect(&mut self, id: Option<&str>, x: f64, y: f64, w: f64, h: f64, styles: &str) {
        self.elements.push(format!(
            r#"{}<rect{} class="{}" x="{}" y="{}" width="{}" height="{}"{}/>"#,
            self.indent_str(),
            id_attr(id),
            self.class_list("rect"),
            num(x),
            num(y),
            num(w),
            num(h),
            styles
        ));
    }

    /// Add a circle element
    pub fn add_circle(&mut self, id: Option<&str>, center: Point, r: f64, styles: &str) {
        self.elements.push(format!(
            r#"{}<circle{} class="{}" cx="{}" cy="{}" r="{}"{}/>"#,
            self.indent_str(),
            id_attr(id),
            self.class_list("circle"),
            num(center.x),
            num(center.y),
            num(r),
            styles
        ));
    }

    /// Add a line element
    pub fn add_line(&mut self, id: Option<&str>, from: Point, to: Point, styles: &str) {
        self.elements.push(format!(
            r#"{}<line{} class="{}" x1="{}" y1="{}" x2="{}" y2="{}"{}/>"#,
            self.indent_str(),
            id_attr(id),
            self.class_list("line"),
            num(from.x),
            num(from.y),
            num(to.x),
            num(to.y),
            styles
        ));
    }

    /// Add an open polyline, or a polygon when `closed`
    pub fn add_polyline(&mut self, id: Option<&str>, points: &[Point], closed: bool, styles: &str) {
        let tag = if closed { "polygon" } else { "polyline" };
        self.elements.push(format!(
            r#"{}<{}{} class="{}" points="{}"{}/>"#,
            self.indent_str(),
            tag,
            id_attr(id),
            self.class_list(tag),
            points_attr(points),
            styles
        ));
    }

    /// Add a text element with its baseline shift and optional rotation
    pub fn add_text(&mut self, text: &TextPrimitive) {
        let transform = match &text.rotation {
            Some(rotation) if !rotation.is_identity() => format!(
                r#" transform="rotate({} {} {})""#,
                num(rotation.angle),
                num(rotation.pivot.x),
                num(rotation.pivot.y)
            ),
            _ => String::new(),
        };

        self.elements.push(format!(
            r#"{}<text class="{}" x="{}" y="{}" text-anchor="{}" dy="{}"{}{}>{}</text>"#,
            self.indent_str(),
            self.class_list("text"),
            num(text.position.x),
            num(text.position.y),
            text.anchor.as_str(),
            text.dy,
            transform,
            format_styles(&text.style),
            escape_xml(&text.content)
        ));
    }

    /// Open a layer group
    pub fn start_group(&mut self, id: &str) {
        self.elements.push(format!(
            r#"{}<g id="{}" class="{}layer">"#,
            self.indent_str(),
            escape_xml(id),
            self.prefix()
        ));
        self.indent += 1;
    }

    /// Close a group element
    pub fn end_group(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.elements.push(format!("{}</g>", self.indent_str()));
    }

    /// Build the final SVG string for a canvas of the given size
    pub fn build(self, width: f64, height: f64) -> String {
        let nl = self.newline();

        let mut svg = String::new();

        // XML declaration for standalone
        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}">"#,
            w = num(width),
            h = num(height)
        ));
        svg.push_str(nl);

        if !self.styles.is_empty() {
            let indent = if self.config.pretty_print { "  " } else { "" };
            svg.push_str(indent);
            svg.push_str("<style>");
            svg.push_str(nl);
            for style in &self.styles {
                svg.push_str(indent);
                svg.push_str(indent);
                svg.push_str(style);
                svg.push_str(nl);
            }
            svg.push_str(indent);
            svg.push_str("</style>");
            svg.push_str(nl);
        }

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");

        svg
    }
}

/// Render a VectorScene to an SVG string (with default stylesheet)
pub fn render_svg(scene: &VectorScene, config: &SvgConfig) -> String {
    render_svg_with_stylesheet(scene, config, &Stylesheet::default())
}

/// Render a VectorScene to an SVG string with a custom stylesheet
///
/// Primitive colors are already resolved by the assembler; the stylesheet
/// only supplies the background token and document-wide font rules.
pub fn render_svg_with_stylesheet(
    scene: &VectorScene,
    config: &SvgConfig,
    stylesheet: &Stylesheet,
) -> String {
    let mut builder = SvgBuilder::new(config.clone());
    builder.add_stylesheet(stylesheet);

    if let Some(background) = &config.background {
        builder.add_background(
            scene.width,
            scene.height,
            &stylesheet.resolve_or_default(background),
        );
    }

    for group in &scene.groups {
        render_group(group, &mut builder);
    }

    builder.build(scene.width, scene.height)
}

fn render_group(group: &Group, builder: &mut SvgBuilder) {
    builder.start_group(&group.label);
    for child in &group.children {
        render_primitive(child, builder);
    }
    builder.end_group();
}

fn render_primitive(primitive: &Primitive, builder: &mut SvgBuilder) {
    match primitive {
        Primitive::Circle {
            id,
            center,
            radius,
            style,
        } => builder.add_circle(id.as_deref(), *center, *radius, &format_styles(style)),
        Primitive::Line {
            id,
            from,
            to,
            style,
        } => builder.add_line(id.as_deref(), *from, *to, &format_styles(style)),
        Primitive::Polyline {
            id,
            points,
            closed,
            style,
        } => builder.add_polyline(id.as_deref(), points, *closed, &format_styles(style)),
        Primitive::Rect { id, bounds, style } => builder.add_rect(
            id.as_deref(),
            bounds.x,
            bounds.y,
            bounds.width,
            bounds.height,
            &format_styles(style),
        ),
        Primitive::Text(text) => builder.add_text(text),
        Primitive::Group(group) => render_group(group, builder),
    }
}

/// Format a Style as an SVG attribute string
fn format_styles(style: &Style) -> String {
    let mut parts = vec![];
    if let Some(fill) = &style.fill {
        parts.push(format!(r#" fill="{}""#, escape_xml(fill)));
    }
    if let Some(stroke) = &style.stroke {
        parts.push(format!(r#" stroke="{}""#, escape_xml(stroke)));
    }
    if let Some(sw) = style.stroke_width {
        parts.push(format!(r#" stroke-width="{}""#, num(sw)));
    }
    if let Some(op) = style.opacity {
        if op < 1.0 {
            parts.push(format!(r#" opacity="{}""#, num(op)));
        }
    }
    if let Some(font_size) = style.font_size {
        parts.push(format!(r#" font-size="{}""#, num(font_size)));
    }
    parts.join("")
}

fn id_attr(id: Option<&str>) -> String {
    id.map(|i| format!(r#" id="{}""#, escape_xml(i)))
        .unwrap_or_default()
}

/// Number with at most two decimals and no trailing zeros
fn num(value: f64) -> String {
    round2(value).to_string()
}

fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", num(p.x), num(p.y)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{BoundingBox, Em, Rotation, SceneType, TextAnchor};

    fn compact() -> SvgConfig {
        SvgConfig::new()
            .with_standalone(false)
            .with_pretty_print(false)
    }

    #[test]
    fn test_num_formatting() {
        assert_eq!(num(512.0), "512");
        assert_eq!(num(0.1 + 0.2), "0.3");
        assert_eq!(num(1.005_1), "1.01");
        assert_eq!(num(-0.001), "0");
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b"), "a &lt; b");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("<tag>"), "&lt;tag&gt;");
    }

    #[test]
    fn test_format_styles() {
        let style = Style {
            fill: Some("#ff0000".to_string()),
            stroke: Some("#000000".to_string()),
            stroke_width: Some(2.0),
            opacity: Some(0.35),
            font_size: None,
        };
        let result = format_styles(&style);
        assert!(result.contains(r##"fill="#ff0000""##));
        assert!(result.contains(r##"stroke="#000000""##));
        assert!(result.contains(r#"stroke-width="2""#));
        assert!(result.contains(r#"opacity="0.35""#));
        assert!(!result.contains("font-size"));
    }

    #[test]
    fn test_render_single_circle() {
        let mut scene = VectorScene::new(SceneType::Circle, 100.0, 50.0);
        let mut group = Group::new("outline");
        group.push(Primitive::circle(
            Some("main-circle".to_string()),
            Point::new(50.0, 25.0),
            20.0,
            Style::stroked("#333333", 2.0),
        ));
        scene.groups.push(group);

        let svg = render_svg(&scene, &compact());
        insta::assert_snapshot!(svg, @r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 50" width="100" height="50"><g id="outline" class="gt-layer"><circle id="main-circle" class="gt-shape gt-circle" cx="50" cy="25" r="20" fill="none" stroke="#333333" stroke-width="2"/></g></svg>"##);
    }

    #[test]
    fn test_standalone_header_and_pretty_print() {
        let scene = VectorScene::new(SceneType::Grid, 640.0, 480.0);
        let svg = render_svg(&scene, &SvgConfig::default());
        assert!(svg.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(svg.contains(r#"viewBox="0 0 640 480""#));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_render_rotated_text() {
        let mut scene = VectorScene::new(SceneType::Spiral, 200.0, 200.0);
        let mut group = Group::new("labels");
        group.push(Primitive::text(
            "A & B",
            Point::new(120.456, 80.0),
            TextAnchor::Start,
            Em(-0.3),
            Some(Rotation::new(45.0, Point::new(120.456, 80.0))),
            Style::text("#333333", 16.0),
        ));
        scene.groups.push(group);

        let svg = render_svg(&scene, &compact());
        assert!(svg.contains(r#"x="120.46" y="80""#));
        assert!(svg.contains(r#"text-anchor="start" dy="-0.3em""#));
        assert!(svg.contains(r#"transform="rotate(45 120.46 80)""#));
        assert!(svg.contains(r#"font-size="16""#));
        assert!(svg.contains(">A &amp; B</text>"));
    }

    #[test]
    fn test_closed_polyline_is_polygon() {
        let mut scene = VectorScene::new(SceneType::Mandala, 100.0, 100.0);
        let mut group = Group::new("layer-1");
        let square = [
            Point::new(10.0, 10.0),
            Point::new(20.0, 10.0),
            Point::new(20.0, 20.0),
        ];
        group.push(Primitive::polyline(None, &square, true, Style::filled("red")));
        group.push(Primitive::polyline(None, &square, false, Style::default()));
        scene.groups.push(group);

        let svg = render_svg(&scene, &compact());
        assert!(svg.contains(r#"<polygon class="gt-shape gt-polygon" points="10,10 20,10 20,20" fill="red"/>"#));
        assert!(svg.contains(r#"<polyline class="gt-shape gt-polyline" points="10,10 20,10 20,20"/>"#));
    }

    #[test]
    fn test_nested_groups_render_in_order() {
        let mut scene = VectorScene::new(SceneType::Grid, 100.0, 100.0);
        let mut outer = Group::new("cells");
        let mut inner = Group::new("row-0");
        inner.push(Primitive::rect(
            Some("cell-0-0".to_string()),
            BoundingBox::new(0.0, 0.0, 10.0, 10.0),
            Style::default(),
        ));
        outer.push(Primitive::Group(inner));
        scene.groups.push(outer);

        let svg = render_svg(&scene, &compact());
        let outer_at = svg.find(r#"<g id="cells""#).unwrap();
        let inner_at = svg.find(r#"<g id="row-0""#).unwrap();
        let rect_at = svg.find(r#"id="cell-0-0""#).unwrap();
        assert!(outer_at < inner_at && inner_at < rect_at);
        assert_eq!(svg.matches("</g>").count(), 2);
    }

    #[test]
    fn test_background_resolves_palette_token() {
        let scene = VectorScene::new(SceneType::Venn, 100.0, 100.0);
        let config = compact().with_background("background-1");
        let svg = render_svg(&scene, &config);
        let expected = Stylesheet::default().resolve_or_default("background-1");
        assert!(svg.contains(&format!(r#"class="gt-background" x="0" y="0" width="100" height="100" fill="{}""#, expected)));
    }

    #[test]
    fn test_font_family_rule_from_stylesheet() {
        let stylesheet = Stylesheet::from_str(
            r#"
[colors]
font-family = "Helvetica"
"#,
        )
        .unwrap();
        let scene = VectorScene::new(SceneType::Clock, 100.0, 100.0);
        let svg = render_svg_with_stylesheet(&scene, &compact(), &stylesheet);
        assert!(svg.contains("<style>.gt-text { font-family: Helvetica; }</style>"));
    }
}
