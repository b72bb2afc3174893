//! geotruth - exact vector ground truth for geometric illustrations
//!
//! This library resolves a declarative scene specification (circle, clock, Venn,
//! grid, spiral or mandala), computes its geometry, and emits a vector
//! description with every coordinate known exactly. The description serializes
//! to SVG for rendering and to JSON for downstream verification.
//!
//! # Example
//!
//! ```rust
//! use geotruth::render;
//!
//! let svg = render("type = \"circle\"\n[segments]\ncount = 4").unwrap();
//! assert!(svg.contains(r#"<g id="segment-lines""#));
//! ```

pub mod error;
pub mod layout;
pub mod log;
pub mod renderer;
pub mod scene;
pub mod stylesheet;

pub use error::{FieldError, SpecError};
pub use layout::{assemble, LayoutConfig, LintCategory, LintWarning, VectorScene};
pub use renderer::{render_svg, render_svg_with_stylesheet, SvgConfig};
pub use scene::{load_scene_file, load_scene_str, Scene, SceneDefaults, SceneFormat};

use thiserror::Error;

// Re-export Stylesheet for public API
pub use stylesheet::Stylesheet;

/// Errors that can occur during the render pipeline
#[derive(Debug, Error)]
pub enum RenderError {
    /// The scene document could not be read, parsed or validated
    #[error(transparent)]
    Spec(#[from] SpecError),

    /// JSON serialization of the vector description failed
    #[error("failed to serialize scene: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Configuration for the complete render pipeline
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// Layout configuration
    pub layout: LayoutConfig,
    /// SVG output configuration
    pub svg: SvgConfig,
    /// Stylesheet for color resolution
    pub stylesheet: Stylesheet,
    /// Defaults applied to fields the document leaves out
    pub defaults: SceneDefaults,
    /// Document format; detected from the source when unset
    pub format: Option<SceneFormat>,
    /// Debug mode: print the assembled group tree to stderr
    pub debug: bool,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the layout configuration
    pub fn with_layout(mut self, config: LayoutConfig) -> Self {
        self.layout = config;
        self
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    /// Set the stylesheet for color resolution
    pub fn with_stylesheet(mut self, stylesheet: Stylesheet) -> Self {
        self.stylesheet = stylesheet;
        self
    }

    /// Set the scene defaults
    pub fn with_defaults(mut self, defaults: SceneDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Force the document format instead of detecting it
    pub fn with_format(mut self, format: SceneFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Enable or disable debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Parse, resolve and assemble a scene document
///
/// # Example
///
/// ```rust
/// use geotruth::{build_scene, RenderConfig};
///
/// let scene = build_scene(r#"{"type": "clock", "clock": {"time": "03:00"}}"#, &RenderConfig::new()).unwrap();
/// assert!(scene.group("hands").is_some());
/// ```
pub fn build_scene(source: &str, config: &RenderConfig) -> Result<VectorScene, RenderError> {
    let format = config.format.unwrap_or_else(|| SceneFormat::detect(source));
    let scene = scene::load_scene_str_with(source, format, &config.defaults)?;
    let vector = assemble(&scene, &config.layout, &config.stylesheet);

    if config.debug {
        print_debug_tree(&vector);
    }

    Ok(vector)
}

/// Render a scene document to SVG with default configuration
///
/// This is the main entry point for the library. It resolves the document,
/// assembles the vector description, and generates SVG output.
pub fn render(source: &str) -> Result<String, RenderError> {
    render_with_config(source, RenderConfig::default())
}

/// Render a scene document to SVG with custom configuration
///
/// # Example
///
/// ```rust
/// use geotruth::{render_with_config, RenderConfig, SvgConfig};
///
/// let config = RenderConfig::new().with_svg(SvgConfig::new().with_standalone(false));
/// let svg = render_with_config("type = \"venn\"\n[venn]\nsets = [\"A\", \"B\", \"C\"]", config).unwrap();
/// assert!(svg.starts_with("<svg"));
/// ```
pub fn render_with_config(source: &str, config: RenderConfig) -> Result<String, RenderError> {
    let vector = build_scene(source, &config)?;
    Ok(render_svg_with_stylesheet(
        &vector,
        &config.svg,
        &config.stylesheet,
    ))
}

/// Render a scene document to its JSON vector description
pub fn render_json(source: &str, config: RenderConfig) -> Result<String, RenderError> {
    let vector = build_scene(source, &config)?;
    Ok(serde_json::to_string_pretty(&vector)?)
}

/// Render to SVG and run the lint checks on the assembled scene
pub fn render_with_lint(
    source: &str,
    config: RenderConfig,
) -> Result<(String, Vec<LintWarning>), RenderError> {
    let vector = build_scene(source, &config)?;
    let warnings = layout::lint::check(&vector, &config.layout);
    let svg = render_svg_with_stylesheet(&vector, &config.svg, &config.stylesheet);
    Ok((svg, warnings))
}

fn print_debug_tree(scene: &VectorScene) {
    fn print_group(group: &layout::Group, depth: usize) {
        let indent = "  ".repeat(depth);
        eprintln!("{}[{}] {} primitives", indent, group.label, group.children.len());
        for child in &group.children {
            match child {
                layout::Primitive::Group(nested) => print_group(nested, depth + 1),
                layout::Primitive::Circle { id, center, radius, .. } => eprintln!(
                    "{}  circle {} c=({:.2}, {:.2}) r={:.2}",
                    indent,
                    id.as_deref().unwrap_or("<anon>"),
                    center.x,
                    center.y,
                    radius
                ),
                layout::Primitive::Line { id, from, to, .. } => eprintln!(
                    "{}  line {} ({:.2}, {:.2}) -> ({:.2}, {:.2})",
                    indent,
                    id.as_deref().unwrap_or("<anon>"),
                    from.x,
                    from.y,
                    to.x,
                    to.y
                ),
                layout::Primitive::Polyline { id, points, .. } => eprintln!(
                    "{}  polyline {} {} points",
                    indent,
                    id.as_deref().unwrap_or("<anon>"),
                    points.len()
                ),
                layout::Primitive::Rect { id, bounds, .. } => eprintln!(
                    "{}  rect {} x={:.2} y={:.2} w={:.2} h={:.2}",
                    indent,
                    id.as_deref().unwrap_or("<anon>"),
                    bounds.x,
                    bounds.y,
                    bounds.width,
                    bounds.height
                ),
                layout::Primitive::Text(text) => eprintln!(
                    "{}  text {:?} at ({:.2}, {:.2})",
                    indent, text.content, text.position.x, text.position.y
                ),
            }
        }
    }

    eprintln!("=== Layout Debug ===");
    eprintln!("{} {}x{}", scene.scene_type, scene.width, scene.height);
    for group in &scene.groups {
        print_group(group, 0);
    }
    eprintln!("====================");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_circle_scene() {
        let svg = render("type = \"circle\"").unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
        assert!(svg.contains(r#"<g id="outline""#));
        assert!(svg.contains(r#"<g id="segment-points""#));
    }

    #[test]
    fn test_render_detects_json() {
        let svg = render(r#"{"type": "grid", "grid": {"rows": 2, "cols": 2}}"#).unwrap();
        assert!(svg.contains(r#"id="cell-1-1""#));
    }

    #[test]
    fn test_forced_format_overrides_detection() {
        let config = RenderConfig::new().with_format(SceneFormat::Json);
        let err = render_with_config("type = \"circle\"", config).unwrap_err();
        assert!(matches!(err, RenderError::Spec(SpecError::Json(_))));
    }

    #[test]
    fn test_render_invalid_scene_error() {
        let err = render("type = \"venn\"").unwrap_err();
        assert!(matches!(err, RenderError::Spec(SpecError::Invalid(_))));
        assert!(err.to_string().contains("venn"));
    }

    #[test]
    fn test_render_json_has_groups() {
        let json = render_json(
            "type = \"clock\"\n[clock]\ntime = \"10:10\"",
            RenderConfig::new(),
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["scene_type"], "clock");
        let labels: Vec<&str> = value["groups"]
            .as_array()
            .unwrap()
            .iter()
            .map(|g| g["label"].as_str().unwrap())
            .collect();
        assert_eq!(labels, vec!["face", "ticks", "labels", "hands", "pivot"]);
    }

    #[test]
    fn test_render_is_deterministic() {
        let source = "type = \"spiral\"\n[spiral]\ncount = 8";
        assert_eq!(render(source).unwrap(), render(source).unwrap());
    }

    #[test]
    fn test_render_with_lint_returns_svg() {
        let (svg, warnings) = render_with_lint("type = \"circle\"", RenderConfig::new()).unwrap();
        assert!(svg.contains("<svg"));
        assert!(warnings.iter().all(|w| w.category == LintCategory::Overlap
            || w.category == LintCategory::Bounds));
    }
}
