//! Scene specifications: the typed model, the document format, and defaults
//!
//! Documents are read from TOML or JSON into [`SceneDocument`] and resolved into
//! a [`Scene`] that the layout engine consumes without further checks.

pub mod defaults;
pub mod document;
pub mod model;

use std::path::Path;

pub use defaults::SceneDefaults;
pub use document::SceneDocument;
pub use model::*;

use crate::error::SpecError;

/// Serialization format of a scene document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneFormat {
    Toml,
    Json,
}

impl SceneFormat {
    /// Pick the format from a file extension, defaulting to TOML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => SceneFormat::Json,
            _ => SceneFormat::Toml,
        }
    }

    /// Guess the format of inline source: JSON documents are objects
    pub fn detect(source: &str) -> Self {
        if source.trim_start().starts_with('{') {
            SceneFormat::Json
        } else {
            SceneFormat::Toml
        }
    }
}

/// Parse and resolve a scene document with the given defaults
pub fn load_scene_str_with(
    source: &str,
    format: SceneFormat,
    defaults: &SceneDefaults,
) -> Result<Scene, SpecError> {
    let document = match format {
        SceneFormat::Toml => SceneDocument::from_toml(source)?,
        SceneFormat::Json => SceneDocument::from_json(source)?,
    };
    document.resolve(defaults)
}

/// Parse and resolve a scene document using the standard defaults
pub fn load_scene_str(source: &str, format: SceneFormat) -> Result<Scene, SpecError> {
    load_scene_str_with(source, format, &SceneDefaults::default())
}

/// Read, parse and resolve a scene file; `.json` files are JSON, anything else TOML
pub fn load_scene_file(path: &Path) -> Result<Scene, SpecError> {
    let source = std::fs::read_to_string(path)?;
    load_scene_str(&source, SceneFormat::from_path(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(SceneFormat::from_path(Path::new("a.json")), SceneFormat::Json);
        assert_eq!(SceneFormat::from_path(Path::new("a.JSON")), SceneFormat::Json);
        assert_eq!(SceneFormat::from_path(Path::new("a.toml")), SceneFormat::Toml);
        assert_eq!(SceneFormat::from_path(Path::new("scene")), SceneFormat::Toml);
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(SceneFormat::detect("  {\"type\": \"circle\"}"), SceneFormat::Json);
        assert_eq!(SceneFormat::detect("type = \"circle\""), SceneFormat::Toml);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_scene_file(Path::new("/nonexistent/scene.toml")).unwrap_err();
        assert!(matches!(err, SpecError::Io(_)));
    }

    #[test]
    fn test_same_scene_from_both_formats() {
        let toml = load_scene_str(
            "type = \"circle\"\n[segments]\ncount = 6",
            SceneFormat::Toml,
        )
        .unwrap();
        let json = load_scene_str(
            r#"{"type": "circle", "segments": {"count": 6}}"#,
            SceneFormat::Json,
        )
        .unwrap();
        assert_eq!(toml, json);
    }
}
