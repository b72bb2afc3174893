//! Stylesheet system for color palette support
//!
//! Scene styles refer to symbolic color tokens (`set-1`, `stroke-1`, `hand-second`)
//! that a stylesheet resolves to concrete colors, so the same ground truth can be
//! emitted under different color schemes without touching its geometry.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading or parsing stylesheets
#[derive(Error, Debug)]
pub enum StylesheetError {
    #[error("Failed to read stylesheet file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse stylesheet TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// A stylesheet mapping symbolic colors to concrete values
#[derive(Debug, Clone)]
pub struct Stylesheet {
    /// Optional name for the stylesheet
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    /// Color mappings: token name -> hex color
    pub colors: HashMap<String, String>,
}

/// TOML structure for deserializing stylesheets
#[derive(Deserialize)]
struct TomlStylesheet {
    metadata: Option<TomlMetadata>,
    colors: HashMap<String, String>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

/// Default color palette: dark ink on white, three set colors and distinct hand colors
const DEFAULT_PALETTE: &str = r##"
[colors]
# Outlines, ticks, spokes and grid cells
stroke-1 = "#333333"
stroke-2 = "#666666"
stroke-3 = "#999999"

# Canvas and cell fills
background-1 = "#ffffff"
background-2 = "#f5f5f5"

# Label text
text-1 = "#1a1a1a"
text-2 = "#666666"

# Markers on segments, spiral items and mandala layers
accent-1 = "#2196f3"
accent-2 = "#e3f2fd"

# Venn sets, in set order
set-1 = "#e53935"
set-2 = "#43a047"
set-3 = "#1e88e5"

# Clock hands
hand-hour = "#1a1a1a"
hand-minute = "#333333"
hand-second = "#f44336"
"##;

impl Stylesheet {
    /// Load stylesheet from TOML file
    pub fn from_file(path: &Path) -> Result<Self, StylesheetError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load stylesheet from TOML string
    pub fn from_str(content: &str) -> Result<Self, StylesheetError> {
        let parsed: TomlStylesheet = toml::from_str(content)?;

        Ok(Stylesheet {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            colors: parsed.colors,
        })
    }

    /// Resolve a symbolic color token to a concrete value
    ///
    /// Returns None if the token is not defined in this stylesheet.
    pub fn resolve(&self, token: &str) -> Option<&str> {
        self.colors.get(token).map(|s| s.as_str())
    }

    /// Resolve a symbolic color token with fallback to default palette
    ///
    /// Fallback order:
    /// 1. Check this stylesheet for exact token
    /// 2. Check default palette for exact token
    /// 3. Use category default (stroke → #333333, etc.)
    ///
    /// Values that are not tokens (e.g. `#ff0000` or `red`) pass through unchanged.
    pub fn resolve_or_default(&self, token: &str) -> String {
        // Try this stylesheet first
        if let Some(color) = self.resolve(token) {
            return color.to_string();
        }

        // Fallback to default palette
        let default = Self::default();
        if let Some(color) = default.resolve(token) {
            return color.to_string();
        }

        if token.starts_with('#') {
            return token.to_string();
        }

        // Final fallback: category defaults
        let category = token.split('-').next().unwrap_or(token);
        match category {
            "stroke" | "text" | "hand" => return "#333333".to_string(),
            "background" => return "#ffffff".to_string(),
            "accent" | "set" => return "#2196f3".to_string(),
            _ => {}
        }

        if !token.contains('-') {
            // Named CSS color
            return token.to_string();
        }

        // Unknown category - return dark gray
        "#333333".to_string()
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self::from_str(DEFAULT_PALETTE).expect("Default palette should be valid TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stylesheet() {
        let stylesheet = Stylesheet::default();
        for token in ["stroke-1", "background-1", "text-1", "accent-1", "set-1", "set-2", "set-3"] {
            assert!(stylesheet.colors.contains_key(token), "{token}");
        }
        assert!(stylesheet.colors.contains_key("hand-second"));
    }

    #[test]
    fn test_resolve_existing_token() {
        let stylesheet = Stylesheet::default();
        assert_eq!(stylesheet.resolve("stroke-1"), Some("#333333"));
        assert_eq!(stylesheet.resolve("set-2"), Some("#43a047"));
    }

    #[test]
    fn test_resolve_missing_token() {
        let stylesheet = Stylesheet::default();
        assert_eq!(stylesheet.resolve("nonexistent"), None);
    }

    #[test]
    fn test_resolve_or_default_fallback() {
        // Empty stylesheet should fall back to defaults
        let empty = Stylesheet {
            name: None,
            description: None,
            colors: HashMap::new(),
        };
        assert_eq!(empty.resolve_or_default("set-1"), "#e53935");
    }

    #[test]
    fn test_resolve_or_default_category_fallback() {
        // Even for unknown tokens, category defaults apply
        let empty = Stylesheet {
            name: None,
            description: None,
            colors: HashMap::new(),
        };
        // Unknown specific token but known category
        assert_eq!(empty.resolve_or_default("stroke-99"), "#333333");
        assert_eq!(empty.resolve_or_default("background-custom"), "#ffffff");
        assert_eq!(empty.resolve_or_default("set-7"), "#2196f3");
    }

    #[test]
    fn test_literal_colors_pass_through() {
        let stylesheet = Stylesheet::default();
        assert_eq!(stylesheet.resolve_or_default("#abcdef"), "#abcdef");
        assert_eq!(stylesheet.resolve_or_default("tomato"), "tomato");
    }

    #[test]
    fn test_parse_toml_with_metadata() {
        let toml_str = r##"
[metadata]
name = "Test Theme"
description = "A test theme"

[colors]
set-1 = "#000000"
"##;
        let stylesheet = Stylesheet::from_str(toml_str).expect("Should parse");
        assert_eq!(stylesheet.name, Some("Test Theme".to_string()));
        assert_eq!(stylesheet.description, Some("A test theme".to_string()));
        assert_eq!(stylesheet.resolve("set-1"), Some("#000000"));
    }

    #[test]
    fn test_parse_toml_without_metadata() {
        let toml_str = r##"
[colors]
stroke-1 = "#111111"
"##;
        let stylesheet = Stylesheet::from_str(toml_str).expect("Should parse");
        assert_eq!(stylesheet.name, None);
        assert_eq!(stylesheet.resolve("stroke-1"), Some("#111111"));
    }

    #[test]
    fn test_invalid_toml_error() {
        let invalid = "this is not valid toml {{{{";
        let result = Stylesheet::from_str(invalid);
        assert!(result.is_err());
    }
}
