//! Error types for loading and validating scene documents

use std::fmt;

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// A single invalid field, addressed by its document path (e.g. `venn.sets`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

impl FieldError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

#[derive(Error, Debug)]
pub enum SpecError {
    #[error("Failed to read scene file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse scene TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Failed to parse scene JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid scene: {}", join_fields(.0))]
    Invalid(Vec<FieldError>),
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(FieldError::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Byte offset of a 1-based line/column position
fn offset_of(source: &str, line: usize, column: usize) -> usize {
    let line_start: usize = source
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(source.len())
}

impl SpecError {
    /// Byte range in the source the error points at, when known
    pub fn span(&self, source: &str) -> Option<Span> {
        match self {
            SpecError::Toml(err) => err.span(),
            SpecError::Json(err) if err.line() > 0 => {
                let start = offset_of(source, err.line(), err.column());
                Some(start..(start + 1).min(source.len()).max(start))
            }
            _ => None,
        }
    }

    /// Format the error with source context using ariadne.
    ///
    /// Syntax errors get an annotated snippet; field errors are listed one per line.
    pub fn format(&self, source: &str, filename: &str) -> String {
        let message = match self {
            SpecError::Toml(err) => err.message().to_string(),
            SpecError::Invalid(errors) => {
                let mut out = String::from("Invalid scene:\n");
                for error in errors {
                    out.push_str(&format!("  - {error}\n"));
                }
                return out;
            }
            other => other.to_string(),
        };

        let Some(span) = self.span(source) else {
            return format!("{filename}: {message}\n");
        };

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message(&message)
            .with_label(
                Label::new((filename, span))
                    .with_message(&message)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => format!("{filename}: {message}\n"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_lists_every_field() {
        let err = SpecError::Invalid(vec![
            FieldError::new("segments.count", "must be at least 1"),
            FieldError::new("venn.sets", "expected exactly 3 sets, got 2"),
        ]);
        assert_eq!(
            err.to_string(),
            "Invalid scene: segments.count: must be at least 1; venn.sets: expected exactly 3 sets, got 2"
        );
        let formatted = err.format("", "scene.toml");
        assert!(formatted.contains("  - segments.count: must be at least 1\n"));
        assert!(formatted.contains("  - venn.sets: expected exactly 3 sets, got 2\n"));
    }

    #[test]
    fn test_toml_error_has_snippet() {
        let source = "type = \"circle\"\ncanvas = { width = }\n";
        let err: SpecError = toml::from_str::<toml::Value>(source).unwrap_err().into();
        assert!(err.span(source).is_some());
        let formatted = err.format(source, "scene.toml");
        assert!(formatted.contains("scene.toml"));
    }

    #[test]
    fn test_json_error_points_at_line() {
        let source = "{\n  \"type\": \"circle\",\n  oops\n}";
        let err: SpecError = serde_json::from_str::<serde_json::Value>(source)
            .unwrap_err()
            .into();
        let span = err.span(source).expect("json span");
        assert_eq!(source[..span.start].matches('\n').count(), 2);
    }

    #[test]
    fn test_offset_of() {
        let source = "ab\ncd\nef";
        assert_eq!(offset_of(source, 1, 1), 0);
        assert_eq!(offset_of(source, 2, 2), 4);
        assert_eq!(offset_of(source, 3, 1), 6);
    }
}
