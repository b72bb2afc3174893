//! SVG serializer for assembled scenes
//!
//! This module takes a VectorScene and produces an SVG string with one
//! `<g>` per semantic layer and prefixed CSS classes for styling.

pub mod config;
pub mod svg;

pub use config::SvgConfig;
pub use svg::{render_svg, render_svg_with_stylesheet};
