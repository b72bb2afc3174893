//! Geometric layout engine
//!
//! Pure calculators for polar placement, segments, clock hands, Venn regions,
//! grids, spirals and mandala layers, plus the assembler that composes them
//! into a [`VectorScene`] for a resolved scene specification.

pub mod assembler;
pub mod clock;
pub mod collision;
pub mod config;
pub mod grid;
pub mod labels;
pub mod lint;
pub mod mandala;
pub mod polar;
pub mod segments;
pub mod spiral;
pub mod transform;
pub mod types;
pub mod venn;

pub use assembler::assemble;
pub use config::LayoutConfig;
pub use lint::{LintCategory, LintWarning};
pub use transform::Rotation;
pub use types::*;
