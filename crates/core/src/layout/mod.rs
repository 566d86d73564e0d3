//! Layout reconstruction from glyph bounding boxes.
//!
//! This module contains:
//! - Layout parameters (`LayoutParams`)
//! - Pipeline data types (letters, bands, words, line segments, groups)
//! - One module per pipeline stage
//! - The `Analysis` run that ties the stages together

pub mod analysis;
pub mod bands;
pub mod bounds;
pub mod letters;
pub mod lines;
pub mod paragraphs;
pub mod params;
pub mod starts;
pub mod types;
pub mod words;

// Re-export params
pub use params::*;

// Re-export pipeline types
pub use types::*;

pub use analysis::Analysis;
pub use bounds::BoundsInput;
pub use paragraphs::Grouping;
