//! boxlayout - document layout reconstruction from glyph bounding boxes.
//!
//! Takes the boxes an OCR or rendering pass emits for individual glyphs and
//! rebuilds letters, text rows, words, line segments, paragraphs and math
//! blocks, each WORD or MATH region ending up as one or more rectangles.

pub mod api;
pub mod converter;
pub mod error;
pub mod input;
pub mod layout;
pub mod utils;

// Re-export high_level for convenience
pub use api::high_level;

pub use error::{LayoutError, Result};
pub use layout::{Analysis, LayoutParams};
pub use utils::Rect;
