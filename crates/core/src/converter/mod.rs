//! Output converters for a finished analysis.
//!
//! - TextConverter: line-oriented summary for terminals and diffs
//! - JsonConverter: machine-readable report

mod json;
mod text;

pub use json::{Counts, JsonConverter, Report, SegmentReport};
pub use text::TextConverter;
