//! Error types for boxlayout.

use std::path::PathBuf;

use thiserror::Error;

use crate::utils::Rect;

/// Primary error type for loading and analysing a box table.
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed table: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: expected at least {expected} fields, found {found}")]
    MissingField {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("row {row}: field `{field}` is not a valid coordinate: {value:?}")]
    InvalidCoordinate {
        row: usize,
        field: &'static str,
        value: String,
    },

    #[error("box {index} has coordinates out of range: {rect:?}")]
    BoxOutOfRange { index: usize, rect: Rect },

    #[error("table contains no data rows")]
    EmptyTable,

    #[error("invalid layout parameters: {0}")]
    InvalidParams(String),

    #[error("cannot write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience Result type alias for LayoutError.
pub type Result<T> = std::result::Result<T, LayoutError>;
