//! One-call entry points: read a box table and run the whole pipeline.

use std::io::Read;
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::input::{read_boxes, read_boxes_from_path, resolve_table_path};
use crate::layout::{Analysis, LayoutParams};
use crate::utils::Rect;

/// Analyzes the box table for `path`.
///
/// `path` may name the table itself (`.csv`) or the page image, in which
/// case the sidecar table next to it is read.
pub fn analyze_path(path: impl AsRef<Path>, params: &LayoutParams) -> Result<Analysis> {
    let table = resolve_table_path(path.as_ref());
    let boxes = read_boxes_from_path(&table)?;
    let analysis = Analysis::run(params, boxes)?;
    info!(
        table = %table.display(),
        words = analysis.words.len(),
        blocks = analysis.final_bounds.len(),
        "analyzed box table"
    );
    Ok(analysis)
}

/// Analyzes a box table read from `reader`.
pub fn analyze_reader<R: Read>(reader: R, params: &LayoutParams) -> Result<Analysis> {
    let boxes = read_boxes(reader)?;
    Analysis::run(params, boxes)
}

/// Analyzes boxes that are already in memory.
pub fn analyze_boxes(boxes: Vec<Rect>, params: &LayoutParams) -> Result<Analysis> {
    Analysis::run(params, boxes)
}
