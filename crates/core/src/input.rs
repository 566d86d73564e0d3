//! Box table ingestion.
//!
//! A box table is a comma-separated file with one header row. Every data row
//! carries at least nine fields; fields 5 to 8 hold the `x, y, w, h` of one
//! glyph box and the rest are ignored.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{LayoutError, Result};
use crate::utils::{MAX_COORD, Rect};

/// Minimum number of fields in a data row.
pub const MIN_FIELDS: usize = 9;

const COORDINATE_FIELDS: [(usize, &str); 4] = [(5, "x"), (6, "y"), (7, "w"), (8, "h")];

/// Returns the box table that accompanies a page image: the same path with
/// its extension replaced by `csv`.
pub fn sidecar_table_path(image: &Path) -> PathBuf {
    image.with_extension("csv")
}

/// Resolves a CLI-style input: tables are used as-is, anything else is
/// treated as a page image whose sidecar table is loaded.
pub fn resolve_table_path(input: &Path) -> PathBuf {
    let is_table = input
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if is_table {
        input.to_path_buf()
    } else {
        sidecar_table_path(input)
    }
}

/// Reads all boxes from a table file.
pub fn read_boxes_from_path(path: &Path) -> Result<Vec<Rect>> {
    let file = File::open(path).map_err(|source| LayoutError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let boxes = read_boxes(file)?;
    debug!(path = %path.display(), boxes = boxes.len(), "read box table");
    Ok(boxes)
}

/// Reads all boxes from a table, skipping its header row.
///
/// Fails on the first malformed row; a table without data rows is an error.
pub fn read_boxes<R: Read>(reader: R) -> Result<Vec<Rect>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut boxes = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record?;
        boxes.push(parse_row(idx + 1, &record)?);
    }

    if boxes.is_empty() {
        return Err(LayoutError::EmptyTable);
    }
    Ok(boxes)
}

fn parse_row(row: usize, record: &csv::StringRecord) -> Result<Rect> {
    if record.len() < MIN_FIELDS {
        return Err(LayoutError::MissingField {
            row,
            expected: MIN_FIELDS,
            found: record.len(),
        });
    }

    let mut values = [0i32; 4];
    for (slot, (index, field)) in values.iter_mut().zip(COORDINATE_FIELDS) {
        let raw = &record[index];
        *slot = raw
            .parse::<i32>()
            .ok()
            .filter(|v| (-MAX_COORD..=MAX_COORD).contains(v))
            .ok_or_else(|| LayoutError::InvalidCoordinate {
                row,
                field,
                value: raw.to_string(),
            })?;
    }

    let [x, y, w, h] = values;
    Ok(Rect::new(x, y, w, h))
}

/// The box with the largest area; the first one wins on ties.
pub fn largest_box(boxes: &[Rect]) -> Option<Rect> {
    boxes.iter().copied().reduce(
        |best, candidate| {
            if candidate.area() > best.area() { candidate } else { best }
        },
    )
}
