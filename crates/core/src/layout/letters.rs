//! Letter classifier: separates glyph-like boxes from noise and graphics.

use tracing::debug;

use crate::utils::Rect;

use super::params::LayoutParams;
use super::types::Letter;

/// Decides whether a box plausibly holds a single glyph.
///
/// A box is letter-like when it is either not too thin and not too wide
/// (`w / h > min_letter_aspect` and `w < max_letter_width`) or of text height
/// (`min_letter_height < h < max_letter_height`), and in both cases wider
/// than `max_adjacent_gap - 2`. Degenerate boxes never qualify.
pub fn is_letter(params: &LayoutParams, rect: &Rect) -> bool {
    if rect.w <= 0 || rect.h <= 0 {
        return false;
    }

    let aspect = f64::from(rect.w) / f64::from(rect.h);
    let glyph_shaped = aspect > params.min_letter_aspect && rect.w < params.max_letter_width;
    let text_height = rect.h > params.min_letter_height && rect.h < params.max_letter_height;

    (glyph_shaped || text_height) && rect.w > params.max_adjacent_gap - 2
}

/// Keeps the letter-like boxes, in input order.
pub fn classify_letters(params: &LayoutParams, boxes: &[Rect]) -> Vec<Letter> {
    let letters: Vec<Letter> = boxes
        .iter()
        .enumerate()
        .filter(|(_, rect)| is_letter(params, rect))
        .map(|(source, rect)| Letter {
            source,
            rect: *rect,
        })
        .collect();
    debug!(
        boxes = boxes.len(),
        letters = letters.len(),
        "classified letters"
    );
    letters
}
