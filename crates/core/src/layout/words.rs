//! Word assembler: grows each start letter rightwards into a word.

use tracing::debug;

use crate::utils::Rect;

use super::params::LayoutParams;
use super::types::{HeightBand, Letter, LetterId, Word, WordId};

/// Grows `start` over the letters of its band.
///
/// Scans `band_letters` for a letter `R` with
/// `R.x - word.right in [min_adjacent_gap, max_adjacent_gap]`, absorbs it
/// (right edge to `R.right`, top and bottom to cover `R`) and rescans from the
/// first letter. Stops after a full scan absorbs nothing.
pub fn assemble_word(
    params: &LayoutParams,
    letters: &[Letter],
    band_letters: &[LetterId],
    start: LetterId,
) -> Word {
    let first = letters[start].rect;
    let mut rect = first;
    let mut members = vec![start];
    let mut absorbed: Vec<bool> = band_letters.iter().map(|&id| id == start).collect();

    'scan: loop {
        for (pos, &id) in band_letters.iter().enumerate() {
            if absorbed[pos] {
                continue;
            }
            let candidate = letters[id].rect;
            if params.is_adjacent_gap(candidate.x - rect.right()) {
                rect = Rect::from_edges(
                    rect.x,
                    rect.y.min(candidate.y),
                    rect.right().max(candidate.right()),
                    rect.bottom().max(candidate.bottom()),
                );
                absorbed[pos] = true;
                members.push(id);
                continue 'scan;
            }
        }
        break;
    }

    Word {
        start,
        origin: (first.x, first.y),
        rect,
        letters: members,
    }
}

/// Assembles one word per start letter.
///
/// Returns every word, band by band in start order, and for each band the ids
/// of its words parallel to `starts[band]`.
pub fn assemble_words(
    params: &LayoutParams,
    letters: &[Letter],
    bands: &[HeightBand],
    starts: &[Vec<LetterId>],
) -> (Vec<Word>, Vec<Vec<WordId>>) {
    let mut words = Vec::with_capacity(starts.iter().map(Vec::len).sum());
    let mut band_words = Vec::with_capacity(bands.len());

    for (band, band_starts) in bands.iter().zip(starts) {
        let ids: Vec<WordId> = band_starts
            .iter()
            .map(|&start| {
                words.push(assemble_word(params, letters, &band.letters, start));
                words.len() - 1
            })
            .collect();
        band_words.push(ids);
    }

    debug!(words = words.len(), "assembled words");
    (words, band_words)
}
