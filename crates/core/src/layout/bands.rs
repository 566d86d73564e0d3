//! Row bander: groups letters into vertically overlapping height bands.
//!
//! Letters are taken in input order. A letter whose vertical extent
//! intersects a live band joins it and the band is replaced by one keyed by
//! the union interval; otherwise the letter opens a new band. In
//! `BandMerge::Cascade` mode the grown band then absorbs every other live band
//! it reaches, so no two live bands ever overlap.

use tracing::{debug, trace};

use crate::utils::HasBBox;

use super::params::{BandMerge, LayoutParams};
use super::types::{BandId, BandSpan, HeightBand, Letter, LetterId};

/// Vertical extent `[y, y + h)` of a letter.
#[inline]
pub fn letter_span(letter: &Letter) -> BandSpan {
    BandSpan::new(letter.y0(), letter.y1())
}

/// Builds the height bands for `letters`, ordered by ascending `(top, bottom)`.
pub fn build_bands(params: &LayoutParams, letters: &[Letter]) -> Vec<HeightBand> {
    // Live bands in creation order.
    let mut live: Vec<HeightBand> = Vec::new();

    for (id, letter) in letters.iter().enumerate() {
        let span = letter_span(letter);
        match live.iter().position(|band| band.span.overlaps(&span)) {
            Some(idx) => {
                let grown = join(&live[idx], span, id);
                trace!(
                    letter = id,
                    from = ?live[idx].span,
                    to = ?grown.span,
                    "letter joined band"
                );
                live[idx] = grown;
                if params.band_merge == BandMerge::Cascade {
                    absorb_overlapping(&mut live, idx);
                }
            }
            None => live.push(HeightBand::new(span, id)),
        }
    }

    live.sort_by_key(|band| band.span);
    debug!(
        letters = letters.len(),
        bands = live.len(),
        mode = ?params.band_merge,
        "built height bands"
    );
    live
}

/// Replacement for `band` after `letter` joins it.
fn join(band: &HeightBand, span: BandSpan, letter: LetterId) -> HeightBand {
    let mut letters = band.letters.clone();
    letters.push(letter);
    HeightBand {
        span: band.span.union(&span),
        letters,
    }
}

/// Replacement for `a` and `b` covering both intervals and all members.
fn merge(a: &HeightBand, b: &HeightBand) -> HeightBand {
    let mut letters = Vec::with_capacity(a.letters.len() + b.letters.len());
    letters.extend_from_slice(&a.letters);
    letters.extend_from_slice(&b.letters);
    letters.sort_unstable();
    HeightBand {
        span: a.span.union(&b.span),
        letters,
    }
}

/// Merges every band overlapping `live[idx]` into it until none remains.
///
/// The merged band keeps the position of the earliest band it replaces.
fn absorb_overlapping(live: &mut Vec<HeightBand>, mut idx: usize) {
    loop {
        let span = live[idx].span;
        let other = live
            .iter()
            .enumerate()
            .position(|(j, band)| j != idx && band.span.overlaps(&span));
        let Some(other) = other else {
            return;
        };

        let merged = merge(&live[idx], &live[other]);
        trace!(a = ?live[idx].span, b = ?live[other].span, to = ?merged.span, "bands merged");
        let keep = idx.min(other);
        let drop = idx.max(other);
        live[keep] = merged;
        live.remove(drop);
        idx = keep;
    }
}

/// Band of every letter, indexed by `LetterId`.
///
/// With `BandMerge::FirstMatch` a letter still belongs to exactly one band,
/// the one it joined, even if later bands overlap it.
pub fn letter_bands(bands: &[HeightBand], letter_count: usize) -> Vec<Option<BandId>> {
    let mut owner = vec![None; letter_count];
    for (band_id, band) in bands.iter().enumerate() {
        for &letter in &band.letters {
            owner[letter] = Some(band_id);
        }
    }
    owner
}
