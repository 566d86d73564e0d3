//! Start detector: flags letters with no qualifying left neighbour.
//!
//! `L` is a word start unless some other letter `M` satisfies
//! `L.x - M.right in [min_adjacent_gap, max_adjacent_gap]` and
//! `|L.bottom - M.bottom| <= max_bottom_delta`. Neighbours are searched over
//! the whole letter set, not just `L`'s band.

use tracing::debug;

use crate::utils::{HasBBox, PointPlane};

use super::params::LayoutParams;
use super::types::{HeightBand, Letter, LetterId};

/// Spatial index of letter `(right, bottom)` corners.
pub struct NeighbourIndex {
    plane: PointPlane,
}

impl NeighbourIndex {
    pub fn new(letters: &[Letter]) -> Self {
        let anchors = letters
            .iter()
            .enumerate()
            .map(|(id, l)| (id, [l.x1(), l.y1()]));
        Self {
            plane: PointPlane::new(anchors),
        }
    }

    /// Letters that would continue a word ending just left of `letter`.
    pub fn left_neighbours(
        &self,
        params: &LayoutParams,
        letters: &[Letter],
        letter: LetterId,
    ) -> Vec<LetterId> {
        let l = &letters[letter];
        let mut found = self.plane.find(
            l.x0() - params.max_adjacent_gap,
            l.y1() - params.max_bottom_delta,
            l.x0() - params.min_adjacent_gap,
            l.y1() + params.max_bottom_delta,
        );
        found.retain(|&id| id != letter);
        found
    }

    pub fn is_word_start(&self, params: &LayoutParams, letters: &[Letter], letter: LetterId) -> bool {
        self.left_neighbours(params, letters, letter).is_empty()
    }
}

/// Word starts of every band, in band member order.
pub fn detect_starts(
    params: &LayoutParams,
    letters: &[Letter],
    bands: &[HeightBand],
) -> Vec<Vec<LetterId>> {
    let index = NeighbourIndex::new(letters);
    let starts: Vec<Vec<LetterId>> = bands
        .iter()
        .map(|band| {
            band.letters
                .iter()
                .copied()
                .filter(|&id| index.is_word_start(params, letters, id))
                .collect()
        })
        .collect();
    debug!(
        starts = starts.iter().map(Vec::len).sum::<usize>(),
        "detected word starts"
    );
    starts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::bands::build_bands;
    use crate::utils::Rect;

    fn letters(rects: &[Rect]) -> Vec<Letter> {
        rects
            .iter()
            .enumerate()
            .map(|(source, rect)| Letter {
                source,
                rect: *rect,
            })
            .collect()
    }

    #[test]
    fn only_leftmost_letter_of_a_run_starts() {
        let params = LayoutParams::default();
        let letters = letters(&[
            Rect::new(30, 0, 14, 20),
            Rect::new(10, 0, 14, 20),
            Rect::new(50, 0, 14, 20),
        ]);
        let bands = build_bands(&params, &letters);
        let starts = detect_starts(&params, &letters, &bands);
        assert_eq!(starts, vec![vec![1]]);
    }

    #[test]
    fn gap_bounds_are_inclusive() {
        let params = LayoutParams::default();
        // gap 15: still adjacent; gap 16: a new start
        let letters = letters(&[
            Rect::new(0, 0, 14, 20),
            Rect::new(29, 0, 14, 20),
            Rect::new(59, 0, 14, 20),
        ]);
        let index = NeighbourIndex::new(&letters);
        assert!(index.is_word_start(&params, &letters, 0));
        assert!(!index.is_word_start(&params, &letters, 1));
        assert!(index.is_word_start(&params, &letters, 2));
    }

    #[test]
    fn overlap_of_two_pixels_is_adjacent() {
        let params = LayoutParams::default();
        let letters = letters(&[Rect::new(0, 0, 14, 20), Rect::new(12, 0, 14, 20)]);
        let index = NeighbourIndex::new(&letters);
        assert_eq!(index.left_neighbours(&params, &letters, 1), vec![0]);
    }

    #[test]
    fn neighbour_with_distant_bottom_does_not_count() {
        let params = LayoutParams::default();
        let letters = letters(&[Rect::new(0, 0, 14, 20), Rect::new(20, 6, 14, 40)]);
        let index = NeighbourIndex::new(&letters);
        // bottoms 20 and 46 differ by 26
        assert!(index.is_word_start(&params, &letters, 1));
    }

    #[test]
    fn neighbour_in_another_band_still_counts() {
        let params = LayoutParams::default();
        // A short letter whose band does not touch the taller one beside it.
        let letters = letters(&[Rect::new(0, 40, 14, 5), Rect::new(20, 10, 14, 20)]);
        let bands = build_bands(&params, &letters);
        assert_eq!(bands.len(), 2);
        let starts = detect_starts(&params, &letters, &bands);
        // bottoms 45 and 30 are 15 apart, gap 6
        assert_eq!(starts, vec![vec![], vec![0]]);
    }
}
