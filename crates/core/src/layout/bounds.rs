//! Bounds finalizer: one or more output rectangles per paragraph / math block.
//!
//! The primary band of a group (tallest for math blocks, first for
//! paragraphs) contributes one rectangle per line segment. Segments of the
//! other bands are unioned into those rectangles according to
//! `LayoutParams::match_by_overlap`.

use std::cmp::Reverse;

use tracing::debug;

use crate::utils::Rect;

use super::paragraphs::Grouping;
use super::params::LayoutParams;
use super::types::{
    BandId, BandLines, FinalBounds, HeightBand, Letter, LineKind, LineSegment, Word,
};

/// Read-only view of the per-band structures the finalizer needs.
#[derive(Clone, Copy)]
pub struct BoundsInput<'a> {
    pub letters: &'a [Letter],
    pub words: &'a [Word],
    pub bands: &'a [HeightBand],
    pub lines: &'a [BandLines],
}

impl BoundsInput<'_> {
    /// Rectangle of one segment: from the first start's x to the right edge
    /// of the last start's word, spanning the full band height.
    pub fn segment_rect(&self, band: BandId, segment: &LineSegment) -> Rect {
        let span = self.bands[band].span;
        let lines = &self.lines[band];
        let left = self.letters[lines.starts[segment.start]].rect.x;
        let right = self.words[lines.words[segment.end - 1]].rect.right();
        Rect::from_edges(left, span.top, right, span.bottom)
    }

    fn band_rects(&self, band: BandId) -> impl Iterator<Item = Rect> + '_ {
        self.lines[band]
            .segments
            .iter()
            .filter(|segment| !segment.is_empty())
            .map(move |segment| self.segment_rect(band, segment))
    }

    /// Index within `group` of the band that seeds the output rectangles.
    pub fn primary_band(&self, kind: LineKind, group: &[BandId]) -> usize {
        match kind {
            LineKind::Word => 0,
            LineKind::Math => group
                .iter()
                .enumerate()
                .min_by_key(|&(_, &band)| Reverse(self.bands[band].height()))
                .map(|(idx, _)| idx)
                .unwrap_or(0),
        }
    }
}

/// Output rectangles of one group.
pub fn finalize_group(
    params: &LayoutParams,
    input: &BoundsInput<'_>,
    kind: LineKind,
    group: &[BandId],
) -> Vec<Rect> {
    if group.is_empty() {
        return Vec::new();
    }

    let primary = input.primary_band(kind, group);
    let mut output: Vec<Rect> = input.band_rects(group[primary]).collect();

    for (idx, &band) in group.iter().enumerate() {
        if idx == primary {
            continue;
        }
        for rect in input.band_rects(band) {
            if params.match_by_overlap {
                union_overlapping(&mut output, rect);
            } else {
                for out in output.iter_mut() {
                    *out = out.union(&rect);
                }
            }
        }
    }

    output
}

/// Unions `rect` into every output rectangle it overlaps horizontally, or
/// appends it when it overlaps none.
fn union_overlapping(output: &mut Vec<Rect>, rect: Rect) {
    let mut matched = false;
    for out in output.iter_mut() {
        if out.hoverlaps(&rect) {
            *out = out.union(&rect);
            matched = true;
        }
    }
    if !matched {
        output.push(rect);
    }
}

/// Final rectangles of every math block and paragraph.
pub fn finalize_bounds(
    params: &LayoutParams,
    input: &BoundsInput<'_>,
    grouping: &Grouping,
) -> FinalBounds {
    let mut bounds = FinalBounds::default();
    let groups = [
        (LineKind::Math, &grouping.math_blocks),
        (LineKind::Word, &grouping.paragraphs),
    ];
    for (kind, list) in groups {
        for group in list {
            let rects = finalize_group(params, input, kind, group);
            bounds.get_mut(kind).extend(rects);
        }
    }
    debug!(
        word_blocks = bounds.word.len(),
        math_blocks = bounds.math.len(),
        match_by_overlap = params.match_by_overlap,
        "finalized bounds"
    );
    bounds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::types::{BandSpan, LineLabel};

    struct Fixture {
        letters: Vec<Letter>,
        words: Vec<Word>,
        bands: Vec<HeightBand>,
        lines: Vec<BandLines>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                letters: Vec::new(),
                words: Vec::new(),
                bands: Vec::new(),
                lines: Vec::new(),
            }
        }

        /// Adds a band whose segments are given as `(left, right)` pairs,
        /// each made of a single one-letter word.
        fn band(&mut self, top: i32, bottom: i32, segments: &[(i32, i32)], kind: LineKind) {
            let band = self.bands.len();
            let mut lines = BandLines::default();
            for (i, &(left, right)) in segments.iter().enumerate() {
                let rect = Rect::from_edges(left, top, right, bottom);
                let letter = self.letters.len();
                self.letters.push(Letter {
                    source: letter,
                    rect,
                });
                self.words.push(Word {
                    start: letter,
                    origin: (left, top),
                    rect,
                    letters: vec![letter],
                });
                lines.starts.push(letter);
                lines.words.push(self.words.len() - 1);
                lines.segments.push(LineSegment {
                    label: LineLabel::Classified(kind),
                    ..LineSegment::new(band, i, i + 1)
                });
            }
            self.bands.push(HeightBand {
                span: BandSpan::new(top, bottom),
                letters: lines.starts.clone(),
            });
            self.lines.push(lines);
        }

        fn input(&self) -> BoundsInput<'_> {
            BoundsInput {
                letters: &self.letters,
                words: &self.words,
                bands: &self.bands,
                lines: &self.lines,
            }
        }
    }

    fn two_column_paragraph() -> Fixture {
        let mut f = Fixture::new();
        f.band(0, 20, &[(10, 100), (300, 400)], LineKind::Word);
        f.band(25, 45, &[(5, 90), (310, 420)], LineKind::Word);
        f
    }

    #[test]
    fn segment_rect_spans_band_height() {
        let mut f = Fixture::new();
        f.band(10, 40, &[(0, 30)], LineKind::Word);
        let lines = &f.lines[0];
        let rect = f.input().segment_rect(0, &lines.segments[0]);
        assert_eq!(rect, Rect::from_edges(0, 10, 30, 40));
    }

    #[test]
    fn unconditional_policy_unions_every_segment_everywhere() {
        let f = two_column_paragraph();
        let params = LayoutParams::default();
        let rects = finalize_group(&params, &f.input(), LineKind::Word, &[0, 1]);
        assert_eq!(
            rects,
            vec![Rect::from_edges(5, 0, 420, 45), Rect::from_edges(5, 0, 420, 45)]
        );
    }

    #[test]
    fn overlap_policy_keeps_columns_apart() {
        let f = two_column_paragraph();
        let params = LayoutParams {
            match_by_overlap: true,
            ..LayoutParams::default()
        };
        let rects = finalize_group(&params, &f.input(), LineKind::Word, &[0, 1]);
        assert_eq!(
            rects,
            vec![Rect::from_edges(5, 0, 100, 45), Rect::from_edges(300, 0, 420, 45)]
        );
    }

    #[test]
    fn overlap_policy_appends_unmatched_segment() {
        let mut f = Fixture::new();
        f.band(0, 20, &[(10, 100)], LineKind::Word);
        f.band(25, 45, &[(200, 260)], LineKind::Word);
        let params = LayoutParams {
            match_by_overlap: true,
            ..LayoutParams::default()
        };
        let rects = finalize_group(&params, &f.input(), LineKind::Word, &[0, 1]);
        assert_eq!(
            rects,
            vec![Rect::from_edges(10, 0, 100, 20), Rect::from_edges(200, 25, 260, 45)]
        );
    }

    #[test]
    fn math_primary_is_tallest_band() {
        let mut f = Fixture::new();
        f.band(0, 20, &[(10, 50), (60, 90)], LineKind::Math);
        f.band(24, 84, &[(20, 70)], LineKind::Math);
        f.band(88, 148, &[(0, 40), (50, 60)], LineKind::Math);
        let input = f.input();
        // first of the two tallest bands
        assert_eq!(input.primary_band(LineKind::Math, &[0, 1, 2]), 1);
        assert_eq!(input.primary_band(LineKind::Word, &[0, 1, 2]), 0);

        let rects = finalize_group(&LayoutParams::default(), &input, LineKind::Math, &[0, 1, 2]);
        assert_eq!(rects, vec![Rect::from_edges(0, 0, 90, 148)]);
    }

    #[test]
    fn math_blocks_come_first() {
        let mut f = Fixture::new();
        f.band(0, 20, &[(10, 100)], LineKind::Word);
        f.band(40, 100, &[(30, 60)], LineKind::Math);
        let grouping = Grouping {
            paragraphs: vec![vec![0]],
            math_blocks: vec![vec![1]],
            attachments: Vec::new(),
        };
        let bounds = finalize_bounds(&LayoutParams::default(), &f.input(), &grouping);
        assert_eq!(bounds.word, vec![Rect::from_edges(10, 0, 100, 20)]);
        assert_eq!(bounds.math, vec![Rect::from_edges(30, 40, 60, 100)]);
        let kinds: Vec<LineKind> = bounds.blocks().iter().map(|b| b.kind).collect();
        assert_eq!(kinds, vec![LineKind::Math, LineKind::Word]);
    }
}
