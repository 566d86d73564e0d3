//! The analysis run: every pipeline stage, executed once over a box list.
//!
//! `Analysis` owns all structures one run produces. It is plain data, so a
//! finished run can be shared with other threads behind an `Arc`; a new input
//! always produces a new `Analysis` rather than updating an old one.

use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::{debug, debug_span};

use crate::error::{LayoutError, Result};
use crate::input::largest_box;
use crate::utils::Rect;

use super::bands::{build_bands, letter_bands};
use super::bounds::{BoundsInput, finalize_bounds};
use super::letters::classify_letters;
use super::lines::build_lines;
use super::paragraphs::{Grouping, merge_paragraphs};
use super::params::LayoutParams;
use super::starts::detect_starts;
use super::types::{
    BandId, BandLines, BandSpan, FinalBlock, FinalBounds, HeightBand, Letter, LetterId, LineKind,
    LineSegment, Word, WordId,
};
use super::words::assemble_words;

/// Result of one full pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub params: LayoutParams,
    /// Every input box, letter-like or not.
    pub boxes: Vec<Rect>,
    /// The input box with the largest area.
    pub largest_box: Option<Rect>,
    pub letters: Vec<Letter>,
    /// Height bands ordered top to bottom; `BandId` indexes this list.
    pub bands: Vec<HeightBand>,
    /// Word starts per band, in band member order.
    pub starts: Vec<Vec<LetterId>>,
    pub words: Vec<Word>,
    /// Sorted starts, their words and classified segments, per band.
    pub lines: Vec<BandLines>,
    pub grouping: Grouping,
    pub final_bounds: FinalBounds,
}

impl Analysis {
    /// Runs the whole pipeline over `boxes`.
    pub fn run(params: &LayoutParams, boxes: Vec<Rect>) -> Result<Self> {
        params.validate()?;
        if let Some((index, rect)) = boxes.iter().enumerate().find(|(_, r)| !r.in_range()) {
            return Err(LayoutError::BoxOutOfRange { index, rect: *rect });
        }

        let span = debug_span!("analysis", boxes = boxes.len());
        let _guard = span.enter();

        let letters = classify_letters(params, &boxes);
        let bands = build_bands(params, &letters);
        let starts = detect_starts(params, &letters, &bands);
        let (words, band_words) = assemble_words(params, &letters, &bands, &starts);
        let lines = build_lines(params, &letters, &starts, &words, &band_words);
        let grouping = merge_paragraphs(params, &bands, &lines);
        let final_bounds = {
            let input = BoundsInput {
                letters: &letters,
                words: &words,
                bands: &bands,
                lines: &lines,
            };
            finalize_bounds(params, &input, &grouping)
        };

        debug!(
            letters = letters.len(),
            bands = bands.len(),
            words = words.len(),
            blocks = final_bounds.len(),
            "analysis finished"
        );

        Ok(Self {
            params: params.clone(),
            largest_box: largest_box(&boxes),
            boxes,
            letters,
            bands,
            starts,
            words,
            lines,
            grouping,
            final_bounds,
        })
    }

    /// Word rectangles, one per detected word.
    pub fn word_rects(&self) -> impl Iterator<Item = Rect> + '_ {
        self.words.iter().map(|w| w.rect)
    }

    /// Band intervals, top to bottom.
    pub fn band_spans(&self) -> impl Iterator<Item = BandSpan> + '_ {
        self.bands.iter().map(|b| b.span)
    }

    /// Paragraphs as lists of band intervals.
    pub fn paragraph_spans(&self) -> Vec<Vec<BandSpan>> {
        self.spans_of(&self.grouping.paragraphs)
    }

    /// Math blocks as lists of band intervals.
    pub fn math_block_spans(&self) -> Vec<Vec<BandSpan>> {
        self.spans_of(&self.grouping.math_blocks)
    }

    fn spans_of(&self, groups: &[Vec<BandId>]) -> Vec<Vec<BandSpan>> {
        groups
            .iter()
            .map(|group| group.iter().map(|&band| self.bands[band].span).collect())
            .collect()
    }

    /// Final rectangles of one kind.
    pub fn final_rects(&self, kind: LineKind) -> &[Rect] {
        self.final_bounds.get(kind)
    }

    /// All final blocks, math blocks first.
    pub fn final_blocks(&self) -> Vec<FinalBlock> {
        self.final_bounds.blocks()
    }

    /// Band each letter was placed in.
    pub fn letter_bands(&self) -> Vec<Option<BandId>> {
        letter_bands(&self.bands, self.letters.len())
    }

    /// Words each letter belongs to. A letter may be absorbed by more than
    /// one word when two starts grow over it.
    pub fn letter_words(&self) -> FxHashMap<LetterId, Vec<WordId>> {
        let mut map: FxHashMap<LetterId, Vec<WordId>> = FxHashMap::default();
        for (word_id, word) in self.words.iter().enumerate() {
            for &letter in &word.letters {
                map.entry(letter).or_default().push(word_id);
            }
        }
        map
    }

    /// Word started by `letter`, if it is a start.
    pub fn word_started_by(&self, letter: LetterId) -> Option<&Word> {
        self.words.iter().find(|w| w.start == letter)
    }

    /// All classified segments, band by band.
    pub fn segments(&self) -> impl Iterator<Item = &LineSegment> + '_ {
        self.lines.iter().flat_map(|l| &l.segments)
    }

    /// Rectangle of a segment, as the bounds finalizer computes it.
    pub fn segment_rect(&self, segment: &LineSegment) -> Rect {
        BoundsInput {
            letters: &self.letters,
            words: &self.words,
            bands: &self.bands,
            lines: &self.lines,
        }
        .segment_rect(segment.band, segment)
    }
}
