//! JSON converter: serializes a condensed report of an analysis.

use std::io::Write;

use serde::Serialize;

use crate::error::Result;
use crate::layout::{Analysis, BandSpan, FinalBlock, GroupAttachment, LineKind, LineLabel};
use crate::utils::Rect;

/// Counts of every pipeline stage's output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub boxes: usize,
    pub letters: usize,
    pub bands: usize,
    pub words: usize,
    pub segments: usize,
    pub paragraphs: usize,
    pub math_blocks: usize,
}

/// A labelled segment with its rectangle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentReport {
    pub band: usize,
    pub start: usize,
    pub end: usize,
    pub label: LineLabel,
    pub likely_words: usize,
    pub rect: Rect,
}

/// Serializable summary of one analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub source: String,
    pub counts: Counts,
    pub largest_box: Option<Rect>,
    pub bands: Vec<BandSpan>,
    pub words: Vec<Rect>,
    pub segments: Vec<SegmentReport>,
    pub paragraphs: Vec<Vec<usize>>,
    pub math_blocks: Vec<Vec<usize>>,
    pub attachments: Vec<GroupAttachment>,
    pub blocks: Vec<FinalBlock>,
}

impl Report {
    pub fn new(source: &str, analysis: &Analysis) -> Self {
        let segments: Vec<SegmentReport> = analysis
            .segments()
            .map(|segment| SegmentReport {
                band: segment.band,
                start: segment.start,
                end: segment.end,
                label: segment.label,
                likely_words: segment.likely_words,
                rect: analysis.segment_rect(segment),
            })
            .collect();

        Self {
            source: source.to_string(),
            counts: Counts {
                boxes: analysis.boxes.len(),
                letters: analysis.letters.len(),
                bands: analysis.bands.len(),
                words: analysis.words.len(),
                segments: segments.len(),
                paragraphs: analysis.grouping.paragraphs.len(),
                math_blocks: analysis.grouping.math_blocks.len(),
            },
            largest_box: analysis.largest_box,
            bands: analysis.band_spans().collect(),
            words: analysis.word_rects().collect(),
            segments,
            paragraphs: analysis.grouping.paragraphs.clone(),
            math_blocks: analysis.grouping.math_blocks.clone(),
            attachments: analysis.grouping.attachments.clone(),
            blocks: analysis.final_blocks(),
        }
    }

    /// Final rectangles of one kind, in report order.
    pub fn blocks_of(&self, kind: LineKind) -> impl Iterator<Item = &Rect> + '_ {
        self.blocks
            .iter()
            .filter(move |b| b.kind == kind)
            .map(|b| &b.rect)
    }
}

/// Writes one JSON document per analysis, pretty-printed.
pub struct JsonConverter<'a, W: Write> {
    outfp: &'a mut W,
}

impl<'a, W: Write> JsonConverter<'a, W> {
    pub fn new(outfp: &'a mut W) -> Self {
        Self { outfp }
    }

    pub fn receive_analysis(&mut self, name: &str, analysis: &Analysis) -> Result<()> {
        let report = Report::new(name, analysis);
        serde_json::to_writer_pretty(&mut *self.outfp, &report)?;
        writeln!(self.outfp)?;
        Ok(())
    }
}
