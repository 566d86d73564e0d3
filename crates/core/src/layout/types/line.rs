//! Line segments and their WORD / MATH labels.

use serde::Serialize;

use super::band::BandId;
use super::word::{LetterId, WordId};

/// Final kind of a classified line, paragraph or block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LineKind {
    Word,
    Math,
}

impl LineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineKind::Word => "WORD",
            LineKind::Math => "MATH",
        }
    }
}

/// Label of a line segment; segments start undetermined until classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineLabel {
    #[default]
    Undetermined,
    Classified(LineKind),
}

impl LineLabel {
    pub fn kind(&self) -> Option<LineKind> {
        match self {
            LineLabel::Undetermined => None,
            LineLabel::Classified(kind) => Some(*kind),
        }
    }
}

/// A run `[start, end)` of sorted word starts within one band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineSegment {
    pub band: BandId,
    pub start: usize,
    pub end: usize,
    pub label: LineLabel,
    /// Starts whose word passed the word-likeness test.
    pub likely_words: usize,
    /// Likely words whose rectangle overlaps a sibling word in the band.
    pub overlapping_words: usize,
}

impl LineSegment {
    pub fn new(band: BandId, start: usize, end: usize) -> Self {
        Self {
            band,
            start,
            end,
            label: LineLabel::Undetermined,
            likely_words: 0,
            overlapping_words: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }

    pub fn kind(&self) -> Option<LineKind> {
        self.label.kind()
    }
}

/// Sorted word starts of one band and the segments cut from them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct BandLines {
    /// Word starts ordered by ascending x, ties in discovery order.
    pub starts: Vec<LetterId>,
    /// Word of each start, parallel to `starts`.
    pub words: Vec<WordId>,
    pub segments: Vec<LineSegment>,
}

impl BandLines {
    pub fn has_kind(&self, kind: LineKind) -> bool {
        self.segments.iter().any(|s| s.kind() == Some(kind))
    }
}
