//! Height bands: vertical intervals that collect the letters of one row.

use serde::Serialize;

use super::word::LetterId;

/// Index of a band in `Analysis::bands`, which is ordered top to bottom.
pub type BandId = usize;

/// Half-open vertical interval `[top, bottom)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BandSpan {
    pub top: i32,
    pub bottom: i32,
}

impl BandSpan {
    pub const fn new(top: i32, bottom: i32) -> Self {
        Self { top, bottom }
    }

    #[inline]
    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// True when the two half-open intervals share at least one ordinate.
    #[inline]
    pub const fn overlaps(&self, other: &BandSpan) -> bool {
        self.top < other.bottom && other.top < self.bottom
    }

    pub fn union(&self, other: &BandSpan) -> BandSpan {
        BandSpan {
            top: self.top.min(other.top),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Distance from the bottom of `above` to the top of `self`.
    ///
    /// Negative when the spans overlap.
    #[inline]
    pub const fn gap_below(&self, above: &BandSpan) -> i32 {
        self.top - above.bottom
    }
}

/// A row candidate: a band key and the letters that intersect it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeightBand {
    pub span: BandSpan,
    /// Member letters in input order.
    pub letters: Vec<LetterId>,
}

impl HeightBand {
    pub fn new(span: BandSpan, first: LetterId) -> Self {
        Self {
            span,
            letters: vec![first],
        }
    }

    pub fn height(&self) -> i32 {
        self.span.height()
    }
}
