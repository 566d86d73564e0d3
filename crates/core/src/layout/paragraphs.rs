//! Paragraph merger: chains consecutive bands into paragraphs and math blocks.
//!
//! Bands are walked top to bottom. A band holding a MATH segment either
//! folds into the paragraph above as an inline formula, continues the math
//! block above, or opens a new math block. A band holding a WORD segment
//! either continues the paragraph above or opens a new one. A band holding
//! both kinds runs both branches and can end up in two groups.
//!
//! Thresholds use integer division, e.g. `gap < height / 3`.

use tracing::{debug, trace};

use super::params::LayoutParams;
use super::types::{
    Attachment, BandId, BandLines, BandSpan, GroupAttachment, GroupRef, HeightBand, LineKind,
};

/// Output of the paragraph merger.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct Grouping {
    /// Paragraphs, each an ordered list of bands.
    pub paragraphs: Vec<Vec<BandId>>,
    /// Math blocks, each an ordered list of bands.
    pub math_blocks: Vec<Vec<BandId>>,
    /// Every band-to-group attachment, in walk order.
    pub attachments: Vec<GroupAttachment>,
}

impl Grouping {
    /// Groups a band was attached to.
    pub fn groups_of(&self, band: BandId) -> impl Iterator<Item = GroupRef> + '_ {
        self.attachments
            .iter()
            .filter(move |a| a.band == band)
            .map(|a| a.group)
    }

    fn open_paragraph(&mut self, band: BandId) {
        self.paragraphs.push(vec![band]);
        self.attach(band, GroupRef::Paragraph(self.paragraphs.len() - 1), Attachment::Started);
    }

    fn extend_paragraph(&mut self, band: BandId, how: Attachment) {
        let idx = self.paragraphs.len() - 1;
        self.paragraphs[idx].push(band);
        self.attach(band, GroupRef::Paragraph(idx), how);
    }

    fn open_math_block(&mut self, band: BandId) {
        self.math_blocks.push(vec![band]);
        self.attach(band, GroupRef::MathBlock(self.math_blocks.len() - 1), Attachment::Started);
    }

    fn extend_math_block(&mut self, band: BandId) {
        let idx = self.math_blocks.len() - 1;
        self.math_blocks[idx].push(band);
        self.attach(band, GroupRef::MathBlock(idx), Attachment::Continued);
    }

    fn attach(&mut self, band: BandId, group: GroupRef, attachment: Attachment) {
        trace!(band, ?group, ?attachment, "band attached");
        self.attachments.push(GroupAttachment {
            band,
            group,
            attachment,
        });
    }
}

/// Walk state carried from one band to the next.
#[derive(Debug, Default)]
struct Walk {
    previous: Option<BandSpan>,
    previous_is_word: bool,
    previous_is_math: bool,
}

/// Merges classified bands into paragraphs and math blocks.
///
/// `bands` must be ordered by ascending top, which `build_bands` guarantees;
/// `lines` is parallel to `bands`.
pub fn merge_paragraphs(
    params: &LayoutParams,
    bands: &[HeightBand],
    lines: &[BandLines],
) -> Grouping {
    let mut grouping = Grouping::default();
    let mut walk = Walk::default();

    for (band, (height_band, band_lines)) in bands.iter().zip(lines).enumerate() {
        let span = height_band.span;
        let height = span.height();

        if band_lines.has_kind(LineKind::Math) {
            match walk.previous {
                Some(prev)
                    if walk.previous_is_word
                        && span.gap_below(&prev) < prev.height() / params.embedded_math_gap_divisor =>
                {
                    grouping.extend_paragraph(band, Attachment::Embedded);
                    walk.previous_is_math = false;
                }
                Some(prev)
                    if walk.previous_is_math && continues_math_block(params, span, prev) =>
                {
                    grouping.extend_math_block(band);
                }
                _ => {
                    grouping.open_math_block(band);
                    walk.previous_is_word = false;
                    walk.previous_is_math = true;
                }
            }
        }

        if band_lines.has_kind(LineKind::Word) {
            match walk.previous {
                Some(prev)
                    if walk.previous_is_word
                        && !grouping.paragraphs.is_empty()
                        && span.gap_below(&prev) < height / params.paragraph_gap_divisor =>
                {
                    grouping.extend_paragraph(band, Attachment::Continued);
                    walk.previous_is_math = false;
                }
                _ => {
                    grouping.open_paragraph(band);
                    walk.previous_is_word = true;
                    walk.previous_is_math = false;
                }
            }
        }

        walk.previous = Some(span);
    }

    debug!(
        paragraphs = grouping.paragraphs.len(),
        math_blocks = grouping.math_blocks.len(),
        "merged paragraphs"
    );
    grouping
}

/// Math continuation: close below the previous band and of clearly
/// different height, both relative to the taller of the two.
fn continues_math_block(params: &LayoutParams, span: BandSpan, prev: BandSpan) -> bool {
    let primary = span.height().max(prev.height());
    span.gap_below(&prev) < primary / params.math_chain_gap_divisor
        && (span.height() - prev.height()).abs() > primary / params.math_height_divisor
}
