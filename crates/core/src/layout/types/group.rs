//! Paragraph / math block grouping and final bounds.

use serde::Serialize;

use crate::utils::Rect;

use super::band::BandId;
use super::line::LineKind;

/// A paragraph or math block, by index into its group list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "group", content = "index", rename_all = "snake_case")]
pub enum GroupRef {
    Paragraph(usize),
    MathBlock(usize),
}

/// How a band came to belong to a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Attachment {
    /// The band opened a new group.
    Started,
    /// The band continued the group of the band above.
    Continued,
    /// A MATH band folded into the paragraph above as an inline formula.
    Embedded,
}

/// One band-to-group membership event.
///
/// A band emits one event per branch it takes, so a band holding both WORD
/// and MATH segments can appear in a paragraph and a math block at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GroupAttachment {
    pub band: BandId,
    pub group: GroupRef,
    pub attachment: Attachment,
}

/// One output rectangle of a paragraph or math block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FinalBlock {
    pub kind: LineKind,
    pub rect: Rect,
}

/// Final rectangles by kind.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FinalBounds {
    pub word: Vec<Rect>,
    pub math: Vec<Rect>,
}

impl FinalBounds {
    pub fn get(&self, kind: LineKind) -> &[Rect] {
        match kind {
            LineKind::Word => &self.word,
            LineKind::Math => &self.math,
        }
    }

    pub(crate) fn get_mut(&mut self, kind: LineKind) -> &mut Vec<Rect> {
        match kind {
            LineKind::Word => &mut self.word,
            LineKind::Math => &mut self.math,
        }
    }

    pub fn len(&self) -> usize {
        self.word.len() + self.math.len()
    }

    pub fn is_empty(&self) -> bool {
        self.word.is_empty() && self.math.is_empty()
    }

    /// All blocks, math blocks first.
    pub fn blocks(&self) -> Vec<FinalBlock> {
        let math = self.math.iter().map(|rect| FinalBlock {
            kind: LineKind::Math,
            rect: *rect,
        });
        let word = self.word.iter().map(|rect| FinalBlock {
            kind: LineKind::Word,
            rect: *rect,
        });
        math.chain(word).collect()
    }
}
