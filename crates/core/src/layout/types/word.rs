//! Letter and word types.

use serde::Serialize;

use crate::utils::{HasBBox, Rect};

/// Index of a letter in `Analysis::letters`.
pub type LetterId = usize;

/// Index of a word in `Analysis::words`.
pub type WordId = usize;

/// A box accepted by the letter classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Letter {
    /// Row of the box in the raw input table (0-based, header excluded).
    pub source: usize,
    pub rect: Rect,
}

impl HasBBox for Letter {
    fn x0(&self) -> i32 {
        self.rect.x
    }
    fn y0(&self) -> i32 {
        self.rect.y
    }
    fn x1(&self) -> i32 {
        self.rect.right()
    }
    fn y1(&self) -> i32 {
        self.rect.bottom()
    }
}

/// A start letter grown rightwards over adjacent letters.
///
/// `letters` always holds at least the start letter, which comes first;
/// absorbed letters follow in absorption order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Word {
    pub start: LetterId,
    /// `(x, y)` of the start letter, the key words are looked up by in
    /// diagnostic output.
    pub origin: (i32, i32),
    pub rect: Rect,
    pub letters: Vec<LetterId>,
}

impl Word {
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }
}

impl HasBBox for Word {
    fn x0(&self) -> i32 {
        self.rect.x
    }
    fn y0(&self) -> i32 {
        self.rect.y
    }
    fn x1(&self) -> i32 {
        self.rect.right()
    }
    fn y1(&self) -> i32 {
        self.rect.bottom()
    }
}
