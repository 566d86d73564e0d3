//! Box fixtures shared by the integration tests.

#![allow(dead_code)]

use boxlayout_core::utils::Rect;

pub const GLYPH_W: i32 = 16;
pub const GLYPH_H: i32 = 24;

/// Glyphs of one text row starting at `left`: `words` words of `letters`
/// glyphs, 2px apart inside a word and 42px apart between words.
pub fn text_row(left: i32, top: i32, words: usize, letters: usize) -> Vec<Rect> {
    let mut rects = Vec::with_capacity(words * letters);
    let mut x = left;
    for _ in 0..words {
        for _ in 0..letters {
            rects.push(Rect::new(x, top, GLYPH_W, GLYPH_H));
            x += GLYPH_W + 2;
        }
        x += 40;
    }
    rects
}

/// Two text rows forming one paragraph, followed by a display formula.
///
/// Bands: `[100, 124)` and `[130, 154)` with four 4-glyph words each, then a
/// lone 30x50 box at `(100, 200)`.
pub fn page() -> Vec<Rect> {
    let mut rects = text_row(20, 100, 4, 4);
    rects.extend(text_row(20, 130, 4, 4));
    rects.push(Rect::new(100, 200, 30, 50));
    rects
}

/// Two text rows, each holding one word at x=20 and one at x=600.
pub fn two_columns() -> Vec<Rect> {
    let mut rects = Vec::new();
    for top in [100, 130] {
        rects.extend(text_row(20, top, 1, 4));
        rects.extend(text_row(600, top, 1, 4));
    }
    rects
}

/// Renders boxes as a box table with a header row.
pub fn to_table(rects: &[Rect]) -> String {
    let mut table = String::from("level,page,block,par,line,left,top,width,height,conf\n");
    for r in rects {
        table.push_str(&format!("5,1,1,1,1,{},{},{},{},90\n", r.x, r.y, r.w, r.h));
    }
    table
}
