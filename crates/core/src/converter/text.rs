//! Text converter: one line per band, group and final block.

use std::io::Write;

use crate::error::Result;
use crate::layout::{Analysis, BandLines, LineSegment};
use crate::utils::Rect;

/// Writes a plain-text summary of an analysis.
pub struct TextConverter<'a, W: Write> {
    /// Output writer
    outfp: &'a mut W,
    /// Whether to list every band with its segments
    show_bands: bool,
}

impl<'a, W: Write> TextConverter<'a, W> {
    pub fn new(outfp: &'a mut W, show_bands: bool) -> Self {
        Self { outfp, show_bands }
    }

    /// Renders one analysis, prefixed by `name`.
    pub fn receive_analysis(&mut self, name: &str, analysis: &Analysis) -> Result<()> {
        writeln!(self.outfp, "# {name}")?;
        writeln!(
            self.outfp,
            "boxes {} letters {} bands {} words {}",
            analysis.boxes.len(),
            analysis.letters.len(),
            analysis.bands.len(),
            analysis.words.len()
        )?;
        if let Some(rect) = analysis.largest_box {
            writeln!(self.outfp, "largest {}", format_rect(&rect))?;
        }

        if self.show_bands {
            for (band, lines) in analysis.bands.iter().zip(&analysis.lines) {
                writeln!(
                    self.outfp,
                    "band [{}, {}) {}",
                    band.span.top,
                    band.span.bottom,
                    format_segments(lines)
                )?;
            }
        }

        for (idx, group) in analysis.grouping.paragraphs.iter().enumerate() {
            writeln!(self.outfp, "paragraph {idx}: bands {}", format_ids(group))?;
        }
        for (idx, group) in analysis.grouping.math_blocks.iter().enumerate() {
            writeln!(self.outfp, "math block {idx}: bands {}", format_ids(group))?;
        }

        for block in analysis.final_blocks() {
            writeln!(self.outfp, "{} {}", block.kind.as_str(), format_rect(&block.rect))?;
        }
        Ok(())
    }
}

fn format_rect(rect: &Rect) -> String {
    format!("{},{} {}x{}", rect.x, rect.y, rect.w, rect.h)
}

fn format_ids(ids: &[usize]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_segment(segment: &LineSegment) -> String {
    let label = segment.kind().map_or("?", |kind| kind.as_str());
    format!("{label}[{}..{})", segment.start, segment.end)
}

fn format_segments(lines: &BandLines) -> String {
    if lines.segments.is_empty() {
        return "-".to_string();
    }
    lines
        .segments
        .iter()
        .map(format_segment)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutParams;

    fn render(analysis: &Analysis, show_bands: bool) -> String {
        let mut out = Vec::new();
        TextConverter::new(&mut out, show_bands)
            .receive_analysis("page", analysis)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn empty_analysis_has_only_counts() {
        let analysis = Analysis::run(&LayoutParams::default(), Vec::new()).unwrap();
        assert_eq!(
            render(&analysis, true),
            "# page\nboxes 0 letters 0 bands 0 words 0\n"
        );
    }

    #[test]
    fn lone_box_is_a_math_block() {
        let analysis =
            Analysis::run(&LayoutParams::default(), vec![Rect::new(10, 10, 30, 50)]).unwrap();
        let text = render(&analysis, false);
        assert!(text.contains("math block 0: bands 0\n"));
        assert!(text.ends_with("MATH 10,10 30x50\n"));
    }
}
