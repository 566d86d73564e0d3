//! Row sorter, line segmenter and line classifier.
//!
//! Each band's word starts are ordered left to right and cut into line
//! segments wherever the gap between consecutive words is large relative to
//! the running mean word width. Every segment is then labelled WORD or MATH
//! by counting the words that look like ordinary text.

use itertools::Itertools;
use tracing::{debug, trace};

use crate::utils::HasBBox;

use super::params::LayoutParams;
use super::types::{
    BandId, BandLines, Letter, LetterId, LineKind, LineLabel, LineSegment, Word, WordId,
};

/// Orders starts and their words by ascending start x; ties keep discovery order.
pub fn sort_starts(
    letters: &[Letter],
    starts: &[LetterId],
    words: &[WordId],
) -> (Vec<LetterId>, Vec<WordId>) {
    starts
        .iter()
        .copied()
        .zip(words.iter().copied())
        .sorted_by_key(|&(start, _)| letters[start].rect.x)
        .unzip()
}

/// Splits sorted starts into undetermined segments.
///
/// A segment begins at index 0 and at every `i` where the gap between word
/// `i - 1`'s right edge and word `i`'s left edge exceeds `line_gap_factor`
/// times the mean width of words `0..=i`.
pub fn segment_band(
    params: &LayoutParams,
    band: BandId,
    sorted_words: &[WordId],
    words: &[Word],
) -> Vec<LineSegment> {
    let mut boundaries = Vec::new();
    let mut mean_width = 0.0;

    for (i, &word_id) in sorted_words.iter().enumerate() {
        let word = &words[word_id];
        mean_width = (mean_width * i as f64 + f64::from(word.width())) / (i + 1) as f64;

        if i == 0 {
            boundaries.push(0);
            continue;
        }

        let previous = &words[sorted_words[i - 1]];
        let gap = f64::from(word.x0() - previous.x1());
        if gap > mean_width * params.line_gap_factor {
            trace!(band, index = i, gap, mean_width, "line break");
            boundaries.push(i);
        }
    }

    boundaries
        .iter()
        .enumerate()
        .map(|(k, &start)| {
            let end = boundaries.get(k + 1).copied().unwrap_or(sorted_words.len());
            LineSegment::new(band, start, end)
        })
        .collect()
}

/// Word-likeness test over the letters of one word.
///
/// Fewer than three letters never form a word. Otherwise the letters form a
/// word when the population variance of their tops or of their bottoms is
/// below `max_position_variance`, or when more than half of them share a
/// height partition.
///
/// Partitions are keyed by a seed top. A letter is counted in every
/// partition whose seed is within `partition_tolerance` of the first
/// letter's height; a letter matching none seeds a new, empty partition and
/// is not counted in it.
pub fn is_word(params: &LayoutParams, letters: &[Letter], members: &[LetterId]) -> bool {
    let Some(&first) = members.first() else {
        return false;
    };
    if members.len() < 3 {
        return false;
    }

    let n = members.len() as f64;
    let tops: Vec<f64> = members.iter().map(|&id| f64::from(letters[id].rect.y)).collect();
    let bottoms: Vec<f64> = members
        .iter()
        .map(|&id| f64::from(letters[id].rect.bottom()))
        .collect();

    let variance = |values: &[f64]| {
        let mean = values.iter().sum::<f64>() / n;
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n
    };

    let threshold = f64::from(letters[first].rect.h) * params.partition_tolerance;
    let mut partitions: Vec<(f64, usize)> = Vec::new();
    for &top in &tops {
        let mut matched = false;
        for (seed, count) in partitions.iter_mut() {
            if (top - *seed).abs() < threshold {
                *count += 1;
                matched = true;
            }
        }
        if !matched {
            partitions.push((top, 0));
        }
    }
    let largest = partitions.iter().map(|&(_, count)| count).max().unwrap_or(0);

    variance(&tops) < params.max_position_variance
        || variance(&bottoms) < params.max_position_variance
        || largest > members.len() / 2
}

/// Line kind for `likely` word-like entries out of `total`.
pub fn classify_counts(likely: usize, total: usize) -> LineKind {
    if (likely >= 4 && likely * 2 > total) || (likely >= 1 && likely * 5 > total) {
        LineKind::Word
    } else {
        LineKind::Math
    }
}

/// Labels one segment of a band.
///
/// Every word passing `is_word` counts as likely, whether or not its
/// rectangle overlaps a sibling word; overlaps are only tallied.
pub fn classify_segment(
    params: &LayoutParams,
    letters: &[Letter],
    words: &[Word],
    band_words: &[WordId],
    segment: &mut LineSegment,
) {
    let mut likely = 0;
    let mut overlapping = 0;

    for j in segment.start..segment.end {
        let word = &words[band_words[j]];
        if !is_word(params, letters, &word.letters) {
            continue;
        }
        likely += 1;

        let overlaps_sibling = band_words
            .iter()
            .enumerate()
            .any(|(k, &other)| k != j && word.rect.intersects(&words[other].rect));
        if overlaps_sibling {
            overlapping += 1;
        }
    }

    segment.likely_words = likely;
    segment.overlapping_words = overlapping;
    segment.label = LineLabel::Classified(classify_counts(likely, segment.len()));
}

/// Sorts, segments and classifies every band.
pub fn build_lines(
    params: &LayoutParams,
    letters: &[Letter],
    starts: &[Vec<LetterId>],
    words: &[Word],
    band_words: &[Vec<WordId>],
) -> Vec<BandLines> {
    let lines: Vec<BandLines> = starts
        .iter()
        .zip(band_words)
        .enumerate()
        .map(|(band, (band_starts, word_ids))| {
            let (starts, words_sorted) = sort_starts(letters, band_starts, word_ids);
            let mut segments = segment_band(params, band, &words_sorted, words);
            for segment in &mut segments {
                classify_segment(params, letters, words, &words_sorted, segment);
            }
            BandLines {
                starts,
                words: words_sorted,
                segments,
            }
        })
        .collect();

    let (word_lines, math_lines) = lines
        .iter()
        .flat_map(|l| &l.segments)
        .fold((0, 0), |(w, m), s| match s.kind() {
            Some(LineKind::Word) => (w + 1, m),
            Some(LineKind::Math) => (w, m + 1),
            None => (w, m),
        });
    debug!(word_lines, math_lines, "classified line segments");
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Rect;

    fn letters(rects: &[Rect]) -> Vec<Letter> {
        rects
            .iter()
            .enumerate()
            .map(|(source, rect)| Letter {
                source,
                rect: *rect,
            })
            .collect()
    }

    fn single_letter_word(id: LetterId, rect: Rect) -> Word {
        Word {
            start: id,
            origin: (rect.x, rect.y),
            rect,
            letters: vec![id],
        }
    }

    #[test]
    fn classification_boundaries() {
        assert_eq!(classify_counts(4, 4), LineKind::Word);
        assert_eq!(classify_counts(4, 7), LineKind::Word);
        assert_eq!(classify_counts(4, 8), LineKind::Word); // 5k = 20 > 8
        assert_eq!(classify_counts(1, 4), LineKind::Word);
        assert_eq!(classify_counts(1, 5), LineKind::Math);
        assert_eq!(classify_counts(1, 6), LineKind::Math);
        assert_eq!(classify_counts(0, 1), LineKind::Math);
        assert_eq!(classify_counts(4, 21), LineKind::Math);
    }

    #[test]
    fn short_words_are_never_words() {
        let params = LayoutParams::default();
        let letters = letters(&[Rect::new(0, 0, 14, 20), Rect::new(16, 0, 14, 20)]);
        assert!(!is_word(&params, &letters, &[0, 1]));
        assert!(!is_word(&params, &letters, &[]));
    }

    #[test]
    fn aligned_letters_are_a_word() {
        let params = LayoutParams::default();
        let letters = letters(&[
            Rect::new(0, 10, 14, 20),
            Rect::new(16, 12, 14, 18),
            Rect::new(32, 4, 14, 26),
        ]);
        // bottoms all 30
        assert!(is_word(&params, &letters, &[0, 1, 2]));
    }

    #[test]
    fn scattered_letters_are_not_a_word() {
        let params = LayoutParams::default();
        let letters = letters(&[
            Rect::new(0, 0, 14, 20),
            Rect::new(16, 30, 14, 40),
            Rect::new(32, 80, 14, 20),
        ]);
        assert!(!is_word(&params, &letters, &[0, 1, 2]));
    }

    #[test]
    fn majority_partition_makes_a_word() {
        let params = LayoutParams::default();
        // tops 1, 2, 3 join the partition seeded by 0 (threshold 0.2 * 20 = 4)
        let letters = letters(&[
            Rect::new(0, 0, 14, 20),
            Rect::new(16, 1, 14, 60),
            Rect::new(32, 2, 14, 10),
            Rect::new(48, 3, 14, 40),
            Rect::new(64, 60, 14, 30),
        ]);
        assert!(is_word(&params, &letters, &[0, 1, 2, 3, 4]));
    }

    #[test]
    fn partition_seed_is_not_counted() {
        let params = LayoutParams::default();
        // tops 0, 0, 100: the seed partition holds one letter, not more than 3 / 2
        let letters = letters(&[
            Rect::new(0, 0, 14, 20),
            Rect::new(16, 0, 14, 40),
            Rect::new(32, 100, 14, 20),
        ]);
        assert!(!is_word(&params, &letters, &[0, 1, 2]));
    }

    #[test]
    fn letter_counts_in_every_close_partition() {
        let params = LayoutParams::default();
        // threshold 4, seeds 0 and 5: top 3 counts in both, so partition 5
        // holds 3, 7 and 6 and 3 > 5 / 2
        let letters = letters(&[
            Rect::new(0, 0, 14, 20),
            Rect::new(16, 5, 14, 60),
            Rect::new(32, 3, 14, 10),
            Rect::new(48, 7, 14, 45),
            Rect::new(64, 6, 14, 30),
        ]);
        assert!(is_word(&params, &letters, &[0, 1, 2, 3, 4]));
    }

    #[test]
    fn sort_is_stable_on_equal_x() {
        let letters = letters(&[
            Rect::new(50, 0, 14, 20),
            Rect::new(10, 0, 14, 20),
            Rect::new(10, 5, 14, 20),
        ]);
        let (starts, words) = sort_starts(&letters, &[0, 1, 2], &[7, 8, 9]);
        assert_eq!(starts, vec![1, 2, 0]);
        assert_eq!(words, vec![8, 9, 7]);
    }

    #[test]
    fn large_gap_splits_segments() {
        let params = LayoutParams::default();
        let rects = [
            Rect::new(0, 0, 20, 20),
            Rect::new(30, 0, 20, 20),
            Rect::new(400, 0, 20, 20),
        ];
        let words: Vec<Word> = rects
            .iter()
            .enumerate()
            .map(|(id, r)| single_letter_word(id, *r))
            .collect();
        let segments = segment_band(&params, 0, &[0, 1, 2], &words);
        let bounds: Vec<(usize, usize)> = segments.iter().map(|s| (s.start, s.end)).collect();
        // gap 350 > 6 * 20
        assert_eq!(bounds, vec![(0, 2), (2, 3)]);
        assert!(segments.iter().all(|s| s.label == LineLabel::Undetermined));
    }

    #[test]
    fn empty_band_has_no_segments() {
        let params = LayoutParams::default();
        assert!(segment_band(&params, 3, &[], &[]).is_empty());
    }

    #[test]
    fn overlapping_likely_words_are_still_counted() {
        let params = LayoutParams::default();
        let letters = letters(&[
            Rect::new(0, 0, 14, 20),
            Rect::new(16, 0, 14, 20),
            Rect::new(32, 0, 14, 20),
            Rect::new(20, 5, 14, 20),
        ]);
        let words = vec![
            Word {
                start: 0,
                origin: (0, 0),
                rect: Rect::from_edges(0, 0, 46, 20),
                letters: vec![0, 1, 2],
            },
            single_letter_word(3, letters[3].rect),
        ];
        let mut segment = LineSegment::new(0, 0, 2);
        classify_segment(&params, &letters, &words, &[0, 1], &mut segment);
        assert_eq!(segment.likely_words, 1);
        assert_eq!(segment.overlapping_words, 1);
        // k = 1, n = 2: 5k > n
        assert_eq!(segment.kind(), Some(LineKind::Word));
    }
}
