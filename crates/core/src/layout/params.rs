//! Layout analysis parameters.
//!
//! Contains `LayoutParams`, the thresholds every pipeline stage reads.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::utils::MAX_COORD;

/// How a new letter is merged into the existing height bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BandMerge {
    /// Join the first intersecting band, then keep absorbing every band the
    /// grown interval reaches. Live bands never overlap.
    #[default]
    Cascade,
    /// Join the first intersecting band (creation order) and stop.
    ///
    /// Reproduces the single left-to-right scan: a band grown by a letter is
    /// not re-checked against bands created earlier, so two live bands may end
    /// up overlapping and the result depends on input order.
    FirstMatch,
}

/// Parameters for layout analysis.
///
/// Controls how boxes are accepted as letters, grouped into words and lines,
/// and how lines are merged into paragraphs and math blocks. All distances
/// are in input pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParams {
    /// Smallest horizontal gap (may be negative for touching glyphs) between
    /// a letter and its right neighbour for both to be in one word.
    pub min_adjacent_gap: i32,

    /// Largest horizontal gap between a letter and its right neighbour for
    /// both to be in one word. Also sets the minimum letter width
    /// (`max_adjacent_gap - 2`).
    pub max_adjacent_gap: i32,

    /// Largest difference of bottoms for a left neighbour to disqualify a
    /// letter as a word start.
    pub max_bottom_delta: i32,

    /// Letters with `w / h` above this are accepted if narrower than
    /// `max_letter_width`.
    pub min_letter_aspect: f64,

    /// Upper bound (exclusive) for the aspect rule's width.
    pub max_letter_width: i32,

    /// Heights strictly between these bounds are always letter-like.
    pub min_letter_height: i32,
    pub max_letter_height: i32,

    /// A new line segment starts where the gap between two words exceeds this
    /// multiple of the running mean word width.
    pub line_gap_factor: f64,

    /// Top or bottom variance under which a letter run is word-like.
    pub max_position_variance: f64,

    /// Letters whose tops differ by less than this fraction of the first
    /// letter's height share a partition.
    pub partition_tolerance: f64,

    /// A WORD band joins the current paragraph when its gap to the previous
    /// band is below `height / paragraph_gap_divisor`.
    pub paragraph_gap_divisor: i32,

    /// A MATH band is embedded into the paragraph above when the gap is below
    /// `previous height / embedded_math_gap_divisor`.
    pub embedded_math_gap_divisor: i32,

    /// A MATH band continues a math block when the gap is below
    /// `primary / math_chain_gap_divisor` and the heights differ by more than
    /// `primary / math_height_divisor`, `primary` being the taller height.
    pub math_chain_gap_divisor: i32,
    pub math_height_divisor: i32,

    pub band_merge: BandMerge,

    /// Bounds finalizer policy for non-primary bands: `true` unions each
    /// segment only into output rectangles it overlaps horizontally,
    /// `false` unions it into every output rectangle.
    pub match_by_overlap: bool,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            min_adjacent_gap: -2,
            max_adjacent_gap: 15,
            max_bottom_delta: 25,
            min_letter_aspect: 0.2,
            max_letter_width: 500,
            min_letter_height: 15,
            max_letter_height: 85,
            line_gap_factor: 6.0,
            max_position_variance: 6.0,
            partition_tolerance: 0.2,
            paragraph_gap_divisor: 3,
            embedded_math_gap_divisor: 5,
            math_chain_gap_divisor: 7,
            math_height_divisor: 2,
            band_merge: BandMerge::Cascade,
            match_by_overlap: false,
        }
    }
}

impl LayoutParams {
    /// Reads parameters from a JSON object. Missing fields keep their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let params: LayoutParams = serde_json::from_str(text)?;
        params.validate()?;
        Ok(params)
    }

    /// True when `gap` is inside `[min_adjacent_gap, max_adjacent_gap]`.
    #[inline]
    pub fn is_adjacent_gap(&self, gap: i32) -> bool {
        (self.min_adjacent_gap..=self.max_adjacent_gap).contains(&gap)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_adjacent_gap > self.max_adjacent_gap {
            return Err(LayoutError::InvalidParams(format!(
                "min_adjacent_gap ({}) is greater than max_adjacent_gap ({})",
                self.min_adjacent_gap, self.max_adjacent_gap
            )));
        }
        let distances = [
            ("min_adjacent_gap", self.min_adjacent_gap),
            ("max_adjacent_gap", self.max_adjacent_gap),
            ("max_bottom_delta", self.max_bottom_delta),
        ];
        for (name, value) in distances {
            if !(-MAX_COORD..=MAX_COORD).contains(&value) {
                return Err(LayoutError::InvalidParams(format!(
                    "{name} is out of range: {value}"
                )));
            }
        }
        let divisors = [
            ("paragraph_gap_divisor", self.paragraph_gap_divisor),
            ("embedded_math_gap_divisor", self.embedded_math_gap_divisor),
            ("math_chain_gap_divisor", self.math_chain_gap_divisor),
            ("math_height_divisor", self.math_height_divisor),
        ];
        for (name, value) in divisors {
            if value <= 0 {
                return Err(LayoutError::InvalidParams(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        let factors = [
            ("min_letter_aspect", self.min_letter_aspect),
            ("line_gap_factor", self.line_gap_factor),
            ("max_position_variance", self.max_position_variance),
            ("partition_tolerance", self.partition_tolerance),
        ];
        for (name, value) in factors {
            if !value.is_finite() || value <= 0.0 {
                return Err(LayoutError::InvalidParams(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        Ok(())
    }
}
