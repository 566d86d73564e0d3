//! Data types produced by the layout pipeline.
//!
//! Each stage owns the types it produces; later stages only read them.

pub mod band;
pub mod group;
pub mod line;
pub mod word;

pub use band::{BandId, BandSpan, HeightBand};
pub use group::{Attachment, FinalBlock, FinalBounds, GroupAttachment, GroupRef};
pub use line::{BandLines, LineKind, LineLabel, LineSegment};
pub use word::{Letter, LetterId, Word, WordId};
