//! High-level API for layout reconstruction.
//!
//! # Example
//!
//! ```no_run
//! use boxlayout_core::api::{Model, analyze_path};
//! use boxlayout_core::layout::{LayoutParams, LineKind};
//!
//! let analysis = analyze_path("page.png", &LayoutParams::default())?;
//! for rect in analysis.final_rects(LineKind::Math) {
//!     println!("{rect:?}");
//! }
//!
//! let mut model = Model::new(LayoutParams::default());
//! model.load("page.csv")?;
//! # Ok::<(), boxlayout_core::LayoutError>(())
//! ```

pub mod high_level;
pub mod model;

// Re-export for convenience
pub use high_level::{analyze_boxes, analyze_path, analyze_reader};
pub use model::Model;
