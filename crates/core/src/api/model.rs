//! Published analysis holder.
//!
//! A `Model` keeps the most recent successful analysis behind an `Arc`.
//! Loading a new table replaces it wholesale; readers that cloned the `Arc`
//! keep their snapshot.

use std::path::Path;
use std::sync::Arc;

use tracing::warn;

use crate::api::high_level::analyze_path;
use crate::error::Result;
use crate::layout::{Analysis, LayoutParams};

#[derive(Debug, Default)]
pub struct Model {
    params: LayoutParams,
    current: Option<Arc<Analysis>>,
}

impl Model {
    pub fn new(params: LayoutParams) -> Self {
        Self {
            params,
            current: None,
        }
    }

    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    /// Replaces the parameters used by later loads. The published analysis
    /// is left as it is.
    pub fn set_params(&mut self, params: LayoutParams) {
        self.params = params;
    }

    /// Last successfully loaded analysis.
    pub fn current(&self) -> Option<Arc<Analysis>> {
        self.current.clone()
    }

    /// Runs the pipeline for `path` and publishes the result.
    ///
    /// On failure the previously published analysis stays in place.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<Arc<Analysis>> {
        let path = path.as_ref();
        match analyze_path(path, &self.params) {
            Ok(analysis) => {
                let analysis = Arc::new(analysis);
                self.current = Some(Arc::clone(&analysis));
                Ok(analysis)
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "load failed, keeping previous analysis");
                Err(err)
            }
        }
    }

    /// Drops the published analysis.
    pub fn clear(&mut self) {
        self.current = None;
    }
}
