//! Build Result
//!
//! Result types for build operations.

use std::path::PathBuf;

use crate::application::clean::CleanResult;
use crate::domain::value_objects::{BuildMode, ContentHash};

/// One emitted bundle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleSummary {
    pub target: String,
    pub file: PathBuf,
    pub hash: ContentHash,
    /// May be swapped in place without reloading the extension
    pub hot_reloadable: bool,
}

/// Result of a build
#[derive(Debug, Clone)]
pub struct BuildResult {
    pub mode: BuildMode,
    /// Output-relative paths, in write order
    pub written: Vec<PathBuf>,
    pub bundles: Vec<BundleSummary>,
    /// What the clean step removed
    pub clean: CleanResult,
    pub warnings: Vec<String>,
}

impl BuildResult {
    pub fn new(mode: BuildMode) -> Self {
        Self {
            mode,
            written: Vec::new(),
            bundles: Vec::new(),
            clean: CleanResult::new(),
            warnings: Vec::new(),
        }
    }

    pub fn bundle(&self, target: &str) -> Option<&BundleSummary> {
        self.bundles.iter().find(|b| b.target == target)
    }

    pub fn written_count(&self) -> usize {
        self.written.len()
    }
}
