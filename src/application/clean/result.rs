//! Clean result types

use std::path::PathBuf;

/// Reason why a recorded file was left in place
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Content changed since the build wrote it
    Modified,
    /// File is already gone
    Missing,
    /// File could not be read
    Unreadable,
    /// Lock entry points outside the output directory
    OutsideOutput,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Modified => write!(f, "modified"),
            SkipReason::Missing => write!(f, "missing"),
            SkipReason::Unreadable => write!(f, "unreadable"),
            SkipReason::OutsideOutput => write!(f, "outside output directory"),
        }
    }
}

/// A file that was skipped during clean
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    /// Path relative to the output directory
    pub path: PathBuf,
    pub reason: SkipReason,
}

impl SkippedFile {
    pub fn new(path: PathBuf, reason: SkipReason) -> Self {
        Self { path, reason }
    }
}

/// Result of a clean operation
#[derive(Debug, Clone, Default)]
pub struct CleanResult {
    /// Files deleted (or that would be deleted in dry run), relative to the
    /// output directory
    pub deleted: Vec<PathBuf>,
    pub skipped: Vec<SkippedFile>,
    /// Whether the lock itself was removed
    pub lock_removed: bool,
    pub warnings: Vec<String>,
}

impl CleanResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_deleted(&mut self, path: PathBuf) {
        self.deleted.push(path);
    }

    pub fn add_skipped(&mut self, path: PathBuf, reason: SkipReason) {
        self.skipped.push(SkippedFile::new(path, reason));
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Get total count of files considered
    pub fn total_count(&self) -> usize {
        self.deleted.len() + self.skipped.len()
    }
}
