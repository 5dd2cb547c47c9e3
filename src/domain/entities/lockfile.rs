//! Build lock entity - the files written by the last successful build
//!
//! The lock lets `clean` remove exactly what the pipeline produced and nothing
//! else. It is a pure data structure; persistence lives in
//! `LockfileRepository` implementations.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::domain::entities::Artifact;

/// File name of the lock inside the output directory
pub const LOCKFILE_NAME: &str = ".extforge.lock";

/// Normalize a path for lockfile storage (always use forward slashes).
pub(crate) fn normalize_lockfile_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Parse a normalized lockfile path (handle both `/` and `\\` separators).
pub(crate) fn parse_lockfile_path(s: &str) -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(s.replace('/', "\\"))
    } else {
        PathBuf::from(s)
    }
}

/// Lock entry for one written file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockfileEntry {
    /// `sha256:` hash of the content as written
    hash: String,
    /// Artifact label (`bundle:popup`, `page`, ...)
    origin: String,
}

impl LockfileEntry {
    pub fn new(hash: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            origin: origin.into(),
        }
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }
}

/// Written files keyed by output-relative path
#[derive(Debug, Clone, PartialEq)]
pub struct Lockfile {
    version: u32,
    entries: BTreeMap<String, LockfileEntry>,
}

impl Default for Lockfile {
    fn default() -> Self {
        Self::new()
    }
}

impl Lockfile {
    pub fn new() -> Self {
        Self {
            version: 1,
            entries: BTreeMap::new(),
        }
    }

    /// Record every artifact of a finished build
    pub fn from_artifacts<'a>(artifacts: impl IntoIterator<Item = &'a Artifact>) -> Self {
        let mut lockfile = Self::new();
        for artifact in artifacts {
            lockfile.set_entry(
                normalize_lockfile_path(artifact.path()),
                LockfileEntry::new(artifact.hash().to_string(), artifact.kind().label()),
            );
        }
        lockfile
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn set_entry(&mut self, key: impl Into<String>, entry: LockfileEntry) {
        self.entries.insert(key.into(), entry);
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &LockfileEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
