//! Artifact entities - output files held in memory until the force-write
//!
//! Pipeline steps never touch the output directory. Each one takes the
//! artifact set produced so far and returns it extended with its own files.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::ContentHash;
use crate::error::{ExtforgeError, ExtforgeResult};

/// Which step produced an artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Compiled bundle of the named target
    Bundle { target: String },
    /// Static file copied verbatim
    Asset,
    /// Synthesized `manifest.json`
    Manifest,
    /// Rendered HTML page
    Page,
}

impl ArtifactKind {
    /// Stable label recorded in the build lock
    pub fn label(&self) -> String {
        match self {
            ArtifactKind::Bundle { target } => format!("bundle:{}", target),
            ArtifactKind::Asset => "asset".to_string(),
            ArtifactKind::Manifest => "manifest".to_string(),
            ArtifactKind::Page => "page".to_string(),
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A file ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    /// Path relative to the output directory
    path: PathBuf,
    content: Vec<u8>,
    kind: ArtifactKind,
}

impl Artifact {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<Vec<u8>>, kind: ArtifactKind) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            kind,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Content as text, if it is UTF-8
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.content).ok()
    }

    pub fn kind(&self) -> &ArtifactKind {
        &self.kind
    }

    pub fn hash(&self) -> ContentHash {
        ContentHash::from_bytes(&self.content)
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Output files keyed by relative path
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtifactSet {
    artifacts: BTreeMap<PathBuf, Artifact>,
}

impl ArtifactSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an artifact. Two steps claiming the same path is a configuration error.
    pub fn insert(&mut self, artifact: Artifact) -> ExtforgeResult<()> {
        if self.artifacts.contains_key(artifact.path()) {
            return Err(ExtforgeError::DuplicateArtifact {
                path: artifact.path().to_path_buf(),
            });
        }
        self.artifacts.insert(artifact.path().to_path_buf(), artifact);
        Ok(())
    }

    /// Builder-style insert for step functions
    pub fn with(mut self, artifact: Artifact) -> ExtforgeResult<Self> {
        self.insert(artifact)?;
        Ok(self)
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<&Artifact> {
        self.artifacts.get(path.as_ref())
    }

    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.artifacts.contains_key(path.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.values()
    }

    pub fn paths(&self) -> Vec<&Path> {
        self.artifacts.keys().map(PathBuf::as_path).collect()
    }

    /// Bundle artifacts only
    pub fn bundles(&self) -> impl Iterator<Item = &Artifact> {
        self.iter()
            .filter(|a| matches!(a.kind(), ArtifactKind::Bundle { .. }))
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}
