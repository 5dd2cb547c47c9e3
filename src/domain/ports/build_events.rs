//! Build Event Port
//!
//! Observable interface for the pipeline: progress display, NDJSON event
//! streams for CI, and assertions in tests all hang off this trait.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::domain::value_objects::BuildMode;

/// Orchestrator step, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStage {
    Validate,
    Clean,
    Bundle,
    CopyAssets,
    Manifest,
    Templates,
    Write,
}

impl BuildStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildStage::Validate => "validate",
            BuildStage::Clean => "clean",
            BuildStage::Bundle => "bundle",
            BuildStage::CopyAssets => "copy-assets",
            BuildStage::Manifest => "manifest",
            BuildStage::Templates => "templates",
            BuildStage::Write => "write",
        }
    }
}

impl std::fmt::Display for BuildStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Event emitted during a build
#[derive(Debug, Clone, PartialEq)]
pub enum BuildEvent {
    /// Build started
    Started {
        project: PathBuf,
        output_dir: PathBuf,
        mode: BuildMode,
        target_count: usize,
    },

    /// A step began
    StageStarted { stage: BuildStage },

    /// Mode-specific secrets resource was found
    SecretsResolved { path: PathBuf },

    /// Non-fatal problem (config key typo, unset exposed variable, ...)
    Warning { message: String },

    /// Previous outputs removed
    Cleaned { removed: usize, skipped: usize },

    /// One target compiled
    TargetBundled {
        target: String,
        file: String,
        bytes: usize,
    },

    /// Static asset copied
    AssetCopied { path: PathBuf },

    /// `manifest.json` produced
    ManifestSynthesized { path: PathBuf },

    /// HTML page rendered
    PageRendered {
        filename: String,
        chunks: Vec<String>,
    },

    /// File flushed to disk
    FileWritten { path: PathBuf },

    /// Build finished
    Completed { written: usize },
}

/// Trait for receiving build events
pub trait BuildEventSink: Send + Sync {
    fn on_event(&self, event: BuildEvent);

    /// Whether this sink wants per-file events
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl BuildEventSink for NoopEventSink {
    fn on_event(&self, _event: BuildEvent) {}

    fn wants_detailed_events(&self) -> bool {
        false
    }
}

/// Event sink that keeps every event (tests, watch diffing)
#[derive(Debug, Clone, Default)]
pub struct RecordingEventSink {
    events: Arc<Mutex<Vec<BuildEvent>>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<BuildEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Stages in the order they started
    pub fn stages(&self) -> Vec<BuildStage> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                BuildEvent::StageStarted { stage } => Some(stage),
                _ => None,
            })
            .collect()
    }
}

impl BuildEventSink for RecordingEventSink {
    fn on_event(&self, event: BuildEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
