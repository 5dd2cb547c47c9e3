//! Watch event types and options

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::domain::value_objects::BuildMode;

/// Debounce duration in milliseconds
pub const DEBOUNCE_MS: u64 = 100;

/// Watch options
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Project root (holds `extforge.toml` and the sources)
    pub project_root: PathBuf,
    /// `--mode`, beats `NODE_ENV`
    pub mode: Option<BuildMode>,
    /// `--out-dir`, beats config and `EXTFORGE_OUT_DIR`
    pub output_dir: Option<PathBuf>,
}

impl WatchOptions {
    pub fn new(project_root: PathBuf) -> Self {
        Self {
            project_root,
            mode: None,
            output_dir: None,
        }
    }

    pub fn with_mode(mut self, mode: Option<BuildMode>) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        self.output_dir = output_dir;
        self
    }
}

/// Watch event types for NDJSON output
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WatchEvent {
    /// Watch started
    WatchStarted {
        project: String,
        watching: Vec<String>,
    },
    /// A debounced batch of changed paths
    FilesChanged { paths: Vec<String> },
    /// Rebuild started
    RebuildStarted,
    /// Rebuild finished; changed bundles split by reload policy
    RebuildComplete {
        written: usize,
        hot: Vec<String>,
        reload: Vec<String>,
    },
    /// Non-fatal problem reported by a rebuild
    Warning { message: String },
    /// Rebuild failed; watching continues
    Error { message: String },
    /// Watch stopped
    Shutdown,
}

impl WatchEvent {
    /// Convert to JSON string with "command": "watch" field included
    pub fn to_json(&self) -> String {
        let mut value =
            serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({"event": "error"}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert("command".to_string(), serde_json::json!("watch"));
        }
        serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Watcher state for debouncing
#[derive(Debug)]
pub struct WatcherState {
    pending_changes: HashSet<PathBuf>,
    last_change: Option<Instant>,
}

impl Default for WatcherState {
    fn default() -> Self {
        Self::new()
    }
}

impl WatcherState {
    pub fn new() -> Self {
        Self {
            pending_changes: HashSet::new(),
            last_change: None,
        }
    }

    /// Add a file change to pending changes
    pub fn add_change(&mut self, path: PathBuf) {
        self.pending_changes.insert(path);
        self.last_change = Some(Instant::now());
    }

    /// Debounce period has passed and changes are pending
    pub fn should_rebuild(&self) -> bool {
        if let Some(last) = self.last_change {
            !self.pending_changes.is_empty() && last.elapsed() >= Duration::from_millis(DEBOUNCE_MS)
        } else {
            false
        }
    }

    /// Take all pending changes, sorted, resetting state
    pub fn take_changes(&mut self) -> Vec<PathBuf> {
        let mut changes: Vec<_> = self.pending_changes.drain().collect();
        changes.sort();
        self.last_change = None;
        changes
    }

    pub fn has_pending(&self) -> bool {
        !self.pending_changes.is_empty()
    }
}
