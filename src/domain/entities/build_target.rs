//! BuildTarget entity and the Target Registry
//!
//! A build target is one independently compiled entry point of the extension.
//! Its name is the join key between the bundle file (`<name>.bundle.js`) and
//! the pages that load it.

use std::path::{Path, PathBuf};

use crate::domain::value_objects::{BuildMode, RuntimeContext};
use crate::error::{ExtforgeError, ExtforgeResult};

/// Suffix appended to every target name to form its bundle file name
pub const BUNDLE_SUFFIX: &str = ".bundle.js";

/// A single entry point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTarget {
    name: String,
    entry_path: PathBuf,
    runtime_context: RuntimeContext,
}

impl BuildTarget {
    pub fn new(
        name: impl Into<String>,
        entry_path: impl Into<PathBuf>,
        runtime_context: RuntimeContext,
    ) -> Self {
        Self {
            name: name.into(),
            entry_path: entry_path.into(),
            runtime_context,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entry source, relative to the project root
    pub fn entry_path(&self) -> &Path {
        &self.entry_path
    }

    pub fn runtime_context(&self) -> RuntimeContext {
        self.runtime_context
    }

    pub fn bundle_filename(&self) -> String {
        format!("{}{}", self.name, BUNDLE_SUFFIX)
    }

    /// Whether a rebuilt bundle may be swapped in place without reloading
    /// the extension. Never in production.
    pub fn hot_reloadable(&self, mode: BuildMode) -> bool {
        mode.is_development() && self.runtime_context.hot_reload_safe()
    }
}

/// Ordered, name-unique set of build targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetRegistry {
    targets: Vec<BuildTarget>,
}

impl TargetRegistry {
    /// Build the registry, rejecting duplicate or unusable names.
    pub fn new(targets: Vec<BuildTarget>) -> ExtforgeResult<Self> {
        for (idx, target) in targets.iter().enumerate() {
            validate_name(target.name())?;
            if targets[..idx].iter().any(|t| t.name() == target.name()) {
                return Err(ExtforgeError::DuplicateTarget {
                    name: target.name().to_string(),
                });
            }
        }
        Ok(Self { targets })
    }

    /// Targets of the original extension layout
    pub fn defaults() -> Self {
        let targets = vec![
            BuildTarget::new(
                "popup",
                "src/pages/Popup/PopupScript.js",
                RuntimeContext::Popup,
            ),
            BuildTarget::new(
                "devtools",
                "src/pages/Devtools/DevtoolsScript.js",
                RuntimeContext::Devtools,
            ),
            BuildTarget::new(
                "background",
                "src/pages/Background/Background.js",
                RuntimeContext::Background,
            ),
            BuildTarget::new(
                "contentScript",
                "src/pages/Content/ContentScript.js",
                RuntimeContext::ContentScript,
            ),
            BuildTarget::new(
                "pageScript",
                "src/pages/Page/PageScript.js",
                RuntimeContext::PageScript,
            ),
        ];
        Self { targets }
    }

    pub fn get(&self, name: &str) -> Option<&BuildTarget> {
        self.targets.iter().find(|t| t.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BuildTarget> {
        self.targets.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.targets.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

fn validate_name(name: &str) -> ExtforgeResult<()> {
    match file_name_problem(name) {
        Some(reason) => Err(ExtforgeError::InvalidTargetName {
            name: name.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

/// Why `name` cannot be used as a file name directly under the output
/// directory, if it cannot
pub(crate) fn file_name_problem(name: &str) -> Option<&'static str> {
    if name.is_empty() {
        Some("name is empty")
    } else if name.contains('/') || name.contains('\\') {
        Some("name contains a path separator")
    } else if name == "." || name.contains("..") {
        Some("name contains '..'")
    } else {
        None
    }
}
