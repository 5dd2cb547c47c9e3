//! Runtime context value object - where a bundle executes

use serde::{Deserialize, Serialize};

/// Privilege/execution environment of a build target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuntimeContext {
    /// Browser action popup page
    Popup,
    /// Devtools page and panels
    Devtools,
    /// Background page / service
    Background,
    /// Script injected into foreign pages
    ContentScript,
    /// Script running in the inspected page's own context
    PageScript,
}

impl RuntimeContext {
    pub const ALL: [RuntimeContext; 5] = [
        RuntimeContext::Popup,
        RuntimeContext::Devtools,
        RuntimeContext::Background,
        RuntimeContext::ContentScript,
        RuntimeContext::PageScript,
    ];

    /// Declared live-reload policy.
    ///
    /// Content scripts run inside a host page the pipeline does not control,
    /// so they are never hot-swapped.
    pub fn hot_reload_safe(&self) -> bool {
        match self {
            RuntimeContext::Popup => true,
            RuntimeContext::Devtools => true,
            RuntimeContext::Background => true,
            RuntimeContext::ContentScript => false,
            RuntimeContext::PageScript => true,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RuntimeContext::Popup => "popup",
            RuntimeContext::Devtools => "devtools",
            RuntimeContext::Background => "background",
            RuntimeContext::ContentScript => "content-script",
            RuntimeContext::PageScript => "page-script",
        }
    }
}

impl std::fmt::Display for RuntimeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
