//! Bundler port - the external module bundling engine
//!
//! Dependency-graph resolution and loader internals belong to the bundler.
//! The pipeline only hands it one entry at a time and takes back the
//! emitted bundle text.

use std::path::Path;

use crate::domain::entities::BuildTarget;
use crate::domain::value_objects::EnvironmentConfig;
use crate::error::ExtforgeResult;

/// Everything a bundler needs to compile one target
#[derive(Debug, Clone, Copy)]
pub struct BundleRequest<'a> {
    pub target: &'a BuildTarget,
    /// Absolute path of the entry source
    pub entry_path: &'a Path,
    /// Entry source text
    pub source: &'a str,
    pub env: &'a EnvironmentConfig,
    /// Secrets module text, when the mode-specific resource exists
    pub secrets: Option<&'a str>,
}

pub trait Bundler {
    /// Short name for events and `targets` output
    fn name(&self) -> &str;

    /// Compile one target into bundle text
    fn bundle(&self, request: &BundleRequest<'_>) -> ExtforgeResult<String>;
}

impl<B: Bundler + ?Sized> Bundler for Box<B> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn bundle(&self, request: &BundleRequest<'_>) -> ExtforgeResult<String> {
        (**self).bundle(request)
    }
}
