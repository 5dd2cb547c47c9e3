//! Build context
//!
//! Everything a build reads, resolved once up front and passed by
//! reference to every step.

use std::path::{Path, PathBuf};

use crate::config::{BuildConfig, ConfigWarning};
use crate::domain::ports::FileSystem;
use crate::domain::value_objects::{BuildMode, EnvironmentConfig, PackageMetadata};
use crate::error::ExtforgeResult;

/// Immutable inputs of one build
#[derive(Debug)]
pub struct BuildContext {
    pub config: BuildConfig,
    pub env: EnvironmentConfig,
    pub metadata: PackageMetadata,
    /// Non-fatal problems found while resolving the context
    pub warnings: Vec<String>,
}

impl BuildContext {
    pub fn new(config: BuildConfig, env: EnvironmentConfig, metadata: PackageMetadata) -> Self {
        Self {
            config,
            env,
            metadata,
            warnings: Vec::new(),
        }
    }

    /// Load config, resolve environment and metadata for `project_root`
    pub fn load(
        project_root: &Path,
        mode_override: Option<BuildMode>,
        output_override: Option<&Path>,
        fs: &impl FileSystem,
    ) -> ExtforgeResult<Self> {
        let (mut config, config_warnings) = BuildConfig::load(project_root)?;
        if let Some(dir) = output_override {
            config = config.with_output_dir(dir);
        }

        let (env, env_warnings) =
            EnvironmentConfig::resolve(project_root, &config.env, mode_override, fs);
        let metadata = PackageMetadata::resolve(project_root, fs);

        let mut context = Self::new(config, env, metadata);
        context.warnings = config_warnings
            .iter()
            .map(ConfigWarning::to_string)
            .chain(env_warnings)
            .collect();
        Ok(context)
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }

    pub fn project_root(&self) -> &Path {
        &self.config.project_root
    }

    pub fn output_dir(&self) -> &Path {
        &self.config.output_dir
    }

    pub fn mode(&self) -> BuildMode {
        self.env.mode()
    }

    /// Project-relative path to an absolute one
    pub fn source_path(&self, rel: &Path) -> PathBuf {
        self.config.project_root.join(rel)
    }
}
