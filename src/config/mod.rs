//! Configuration module for extforge
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (`EXTFORGE_OUT_DIR`)
//! 3. Project config (`<project>/extforge.toml`)
//! 4. Built-in defaults (the stock extension layout)

mod env_validator;
mod loader;
#[cfg(test)]
mod tests;
mod types;

use std::path::{Path, PathBuf};

use crate::domain::entities::{
    validate_pages, AssetRule, AssetTransformTable, BuildTarget, PageTemplate, TargetRegistry,
};
use crate::error::ExtforgeResult;

pub use env_validator::{levenshtein, EnvVarValidator, Validated};
pub use loader::{
    load_for_project, load_with_warnings, with_env_overrides, with_env_overrides_from,
    ConfigWarning, OUT_DIR_VAR,
};
pub use types::{
    BundlerConfig, EnvConfig, PageConfig, ProjectConfig, RuleConfig, TargetConfig,
    CONFIG_FILENAME,
};

/// Validated build configuration with compiled registry, rules and pages
#[derive(Debug)]
pub struct BuildConfig {
    pub project_root: PathBuf,
    /// Absolute output directory
    pub output_dir: PathBuf,
    /// Static manifest source, relative to the project root
    pub manifest: PathBuf,
    pub assets: Vec<PathBuf>,
    pub registry: TargetRegistry,
    pub rules: AssetTransformTable,
    pub pages: Vec<PageTemplate>,
    pub env: EnvConfig,
    pub bundler: BundlerConfig,
}

impl BuildConfig {
    /// Load `extforge.toml` (if any) and compile it
    pub fn load(project_root: &Path) -> ExtforgeResult<(Self, Vec<ConfigWarning>)> {
        let (config, warnings) = load_for_project(project_root)?;
        Ok((Self::from_project(project_root, config)?, warnings))
    }

    /// Compile a parsed config. All configuration errors surface here,
    /// before anything touches the output directory.
    pub fn from_project(project_root: &Path, config: ProjectConfig) -> ExtforgeResult<Self> {
        let registry = TargetRegistry::new(
            config
                .targets
                .into_iter()
                .map(|t| BuildTarget::new(t.name, t.entry, t.context))
                .collect(),
        )?;

        let rules = AssetTransformTable::new(
            config
                .rules
                .into_iter()
                .map(|r| AssetRule::new(r.test, r.transform, r.exclude))
                .collect::<ExtforgeResult<Vec<_>>>()?,
        );

        let pages: Vec<PageTemplate> = config
            .pages
            .into_iter()
            .map(|p| PageTemplate::new(p.template, p.filename, p.chunks))
            .collect();
        validate_pages(&pages, &registry)?;

        Ok(Self {
            project_root: project_root.to_path_buf(),
            output_dir: project_root.join(&config.output_dir),
            manifest: config.manifest,
            assets: config.assets,
            registry,
            rules,
            pages,
            env: config.env,
            bundler: config.bundler,
        })
    }

    /// Replace the output directory (CLI `--out-dir`)
    pub fn with_output_dir(mut self, dir: &Path) -> Self {
        self.output_dir = self.project_root.join(dir);
        self
    }
}
