//! Configuration type definitions
//!
//! Every key is optional. An empty `extforge.toml` (or none at all) yields
//! the stock extension layout.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::entities::{
    default_pages, TargetRegistry, BINARY_EXTENSIONS, VENDOR_EXCLUDE,
};
use crate::domain::value_objects::{RuntimeContext, TransformKind, MODE_VAR};
use crate::error::ExtforgeResult;

use super::loader::{self, ConfigWarning};

/// Config file name, looked up in the project root
pub const CONFIG_FILENAME: &str = "extforge.toml";

/// Top-level `extforge.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Output directory, relative to the project root
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Static manifest source
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,

    /// Files copied verbatim into the output root
    #[serde(default = "default_assets")]
    pub assets: Vec<PathBuf>,

    #[serde(default = "default_targets")]
    pub targets: Vec<TargetConfig>,

    #[serde(default = "default_page_configs")]
    pub pages: Vec<PageConfig>,

    #[serde(default = "default_rules")]
    pub rules: Vec<RuleConfig>,

    #[serde(default)]
    pub env: EnvConfig,

    #[serde(default)]
    pub bundler: BundlerConfig,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            manifest: default_manifest(),
            assets: default_assets(),
            targets: default_targets(),
            pages: default_page_configs(),
            rules: default_rules(),
            env: EnvConfig::default(),
            bundler: BundlerConfig::default(),
        }
    }
}

impl ProjectConfig {
    /// Load and collect unknown-key warnings
    pub fn load_with_warnings(path: &Path) -> ExtforgeResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }
}

/// `[[targets]]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetConfig {
    pub name: String,
    pub entry: PathBuf,
    pub context: RuntimeContext,
}

/// `[[pages]]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageConfig {
    pub template: PathBuf,
    pub filename: String,
    #[serde(default)]
    pub chunks: Vec<String>,
}

/// `[[rules]]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    pub test: String,
    pub transform: TransformKind,
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// `[env]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvConfig {
    /// Variables visible to bundles. Everything else stays hidden.
    #[serde(default = "default_expose")]
    pub expose: Vec<String>,

    /// Extension of the `secrets.<mode>.<ext>` module
    #[serde(default = "default_secrets_extension")]
    pub secrets_extension: String,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            expose: default_expose(),
            secrets_extension: default_secrets_extension(),
        }
    }
}

/// `[bundler]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundlerConfig {
    /// External bundler argv. Unset means the built-in inline bundler.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("build")
}

fn default_manifest() -> PathBuf {
    PathBuf::from("src/manifest.json")
}

fn default_assets() -> Vec<PathBuf> {
    vec![
        PathBuf::from("src/assets/img/icon-34.png"),
        PathBuf::from("src/assets/img/icon-128.png"),
    ]
}

fn default_targets() -> Vec<TargetConfig> {
    TargetRegistry::defaults()
        .iter()
        .map(|t| TargetConfig {
            name: t.name().to_string(),
            entry: t.entry_path().to_path_buf(),
            context: t.runtime_context(),
        })
        .collect()
}

fn default_page_configs() -> Vec<PageConfig> {
    default_pages()
        .into_iter()
        .map(|p| PageConfig {
            template: p.template_path().to_path_buf(),
            filename: p.output_filename().to_string(),
            chunks: p.included_chunks().to_vec(),
        })
        .collect()
}

fn default_rules() -> Vec<RuleConfig> {
    let rule = |test: String, transform| RuleConfig {
        test,
        transform,
        exclude: vec![VENDOR_EXCLUDE.to_string()],
    };
    vec![
        rule("*.css".into(), TransformKind::Style),
        rule(
            format!("*.{{{}}}", BINARY_EXTENSIONS.join(",")),
            TransformKind::BinaryFileCopy,
        ),
        rule("*.html".into(), TransformKind::Markup),
        rule("*.{js,jsx}".into(), TransformKind::Script),
    ]
}

fn default_expose() -> Vec<String> {
    vec![MODE_VAR.to_string()]
}

fn default_secrets_extension() -> String {
    "js".to_string()
}
