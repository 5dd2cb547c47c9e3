//! Configuration loading

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ExtforgeError, ExtforgeResult};

use super::env_validator::levenshtein;
use super::types::{ProjectConfig, CONFIG_FILENAME};

/// Overrides `output_dir`
pub const OUT_DIR_VAR: &str = "EXTFORGE_OUT_DIR";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> ExtforgeResult<(ProjectConfig, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: ProjectConfig = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| ExtforgeError::ConfigParse {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load `<root>/extforge.toml` when present, defaults otherwise.
///
/// A missing file is not an error; a malformed one is.
pub fn load_for_project(root: &Path) -> ExtforgeResult<(ProjectConfig, Vec<ConfigWarning>)> {
    let path = root.join(CONFIG_FILENAME);
    let (config, warnings) = if path.is_file() {
        load_with_warnings(&path)?
    } else {
        (ProjectConfig::default(), Vec::new())
    };

    Ok((with_env_overrides(config), warnings))
}

/// Apply environment variable overrides (EXTFORGE_* prefix)
pub fn with_env_overrides(config: ProjectConfig) -> ProjectConfig {
    with_env_overrides_from(config, |name| std::env::var(name).ok())
}

pub fn with_env_overrides_from<F>(mut config: ProjectConfig, lookup: F) -> ProjectConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(dir) = lookup(OUT_DIR_VAR).filter(|v| !v.trim().is_empty()) {
        config.output_dir = PathBuf::from(dir);
    }
    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "output_dir",
        "manifest",
        "assets",
        "targets",
        "name",
        "entry",
        "context",
        "pages",
        "template",
        "filename",
        "chunks",
        "rules",
        "test",
        "transform",
        "exclude",
        "env",
        "expose",
        "secrets_extension",
        "bundler",
        "command",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}
