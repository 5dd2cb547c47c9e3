//! Environment Resolver
//!
//! Reads the build mode, the exposed variable allow-list, the mode-specific
//! secrets module and package metadata. Runs once, before anything else.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::config::{EnvConfig, EnvVarValidator};
use crate::domain::ports::FileSystem;
use crate::domain::value_objects::{BuildMode, EnvironmentConfig, PackageMetadata, MODE_VAR};

pub const DESCRIPTION_VAR: &str = "npm_package_description";
pub const VERSION_VAR: &str = "npm_package_version";
pub const PACKAGE_JSON: &str = "package.json";

/// `secrets.<mode>.<ext>` in the project root
pub fn secrets_path(project_root: &Path, mode: BuildMode, extension: &str) -> PathBuf {
    project_root.join(format!(
        "secrets.{}.{}",
        mode,
        extension.trim_start_matches('.')
    ))
}

impl EnvironmentConfig {
    /// Resolve from the process environment. Returns non-fatal warnings.
    pub fn resolve(
        project_root: &Path,
        settings: &EnvConfig,
        mode_override: Option<BuildMode>,
        fs: &impl FileSystem,
    ) -> (Self, Vec<String>) {
        Self::resolve_with(project_root, settings, mode_override, fs, |name| {
            std::env::var(name).ok()
        })
    }

    /// Resolve with an injected variable lookup
    pub fn resolve_with<F>(
        project_root: &Path,
        settings: &EnvConfig,
        mode_override: Option<BuildMode>,
        fs: &impl FileSystem,
        lookup: F,
    ) -> (Self, Vec<String>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut warnings = Vec::new();

        let mode = match mode_override {
            Some(mode) => mode,
            None => match lookup(MODE_VAR).filter(|v| !v.trim().is_empty()) {
                None => BuildMode::default(),
                Some(raw) => {
                    let validated = EnvVarValidator::new(MODE_VAR, &BuildMode::VALID_VALUES)
                        .parse(&raw, BuildMode::parse, BuildMode::default());
                    warnings.extend(validated.warning);
                    validated.value
                }
            },
        };

        let mut exposed_vars = BTreeMap::new();
        exposed_vars.insert(MODE_VAR.to_string(), mode.as_str().to_string());
        for name in &settings.expose {
            if name == MODE_VAR {
                continue;
            }
            match lookup(name) {
                Some(value) => {
                    exposed_vars.insert(name.clone(), value);
                }
                None => warnings.push(format!("exposed variable {} is not set", name)),
            }
        }

        let secrets = secrets_path(project_root, mode, &settings.secrets_extension);
        let secrets_override = fs.exists(&secrets).then_some(secrets);

        (Self::new(mode, exposed_vars, secrets_override), warnings)
    }
}

impl PackageMetadata {
    /// `npm_package_*` variables, falling back to `package.json`
    pub fn resolve(project_root: &Path, fs: &impl FileSystem) -> Self {
        Self::resolve_with(project_root, fs, |name| std::env::var(name).ok())
    }

    pub fn resolve_with<F>(project_root: &Path, fs: &impl FileSystem, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let from_env = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let mut metadata = Self::new(from_env(DESCRIPTION_VAR), from_env(VERSION_VAR));

        if !metadata.is_complete() {
            let package = read_package_json(&project_root.join(PACKAGE_JSON), fs);
            let field = |key: &str| {
                package
                    .as_ref()
                    .and_then(|p| p.get(key))
                    .and_then(Value::as_str)
                    .map(str::to_string)
            };
            if metadata.description.is_none() {
                metadata.description = field("description");
            }
            if metadata.version.is_none() {
                metadata.version = field("version");
            }
        }

        metadata
    }
}

/// Missing or malformed `package.json` yields `None`
fn read_package_json(path: &Path, fs: &impl FileSystem) -> Option<Value> {
    let content = fs.read(path).ok()?;
    serde_json::from_str::<Value>(&content)
        .ok()
        .filter(Value::is_object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::LocalFs;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::tempdir;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn mode_defaults_to_development() {
        let dir = tempdir().unwrap();
        let (env, warnings) = EnvironmentConfig::resolve_with(
            dir.path(),
            &EnvConfig::default(),
            None,
            &LocalFs::new(),
            vars(&[]),
        );

        assert_eq!(env.mode(), BuildMode::Development);
        assert_eq!(env.exposed_vars()["NODE_ENV"], "development");
        assert!(warnings.is_empty());
    }

    #[test]
    fn mode_override_beats_node_env() {
        let dir = tempdir().unwrap();
        let (env, _) = EnvironmentConfig::resolve_with(
            dir.path(),
            &EnvConfig::default(),
            Some(BuildMode::Development),
            &LocalFs::new(),
            vars(&[("NODE_ENV", "production")]),
        );

        assert_eq!(env.mode(), BuildMode::Development);
    }

    #[test]
    fn invalid_mode_warns_and_falls_back() {
        let dir = tempdir().unwrap();
        let (env, warnings) = EnvironmentConfig::resolve_with(
            dir.path(),
            &EnvConfig::default(),
            None,
            &LocalFs::new(),
            vars(&[("NODE_ENV", "prod")]),
        );

        assert_eq!(env.mode(), BuildMode::Development);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("prod"));
    }

    #[test]
    fn only_allow_listed_variables_are_exposed() {
        let dir = tempdir().unwrap();
        let settings = EnvConfig {
            expose: vec!["NODE_ENV".into(), "API_URL".into(), "UNSET_VAR".into()],
            ..EnvConfig::default()
        };

        let (env, warnings) = EnvironmentConfig::resolve_with(
            dir.path(),
            &settings,
            None,
            &LocalFs::new(),
            vars(&[
                ("NODE_ENV", "production"),
                ("API_URL", "https://x"),
                ("HOME", "/root"),
            ]),
        );

        let names: Vec<_> = env.exposed_vars().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["API_URL", "NODE_ENV"]);
        assert_eq!(env.exposed_vars()["NODE_ENV"], "production");
        assert_eq!(warnings, vec!["exposed variable UNSET_VAR is not set"]);
    }

    #[test]
    fn secrets_module_is_picked_per_mode() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("secrets.production.js"), "module.exports = {};").unwrap();

        let (prod, _) = EnvironmentConfig::resolve_with(
            dir.path(),
            &EnvConfig::default(),
            Some(BuildMode::Production),
            &LocalFs::new(),
            vars(&[]),
        );
        let (dev, _) = EnvironmentConfig::resolve_with(
            dir.path(),
            &EnvConfig::default(),
            Some(BuildMode::Development),
            &LocalFs::new(),
            vars(&[]),
        );

        assert_eq!(
            prod.secrets_override(),
            Some(dir.path().join("secrets.production.js").as_path())
        );
        assert!(dev.secrets_override().is_none());
    }

    #[test]
    fn secrets_extension_is_configurable() {
        assert_eq!(
            secrets_path(Path::new("/p"), BuildMode::Development, ".ts"),
            PathBuf::from("/p/secrets.development.ts")
        );
    }

    #[test]
    fn metadata_prefers_environment() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"description": "from file", "version": "0.0.1"}"#,
        )
        .unwrap();

        let meta = PackageMetadata::resolve_with(
            dir.path(),
            &LocalFs::new(),
            vars(&[("npm_package_version", "2.0.0")]),
        );

        assert_eq!(meta.version.as_deref(), Some("2.0.0"));
        assert_eq!(meta.description.as_deref(), Some("from file"));
    }

    #[test]
    fn metadata_tolerates_missing_or_malformed_package_json() {
        let dir = tempdir().unwrap();
        let meta = PackageMetadata::resolve_with(dir.path(), &LocalFs::new(), vars(&[]));
        assert_eq!(meta, PackageMetadata::default());

        fs::write(dir.path().join("package.json"), "{ not json").unwrap();
        let meta = PackageMetadata::resolve_with(dir.path(), &LocalFs::new(), vars(&[]));
        assert_eq!(meta, PackageMetadata::default());
    }
}
