//! Environment value objects
//!
//! `EnvironmentConfig` is created once at pipeline start and never mutated.
//! Resolution from the process environment lives in
//! `application::environment`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use super::BuildMode;

/// Variable that carries the build mode
pub const MODE_VAR: &str = "NODE_ENV";

/// Mode, exposed variables and the optional secrets resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentConfig {
    mode: BuildMode,
    exposed_vars: BTreeMap<String, String>,
    secrets_override: Option<PathBuf>,
}

impl EnvironmentConfig {
    pub fn new(
        mode: BuildMode,
        exposed_vars: BTreeMap<String, String>,
        secrets_override: Option<PathBuf>,
    ) -> Self {
        Self {
            mode,
            exposed_vars,
            secrets_override,
        }
    }

    /// Only `NODE_ENV`, no secrets
    pub fn for_mode(mode: BuildMode) -> Self {
        let mut exposed_vars = BTreeMap::new();
        exposed_vars.insert(MODE_VAR.to_string(), mode.as_str().to_string());
        Self::new(mode, exposed_vars, None)
    }

    pub fn mode(&self) -> BuildMode {
        self.mode
    }

    /// Allow-listed variables visible to emitted bundles
    pub fn exposed_vars(&self) -> &BTreeMap<String, String> {
        &self.exposed_vars
    }

    /// Mode-specific secrets module, when one exists on disk
    pub fn secrets_override(&self) -> Option<&Path> {
        self.secrets_override.as_deref()
    }
}

/// Package `description` / `version`, the dynamic manifest fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageMetadata {
    pub description: Option<String>,
    pub version: Option<String>,
}

impl PackageMetadata {
    pub fn new(description: Option<String>, version: Option<String>) -> Self {
        Self {
            description,
            version,
        }
    }

    /// Dynamic fields in merge order; absent values are omitted
    pub fn to_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        if let Some(description) = &self.description {
            fields.insert("description".to_string(), Value::String(description.clone()));
        }
        if let Some(version) = &self.version {
            fields.insert("version".to_string(), Value::String(version.clone()));
        }
        fields
    }

    pub fn is_complete(&self) -> bool {
        self.description.is_some() && self.version.is_some()
    }
}
