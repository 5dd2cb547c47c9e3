//! Build mode value object

use serde::{Deserialize, Serialize};

/// Environment mode the pipeline runs under
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    /// Debug source maps, `__DEV__ = true`
    #[default]
    Development,
    /// No source maps, `__DEV__ = false`
    Production,
}

impl BuildMode {
    /// Values accepted in `NODE_ENV`
    pub const VALID_VALUES: [&'static str; 2] = ["development", "production"];

    /// Parse a mode name (case-insensitive)
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "development" => Some(BuildMode::Development),
            "production" => Some(BuildMode::Production),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildMode::Development => "development",
            BuildMode::Production => "production",
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, BuildMode::Development)
    }

    pub fn is_production(&self) -> bool {
        matches!(self, BuildMode::Production)
    }
}

impl std::fmt::Display for BuildMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
