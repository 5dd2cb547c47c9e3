//! Transform kind value object - the loader applied to a file category

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransformKind {
    /// Stylesheets (`.css`)
    Style,
    /// Images and fonts, emitted verbatim
    BinaryFileCopy,
    /// HTML shells
    Markup,
    /// JavaScript / JSX sources
    Script,
}

impl TransformKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransformKind::Style => "style",
            TransformKind::BinaryFileCopy => "binary-file-copy",
            TransformKind::Markup => "markup",
            TransformKind::Script => "script",
        }
    }
}

impl std::fmt::Display for TransformKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
