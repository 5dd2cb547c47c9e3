//! Asset Transform Table
//!
//! Maps a source path to the transform applied to it. Rules are tried in
//! declaration order and the first match wins, so narrower rules must come
//! before broader ones. Patterns use gitignore semantics through the `ignore`
//! crate (`*.css` matches at any depth, `node_modules/` matches a directory
//! and everything below it).

use std::path::{Component, Path, PathBuf};

use ignore::gitignore::{Gitignore, GitignoreBuilder};

use crate::domain::value_objects::TransformKind;
use crate::error::{ExtforgeError, ExtforgeResult};

/// Vendored dependency tree excluded by every default rule
pub const VENDOR_EXCLUDE: &str = "node_modules/";

/// Binary media and font extensions copied verbatim
pub const BINARY_EXTENSIONS: [&str; 10] = [
    "jpg", "jpeg", "png", "gif", "eot", "otf", "svg", "ttf", "woff", "woff2",
];

/// One `matcher -> transform` rule with its exclusions
#[derive(Debug)]
pub struct AssetRule {
    transform: TransformKind,
    matcher: Gitignore,
    excludes: Gitignore,
}

impl AssetRule {
    /// Compile a rule. Fails on an empty, negated or malformed pattern.
    pub fn new(
        pattern: impl Into<String>,
        transform: TransformKind,
        exclude_patterns: Vec<String>,
    ) -> ExtforgeResult<Self> {
        let pattern = pattern.into();
        let matcher = compile(std::slice::from_ref(&pattern))?;
        let excludes = compile(&exclude_patterns)?;

        Ok(Self {
            transform,
            matcher,
            excludes,
        })
    }

    pub fn transform(&self) -> TransformKind {
        self.transform
    }

    /// `rel_path` must be relative to the project root
    pub fn matches(&self, rel_path: &Path) -> bool {
        if self.excludes.matched_path_or_any_parents(rel_path, false).is_ignore() {
            return false;
        }
        self.matcher.matched(rel_path, false).is_ignore()
    }
}

fn compile(patterns: &[String]) -> ExtforgeResult<Gitignore> {
    let mut builder = GitignoreBuilder::new("");

    for pattern in patterns {
        let trimmed = pattern.trim();
        if trimmed.is_empty() {
            return Err(ExtforgeError::InvalidMatcher {
                pattern: pattern.clone(),
                message: "pattern is empty".to_string(),
            });
        }
        if trimmed.starts_with('!') {
            return Err(ExtforgeError::InvalidMatcher {
                pattern: pattern.clone(),
                message: "negated patterns are not supported".to_string(),
            });
        }
        builder
            .add_line(None, trimmed)
            .map_err(|e| ExtforgeError::InvalidMatcher {
                pattern: pattern.clone(),
                message: e.to_string(),
            })?;
    }

    builder.build().map_err(|e| ExtforgeError::InvalidMatcher {
        pattern: patterns.join(", "),
        message: e.to_string(),
    })
}

/// Ordered rule list; first match wins
#[derive(Debug)]
pub struct AssetTransformTable {
    rules: Vec<AssetRule>,
}

impl AssetTransformTable {
    pub fn new(rules: Vec<AssetRule>) -> Self {
        Self { rules }
    }

    /// style, binary-file-copy, markup, script, in that order
    pub fn defaults() -> ExtforgeResult<Self> {
        let vendor = || vec![VENDOR_EXCLUDE.to_string()];
        Ok(Self::new(vec![
            AssetRule::new("*.css", TransformKind::Style, vendor())?,
            AssetRule::new(
                format!("*.{{{}}}", BINARY_EXTENSIONS.join(",")),
                TransformKind::BinaryFileCopy,
                vendor(),
            )?,
            AssetRule::new("*.html", TransformKind::Markup, vendor())?,
            AssetRule::new("*.{js,jsx}", TransformKind::Script, vendor())?,
        ]))
    }

    /// Transform for `path`, or `None` when no rule handles it.
    ///
    /// Absolute paths are made relative to `root` first.
    pub fn classify_in(&self, root: &Path, path: &Path) -> Option<TransformKind> {
        let rel = relative_to(root, path);
        self.rules
            .iter()
            .find(|rule| rule.matches(&rel))
            .map(|rule| rule.transform())
    }

    /// Transform for a project-relative path
    pub fn classify(&self, rel_path: &Path) -> Option<TransformKind> {
        self.classify_in(Path::new(""), rel_path)
    }
}

fn relative_to(root: &Path, path: &Path) -> PathBuf {
    let stripped = path.strip_prefix(root).unwrap_or(path);
    stripped
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect()
}
