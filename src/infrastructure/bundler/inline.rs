//! Inline bundler
//!
//! Wraps one entry in an IIFE with the build-time globals in scope. There
//! is no module graph resolution here; projects that need one configure an
//! external bundler command instead.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::json;

use crate::domain::ports::{BundleRequest, Bundler};
use crate::error::{ExtforgeError, ExtforgeResult};

const SOURCE_MAP_PREFIX: &str = "//# sourceMappingURL=data:application/json;charset=utf-8;base64,";

/// Built-in bundler used when no `[bundler] command` is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineBundler;

impl InlineBundler {
    pub fn new() -> Self {
        Self
    }
}

impl Bundler for InlineBundler {
    fn name(&self) -> &str {
        "inline"
    }

    fn bundle(&self, request: &BundleRequest<'_>) -> ExtforgeResult<String> {
        let mode = request.env.mode();
        let env_json = serde_json::to_string(request.env.exposed_vars()).map_err(|e| {
            ExtforgeError::Transform {
                path: request.entry_path.to_path_buf(),
                message: e.to_string(),
            }
        })?;

        let mut header = String::new();
        header.push_str(&format!(
            "/* {} ({}) */\n",
            request.target.bundle_filename(),
            mode
        ));
        header.push_str("(function () {\n");
        header.push_str(&format!("var process = {{ env: {} }};\n", env_json));
        header.push_str(&format!("var __DEV__ = {};\n", !mode.is_production()));
        if let Some(secrets) = request.secrets {
            header.push_str("var secrets = (function () {\n");
            header.push_str("var module = { exports: {} };\nvar exports = module.exports;\n");
            header.push_str(secrets);
            if !secrets.ends_with('\n') {
                header.push('\n');
            }
            header.push_str("return module.exports;\n})();\n");
        }

        let mut out = header.clone();
        out.push_str(request.source);
        if !request.source.ends_with('\n') {
            out.push('\n');
        }
        out.push_str("})();\n");

        if mode.is_development() {
            let map = source_map(request, line_count(&header));
            out.push_str(SOURCE_MAP_PREFIX);
            out.push_str(&STANDARD.encode(map));
            out.push('\n');
        }

        Ok(out)
    }
}

fn line_count(text: &str) -> usize {
    text.matches('\n').count()
}

/// Line-level source map: every entry line maps to column 0 of its source
/// line; header lines map to nothing.
fn source_map(request: &BundleRequest<'_>, header_lines: usize) -> String {
    let source_lines = request.source.lines().count();
    let mut mappings = ";".repeat(header_lines);
    for i in 0..source_lines {
        if i > 0 {
            mappings.push(';');
        }
        mappings.push_str(if i == 0 { "AAAA" } else { "AACA" });
    }

    json!({
        "version": 3,
        "file": request.target.bundle_filename(),
        "sources": [request.target.entry_path().to_string_lossy().replace('\\', "/")],
        "sourcesContent": [request.source],
        "names": [],
        "mappings": mappings,
    })
    .to_string()
}
