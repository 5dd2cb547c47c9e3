//! Manifest Synthesizer
//!
//! Merges the hand-authored manifest with package metadata. The static
//! document is authoritative: merge starts from the dynamic fields and
//! spreads the static fields over them, so every key collision resolves to
//! the static value. Dynamic fields only backfill what the static document
//! leaves out.

use std::path::Path;

use serde_json::{Map, Value};

use crate::domain::value_objects::PackageMetadata;
use crate::error::{ExtforgeError, ExtforgeResult};

/// Output file name of the synthesized manifest
pub const MANIFEST_FILENAME: &str = "manifest.json";

/// Parse the static manifest. It must be a JSON object.
pub fn parse_static_manifest(content: &str, path: &Path) -> ExtforgeResult<Map<String, Value>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let value: Value = serde_json::from_str(content).map_err(|e| ExtforgeError::Manifest {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    match value {
        Value::Object(fields) => Ok(fields),
        other => Err(ExtforgeError::Manifest {
            path: path.to_path_buf(),
            message: format!("expected a JSON object, found {}", json_type(&other)),
        }),
    }
}

/// Spread `static_fields` over `dynamic`. Static wins on collision; a
/// colliding key keeps its dynamic position.
pub fn merge_fields(
    dynamic: Map<String, Value>,
    static_fields: Map<String, Value>,
) -> Map<String, Value> {
    let mut merged = dynamic;
    for (key, value) in static_fields {
        merged.insert(key, value);
    }
    merged
}

/// Produce the `manifest.json` text (compact JSON).
pub fn synthesize(
    static_content: &str,
    static_path: &Path,
    metadata: &PackageMetadata,
) -> ExtforgeResult<String> {
    let static_fields = parse_static_manifest(static_content, static_path)?;
    let merged = merge_fields(metadata.to_fields(), static_fields);

    serde_json::to_string(&Value::Object(merged)).map_err(|e| ExtforgeError::Manifest {
        path: static_path.to_path_buf(),
        message: e.to_string(),
    })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
