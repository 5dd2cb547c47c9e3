//! Classify command handler

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde_json::json;

use super::{event_sink, load_config, project_root};

pub fn cmd_classify(project: &Path, paths: &[PathBuf], json: bool) -> Result<()> {
    let root = project_root(project)?;
    let sink = event_sink(json, 0, "classify");
    let config = load_config(&root, None, sink.as_ref())?;

    for path in paths {
        let kind = config.rules.classify_in(&root, path);
        if json {
            println!(
                "{}",
                json!({
                    "event": "classified",
                    "command": "classify",
                    "path": path,
                    "transform": kind.map(|k| k.as_str()),
                })
            );
        } else {
            let label = kind.map(|k| k.as_str()).unwrap_or("unhandled");
            println!("{}\t{}", path.display(), label);
        }
    }
    Ok(())
}
