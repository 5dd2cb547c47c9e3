//! Clean command handler
//!
//! Removes the files recorded in the build lock.

use std::path::Path;

use anyhow::Result;
use serde_json::json;

use extforge::application::clean::{CleanOptions, CleanUseCase};
use extforge::domain::ports::BuildEvent;
use extforge::infrastructure::{LocalFs, TomlLockfileRepository};

use super::{event_sink, load_config, project_root};

pub fn cmd_clean(
    project: &Path,
    out_dir: Option<&Path>,
    dry_run: bool,
    json: bool,
    verbose: u8,
) -> Result<()> {
    let root = project_root(project)?;
    let sink = event_sink(json, verbose, "clean");
    let config = load_config(&root, out_dir, sink.as_ref())?;

    let use_case = CleanUseCase::new(TomlLockfileRepository::new(), LocalFs::new());
    let result = use_case.execute(&config.output_dir, &CleanOptions::new().with_dry_run(dry_run))?;

    for warning in &result.warnings {
        sink.on_event(BuildEvent::Warning {
            message: warning.clone(),
        });
    }

    if json {
        for path in &result.deleted {
            println!(
                "{}",
                json!({"event": "file_removed", "command": "clean", "path": path, "dry_run": dry_run})
            );
        }
        for skipped in &result.skipped {
            println!(
                "{}",
                json!({
                    "event": "file_kept",
                    "command": "clean",
                    "path": skipped.path,
                    "reason": skipped.reason.to_string(),
                })
            );
        }
    } else if dry_run || verbose > 0 {
        let verb = if dry_run { "would remove" } else { "removed" };
        for path in &result.deleted {
            eprintln!("  {} {}", verb, path.display());
        }
        for skipped in &result.skipped {
            eprintln!("  kept {} ({})", skipped.path.display(), skipped.reason);
        }
    }

    sink.on_event(BuildEvent::Cleaned {
        removed: result.deleted.len(),
        skipped: result.skipped.len(),
    });
    Ok(())
}
