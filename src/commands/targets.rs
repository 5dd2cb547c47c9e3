//! Targets command handler
//!
//! Lists the registry: context, entry, bundle name and reload policy.

use std::path::Path;

use anyhow::Result;
use serde_json::json;

use extforge::application::build::BuildContext;
use extforge::domain::value_objects::BuildMode;
use extforge::infrastructure::LocalFs;

use super::project_root;

pub fn cmd_targets(
    project: &Path,
    mode: Option<BuildMode>,
    out_dir: Option<&Path>,
    json: bool,
) -> Result<()> {
    let root = project_root(project)?;
    let ctx = BuildContext::load(&root, mode, out_dir, &LocalFs::new())?;
    let mode = ctx.mode();

    for target in ctx.config.registry.iter() {
        let pages: Vec<&str> = ctx
            .config
            .pages
            .iter()
            .filter(|p| p.includes(target.name()))
            .map(|p| p.output_filename())
            .collect();
        let hot = target.hot_reloadable(mode);

        if json {
            println!(
                "{}",
                json!({
                    "event": "target",
                    "command": "targets",
                    "name": target.name(),
                    "context": target.runtime_context().as_str(),
                    "entry": target.entry_path(),
                    "bundle": target.bundle_filename(),
                    "hot_reloadable": hot,
                    "pages": pages,
                })
            );
        } else {
            let line = format!(
                "{:<14} {:<15} {:<24} {:<7} {}",
                target.name(),
                target.runtime_context(),
                target.bundle_filename(),
                if hot { "hot" } else { "reload" },
                pages.join(", ")
            );
            println!("{}", line.trim_end());
        }
    }
    Ok(())
}
