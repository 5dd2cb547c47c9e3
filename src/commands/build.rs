//! Build command handler

use std::path::Path;

use anyhow::{Context, Result};

use extforge::application::build::{BuildContext, BuildUseCase};
use extforge::domain::value_objects::BuildMode;
use extforge::infrastructure::{bundler_for, LocalFs, TomlLockfileRepository};

use super::{event_sink, project_root};

pub fn cmd_build(
    project: &Path,
    mode: Option<BuildMode>,
    out_dir: Option<&Path>,
    json: bool,
    verbose: u8,
) -> Result<()> {
    let root = project_root(project)?;
    let fs = LocalFs::new();
    let ctx = BuildContext::load(&root, mode, out_dir, &fs)?;
    let bundler = bundler_for(&ctx.config.bundler, ctx.project_root())?;

    let use_case = BuildUseCase::new(fs, bundler, TomlLockfileRepository::new());
    use_case
        .execute_with_events(&ctx, event_sink(json, verbose, "build"))
        .with_context(|| format!("build of {} failed", root.display()))?;
    Ok(())
}
