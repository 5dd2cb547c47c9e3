//! Command handlers for the `extforge` binary

mod build;
mod classify;
mod clean;
mod targets;
mod watch;

pub use build::cmd_build;
pub use classify::cmd_classify;
pub use clean::cmd_clean;
pub use targets::cmd_targets;
pub use watch::cmd_watch;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use extforge::config::BuildConfig;
use extforge::domain::ports::BuildEventSink;
use extforge::infrastructure::{ConsoleEventSink, JsonEventSink};

/// Sink for the global `--json` / `-v` flags
pub(crate) fn event_sink(json: bool, verbose: u8, command: &'static str) -> Arc<dyn BuildEventSink> {
    if json {
        Arc::new(JsonEventSink::stdout(command))
    } else {
        Arc::new(ConsoleEventSink::stderr(verbose > 0))
    }
}

/// Absolute project root
pub(crate) fn project_root(project: &Path) -> Result<PathBuf> {
    project
        .canonicalize()
        .with_context(|| format!("project directory {} not found", project.display()))
}

/// Config only, for commands that do not build
pub(crate) fn load_config(
    root: &Path,
    out_dir: Option<&Path>,
    sink: &dyn BuildEventSink,
) -> Result<BuildConfig> {
    let (mut config, warnings) = BuildConfig::load(root)?;
    for warning in warnings {
        sink.on_event(extforge::domain::ports::BuildEvent::Warning {
            message: warning.to_string(),
        });
    }
    if let Some(dir) = out_dir {
        config = config.with_output_dir(dir);
    }
    Ok(config)
}
