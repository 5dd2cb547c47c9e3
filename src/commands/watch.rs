//! Watch command handler

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};

use extforge::application::watch::{WatchEvent, WatchOptions, WatchUseCase};
use extforge::domain::value_objects::BuildMode;

use super::project_root;

pub fn cmd_watch(
    project: &Path,
    mode: Option<BuildMode>,
    out_dir: Option<&Path>,
    json: bool,
) -> Result<()> {
    let options = WatchOptions::new(project_root(project)?)
        .with_mode(mode)
        .with_output_dir(out_dir.map(Path::to_path_buf));

    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();
    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .context("failed to install Ctrl+C handler")?;

    WatchUseCase::new(options).start(running, |event| {
        if json {
            println!("{}", event.to_json());
        } else {
            eprintln!("[{}] {}", timestamp(), render_watch_event(&event));
        }
    })?;

    Ok(())
}

/// `HH:MM:SS` (UTC) for console lines
fn timestamp() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 86_400;
            format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
        })
        .unwrap_or_else(|_| "00:00:00".to_string())
}

fn render_watch_event(event: &WatchEvent) -> String {
    match event {
        WatchEvent::WatchStarted { project, watching } => format!(
            "Watching {} ({} paths). Press Ctrl+C to stop.",
            project,
            watching.len()
        ),
        WatchEvent::FilesChanged { paths } => format!("Changed: {}", paths.join(", ")),
        WatchEvent::RebuildStarted => "Rebuilding...".to_string(),
        WatchEvent::RebuildComplete {
            written,
            hot,
            reload,
        } => {
            let mut line = format!("Wrote {} files", written);
            if !hot.is_empty() {
                line.push_str(&format!("; hot: {}", hot.join(", ")));
            }
            if !reload.is_empty() {
                line.push_str(&format!("; reload extension: {}", reload.join(", ")));
            }
            line
        }
        WatchEvent::Warning { message } => format!("warning: {}", message),
        WatchEvent::Error { message } => format!("error: {}", message),
        WatchEvent::Shutdown => "Stopped".to_string(),
    }
}
