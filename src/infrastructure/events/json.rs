//! JSON Event Sink
//!
//! Outputs build events as NDJSON for CI/automation consumption.

use std::io::{self, Write};
use std::sync::Mutex;

use serde_json::{json, Value};

use crate::domain::ports::{BuildEvent, BuildEventSink};

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Value of the `command` field (`build`, `watch`)
    command: &'static str,
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout(command: &'static str) -> Self {
        Self::with_writer(command, io::stdout())
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(command: &'static str, writer: W) -> Self {
        Self {
            command,
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

/// Event payload without the `command` field
pub fn event_to_json(event: &BuildEvent) -> Value {
    match event {
        BuildEvent::Started {
            project,
            output_dir,
            mode,
            target_count,
        } => json!({
            "event": "start",
            "project": project.display().to_string(),
            "output_dir": output_dir.display().to_string(),
            "mode": mode.as_str(),
            "target_count": target_count,
        }),

        BuildEvent::StageStarted { stage } => json!({
            "event": "stage",
            "stage": stage.as_str(),
        }),

        BuildEvent::SecretsResolved { path } => json!({
            "event": "secrets_resolved",
            "path": path.display().to_string(),
        }),

        BuildEvent::Warning { message } => json!({
            "event": "warning",
            "message": message,
        }),

        BuildEvent::Cleaned { removed, skipped } => json!({
            "event": "cleaned",
            "removed": removed,
            "skipped": skipped,
        }),

        BuildEvent::TargetBundled {
            target,
            file,
            bytes,
        } => json!({
            "event": "target_bundled",
            "target": target,
            "file": file,
            "bytes": bytes,
        }),

        BuildEvent::AssetCopied { path } => json!({
            "event": "asset_copied",
            "path": path.display().to_string(),
        }),

        BuildEvent::ManifestSynthesized { path } => json!({
            "event": "manifest_synthesized",
            "path": path.display().to_string(),
        }),

        BuildEvent::PageRendered { filename, chunks } => json!({
            "event": "page_rendered",
            "filename": filename,
            "chunks": chunks,
        }),

        BuildEvent::FileWritten { path } => json!({
            "event": "item_written",
            "path": path.display().to_string(),
        }),

        BuildEvent::Completed { written } => json!({
            "event": "complete",
            "status": "success",
            "written": written,
        }),
    }
}

impl BuildEventSink for JsonEventSink {
    fn on_event(&self, event: BuildEvent) {
        let mut value = event_to_json(&event);
        if let Some(obj) = value.as_object_mut() {
            obj.insert("command".to_string(), json!(self.command));
        }
        self.write_event(value);
    }

    fn wants_detailed_events(&self) -> bool {
        true // JSON mode wants all events
    }
}
