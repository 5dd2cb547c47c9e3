//! Console Event Sink
//!
//! Human-readable progress on stderr. Per-file lines only at `-v`.

use std::io::{self, Write};
use std::sync::Mutex;

use is_terminal::IsTerminal;

use crate::domain::ports::{BuildEvent, BuildEventSink};

mod icons {
    pub const SUCCESS: &str = "✓";
    pub const WARNING: &str = "⚠";
    pub const PROGRESS: &str = "●";
    pub const ARROW: &str = "↳";
    pub const BUILD: &str = "📦";
    pub const CLEAN: &str = "🧹";
}

mod icons_ascii {
    pub const SUCCESS: &str = "[OK]";
    pub const WARNING: &str = "[WARN]";
    pub const PROGRESS: &str = "[..]";
    pub const ARROW: &str = "[>]";
    pub const BUILD: &str = "[BUILD]";
    pub const CLEAN: &str = "[CLEAN]";
}

#[derive(Debug, Clone, Copy)]
enum Icon {
    Success,
    Warning,
    Progress,
    Arrow,
    Build,
    Clean,
}

impl Icon {
    fn render(self, unicode: bool) -> &'static str {
        match (unicode, self) {
            (true, Icon::Success) => icons::SUCCESS,
            (true, Icon::Warning) => icons::WARNING,
            (true, Icon::Progress) => icons::PROGRESS,
            (true, Icon::Arrow) => icons::ARROW,
            (true, Icon::Build) => icons::BUILD,
            (true, Icon::Clean) => icons::CLEAN,
            (false, Icon::Success) => icons_ascii::SUCCESS,
            (false, Icon::Warning) => icons_ascii::WARNING,
            (false, Icon::Progress) => icons_ascii::PROGRESS,
            (false, Icon::Arrow) => icons_ascii::ARROW,
            (false, Icon::Build) => icons_ascii::BUILD,
            (false, Icon::Clean) => icons_ascii::CLEAN,
        }
    }
}

/// Event sink that prints progress lines
pub struct ConsoleEventSink {
    verbose: bool,
    unicode: bool,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleEventSink {
    /// Write to stderr; unicode icons only when stderr is a terminal
    pub fn stderr(verbose: bool) -> Self {
        let unicode = io::stderr().is_terminal();
        Self::with_writer(io::stderr(), verbose, unicode)
    }

    pub fn with_writer<W: Write + Send + 'static>(writer: W, verbose: bool, unicode: bool) -> Self {
        Self {
            verbose,
            unicode,
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn line(&self, icon: Icon, indent: bool, text: &str) {
        if let Ok(mut writer) = self.writer.lock() {
            let pad = if indent { "  " } else { "" };
            let _ = writeln!(writer, "{}{} {}", pad, icon.render(self.unicode), text);
        }
    }

    fn detail(&self, text: &str) {
        if self.verbose {
            self.line(Icon::Arrow, true, text);
        }
    }
}

impl BuildEventSink for ConsoleEventSink {
    fn on_event(&self, event: BuildEvent) {
        match event {
            BuildEvent::Started {
                project,
                output_dir,
                mode,
                target_count,
            } => self.line(
                Icon::Build,
                false,
                &format!(
                    "Building {} ({}, {} targets) -> {}",
                    project.display(),
                    mode,
                    target_count,
                    output_dir.display()
                ),
            ),
            BuildEvent::StageStarted { stage } => {
                if self.verbose {
                    self.line(Icon::Progress, false, stage.as_str());
                }
            }
            BuildEvent::SecretsResolved { path } => {
                self.detail(&format!("secrets: {}", path.display()))
            }
            BuildEvent::Warning { message } => self.line(Icon::Warning, false, &message),
            BuildEvent::Cleaned { removed, skipped } => {
                if removed > 0 || skipped > 0 || self.verbose {
                    self.line(
                        Icon::Clean,
                        false,
                        &format!("Removed {} previous outputs ({} kept)", removed, skipped),
                    );
                }
            }
            BuildEvent::TargetBundled {
                target,
                file,
                bytes,
            } => self.detail(&format!("{} -> {} ({} bytes)", target, file, bytes)),
            BuildEvent::AssetCopied { path } => self.detail(&format!("copied {}", path.display())),
            BuildEvent::ManifestSynthesized { path } => {
                self.detail(&format!("manifest {}", path.display()))
            }
            BuildEvent::PageRendered { filename, chunks } => {
                self.detail(&format!("{} [{}]", filename, chunks.join(", ")))
            }
            BuildEvent::FileWritten { path } => self.detail(&format!("wrote {}", path.display())),
            BuildEvent::Completed { written } => {
                self.line(Icon::Success, false, &format!("Wrote {} files", written))
            }
        }
    }

    fn wants_detailed_events(&self) -> bool {
        self.verbose
    }
}
