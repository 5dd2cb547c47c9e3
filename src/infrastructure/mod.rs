//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Local file system with atomic writes
//! - `repositories/` - TOML build lock
//! - `bundler/` - Inline and external-command bundlers
//! - `events/` - Console and NDJSON event sinks

pub mod bundler;
pub mod events;
pub mod fs;
pub mod repositories;

// Re-export for convenience
pub use bundler::{bundler_for, CommandBundler, InlineBundler};
pub use events::{ConsoleEventSink, JsonEventSink};
pub use fs::LocalFs;
pub use repositories::TomlLockfileRepository;
