//! Event Sink Implementations
//!
//! Concrete implementations of BuildEventSink:
//! - JsonEventSink: NDJSON output for CI/automation
//! - ConsoleEventSink: Human-readable progress

mod console;
mod json;

pub use console::ConsoleEventSink;
pub use json::{event_to_json, JsonEventSink};

#[cfg(test)]
pub(crate) use test_support::SharedBuffer;
