//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod build_events;
pub mod bundler;
pub mod file_system;
pub mod lockfile_repository;

pub use build_events::{
    BuildEvent, BuildEventSink, BuildStage, NoopEventSink, RecordingEventSink,
};
pub use bundler::{BundleRequest, Bundler};
pub use file_system::{FileSystem, FsError, FsResult};
pub use lockfile_repository::{LockfileError, LockfileRepository};
