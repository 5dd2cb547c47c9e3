//! extforge - build orchestrator for browser extension bundles
//!
//! Compiles a fixed set of entry points into per-target bundles, copies
//! static assets, synthesizes `manifest.json` and renders HTML pages that
//! load the right bundles. Outputs land in one directory, written only once
//! every step has succeeded.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{BuildContext, BuildResult, BuildUseCase, CleanUseCase, WatchUseCase};
pub use config::{BuildConfig, ProjectConfig};
pub use domain::value_objects::{BuildMode, RuntimeContext, TransformKind};
pub use error::{ExtforgeError, ExtforgeResult};
