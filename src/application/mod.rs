//! Application Layer
//!
//! Use cases that orchestrate the build flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `BuildUseCase` - Validate, clean, produce artifacts, write, save lock
//! - `CleanUseCase` - Remove the outputs recorded in the build lock
//! - `WatchUseCase` - Rebuild on source changes and plan reloads
//!
//! ## Steps
//!
//! - `steps` - Pure `(context, ArtifactSet) -> ArtifactSet` pipeline steps
//! - `environment` - Mode, exposed variables, secrets and package metadata

pub mod build;
pub mod clean;
pub mod environment;
pub mod steps;
pub mod watch;

#[cfg(test)]
mod fixture;

pub use build::{BuildContext, BuildResult, BuildUseCase, BundleSummary};
pub use clean::{CleanOptions, CleanResult, CleanUseCase, SkipReason, SkippedFile};
pub use environment::secrets_path;
pub use watch::{
    plan_reload, ReloadPlan, WatchEvent, WatchOptions, WatchUseCase, WatcherState, DEBOUNCE_MS,
};
