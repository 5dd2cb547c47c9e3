//! Build Module
//!
//! One full pipeline run: validate, clean, bundle, copy assets, synthesize
//! the manifest, render pages, then write everything at once.
//!
//! ## Structure
//!
//! - `context` - Resolved inputs (`BuildContext`)
//! - `result` - Result types (`BuildResult`, `BundleSummary`)
//! - `use_case` - Orchestration (`BuildUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use extforge::application::build::{BuildContext, BuildUseCase};
//!
//! let ctx = BuildContext::load(root, None, None, &fs)?;
//! let result = BuildUseCase::new(fs, bundler, repo).execute(&ctx)?;
//! ```

mod context;
mod result;
mod use_case;

pub use context::BuildContext;
pub use result::{BuildResult, BundleSummary};
pub use use_case::BuildUseCase;
