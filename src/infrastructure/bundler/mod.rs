//! Bundler Implementations
//!
//! - `InlineBundler`: built-in IIFE wrapper
//! - `CommandBundler`: external bundler process

mod command;
mod inline;

use std::path::Path;

pub use command::{CommandBundler, SECRETS_VAR};
pub use inline::InlineBundler;

use crate::config::BundlerConfig;
use crate::domain::ports::Bundler;
use crate::error::ExtforgeResult;

/// Pick the bundler the project configured
pub fn bundler_for(config: &BundlerConfig, project_root: &Path) -> ExtforgeResult<Box<dyn Bundler>> {
    match &config.command {
        Some(argv) => Ok(Box::new(CommandBundler::new(argv, project_root)?)),
        None => Ok(Box::new(InlineBundler::new())),
    }
}
