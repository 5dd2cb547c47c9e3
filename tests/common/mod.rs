//! Common test utilities for extforge integration tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated extension project in a temp directory
//! - Fixtures: The stock extension layout
//! - `list_output`: Sorted file names of an output directory

pub mod env;
pub mod fixtures;

#[allow(unused_imports)]
pub use env::*;
#[allow(unused_imports)]
pub use fixtures::*;
