//! Clean Use Case
//!
//! Deletes the previous build's outputs from the output directory:
//! - Loading the build lock to find written files
//! - Verifying content hashes before deletion
//! - Removing the lock once its files are handled

mod options;
mod result;
mod use_case;

pub use options::CleanOptions;
pub use result::{CleanResult, SkipReason, SkippedFile};
pub use use_case::CleanUseCase;
