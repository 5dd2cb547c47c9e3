//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod content_hash;
mod environment;
mod mode;
mod runtime_context;
mod transform_kind;

pub use content_hash::ContentHash;
pub use environment::{EnvironmentConfig, PackageMetadata, MODE_VAR};
pub use mode::BuildMode;
pub use runtime_context::RuntimeContext;
pub use transform_kind::TransformKind;
