//! Domain Entities
//!
//! - `BuildTarget` / `TargetRegistry` - entry points and their runtime contexts
//! - `AssetRule` / `AssetTransformTable` - file category to transform
//! - `PageTemplate` - HTML shell bound to a chunk set
//! - `Artifact` / `ArtifactSet` - output files held in memory
//! - `Lockfile` - files written by the previous build

mod artifact;
mod asset_rule;
mod build_target;
mod lockfile;
mod page_template;

pub use artifact::{Artifact, ArtifactKind, ArtifactSet};
pub use asset_rule::{AssetRule, AssetTransformTable, BINARY_EXTENSIONS, VENDOR_EXCLUDE};
pub use build_target::{BuildTarget, TargetRegistry, BUNDLE_SUFFIX};
pub(crate) use lockfile::parse_lockfile_path;
pub use lockfile::{Lockfile, LockfileEntry, LOCKFILE_NAME};
pub use page_template::{default_pages, validate_pages, PageTemplate};
