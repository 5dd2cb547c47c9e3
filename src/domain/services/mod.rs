//! Domain Services
//!
//! Pure transformations over in-memory text. No I/O.
//!
//! - `manifest` - static manifest merged with package metadata
//! - `templater` - script injection into HTML shells

pub mod manifest;
pub mod templater;

pub use manifest::{merge_fields, parse_static_manifest, synthesize, MANIFEST_FILENAME};
pub use templater::{chunk_files, render, render_page, script_tag};
