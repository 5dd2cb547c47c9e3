//! Domain Layer
//!
//! The build model without I/O: targets, asset rules, pages, artifacts and
//! the pure transforms between them.
//!
//! ## Structure
//!
//! - `entities/` - Targets, rules, pages, artifacts, lockfile
//! - `value_objects/` - Mode, runtime context, hashes, environment
//! - `services/` - Manifest synthesis and page templating
//! - `ports/` - File system, bundler, lockfile store and event sink

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
