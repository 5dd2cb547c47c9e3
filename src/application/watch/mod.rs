//! Watch Use Case
//!
//! Continuous rebuilds while sources change:
//! - File system monitoring (via `notify` crate)
//! - Debouncing (100ms)
//! - Full rebuild per change batch
//! - Reload plan: which bundles changed, and whether each can be hot-swapped
//!
//! ## Usage
//!
//! ```ignore
//! let use_case = WatchUseCase::new(WatchOptions::new(root));
//! use_case.start(running, |event| println!("{}", event.to_json()))?;
//! ```

mod event;
mod use_case;


pub use event::{WatchEvent, WatchOptions, WatcherState, DEBOUNCE_MS};
pub use use_case::{is_relevant, plan_reload, watch_roots, ReloadPlan, WatchUseCase};
