//! Depot Cache
//!
//! A layout-addressed local store: every identifier maps to one
//! deterministic file under a root directory, and materialization publishes
//! atomically so a concurrent reader never observes a partial file.
//!
//! # Example
//!
//! ```rust,ignore
//! use depot_cache::LocatedCache;
//! use depot_layout::MavenLayout;
//!
//! let cache = LocatedCache::new("/var/cache/depot", MavenLayout);
//! let local = cache.locate(&identifier); // pure, no I/O
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod located;

pub use located::LocatedCache;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
