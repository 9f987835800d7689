//! Depot Resolve
//!
//! Deduplicating, coordinate-keyed dependency resolution. Concurrent
//! requests for the same canonical key share exactly one invocation of the
//! underlying resolution procedure; every requester observes the same
//! outcome, success or failure. Completed slots expire on a fixed TTL so
//! staleness is bounded without any freshness guarantee.
//!
//! # Core Concepts
//!
//! - [`DependencySpec`]: coordinate descriptor canonicalized to
//!   `group:name:version[:classifier@extension]`
//! - [`ResolutionBackend`]: the delegated, possibly I/O-bound resolution
//!   procedure, invoked exactly once per key per TTL window
//! - [`DependencyResolver`]: the single-flight table and its entry points
//!
//! # Example
//!
//! ```rust,ignore
//! use depot_resolve::{DependencyResolver, DependencySpec};
//!
//! let resolver = DependencyResolver::new(backend);
//! let files = resolver
//!     .resolve_module(&DependencySpec::new("com.example", "foo", "1.0"))
//!     .await?;
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod backend;
mod request;
mod resolver;

pub use backend::{BackendError, ResolutionBackend};
pub use request::{DependencyRequest, DependencySpec};
pub use resolver::{DependencyResolver, ResolveError, DEFAULT_TTL};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
