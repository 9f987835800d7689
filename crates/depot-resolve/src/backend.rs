//! Resolution backend contract
//!
//! The resolver never performs I/O itself: it delegates each coordinate to a
//! [`ResolutionBackend`] exactly once per TTL window. A backend typically
//! constructs a transient resolution scope, submits the dependency, pulls
//! the resulting file set, and discards the scope.

use crate::request::DependencySpec;
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Delegated resolution procedure
#[async_trait]
pub trait ResolutionBackend: Send + Sync {
    /// Resolve one descriptor to its file set
    ///
    /// `ticket` is a process-unique counter value, usable to name the
    /// backend's transient resolution scope.
    ///
    /// # Errors
    /// Any [`BackendError`]; the resolver broadcasts it to every concurrent
    /// requester of the same key.
    async fn resolve(
        &self,
        ticket: u64,
        spec: &DependencySpec,
    ) -> Result<BTreeSet<PathBuf>, BackendError>;
}

/// Failures of the delegated resolution procedure
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// No provider could produce the dependency
    #[error("dependency not found: {0}")]
    NotFound(String),

    /// The transient resolution scope failed
    #[error("resolution scope failure: {0}")]
    Scope(String),

    /// I/O failure while pulling the file set
    #[error("i/o failure during resolution: {0}")]
    Io(#[from] std::io::Error),
}
