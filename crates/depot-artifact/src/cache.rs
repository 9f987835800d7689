//! Cache backend contract
//!
//! A cache backend maps an identifier to a deterministic local file and
//! materializes artifact content there. [`CacheBackend::locate`] is pure;
//! [`CacheBackend::materialize`] performs the byte transfer and must publish
//! atomically, so a concurrent reader never observes a partial file.

use crate::artifact::Artifact;
use crate::identifier::Identifier;
use std::path::PathBuf;

/// Content-addressable local store for artifacts
pub trait CacheBackend: Send + Sync {
    /// Deterministic local path for an identifier
    ///
    /// Pure: repeated calls for the same identifier address the same
    /// location, whether or not anything has been materialized there.
    fn locate(&self, identifier: &Identifier) -> PathBuf;

    /// Materialize an artifact's content to its located path
    ///
    /// Returns the cached artifact. Must be idempotent for content already
    /// on disk and atomic with respect to concurrent readers.
    ///
    /// # Errors
    /// [`CacheError::Missing`] for an artifact with no content;
    /// [`CacheError::Io`] for transfer failures, never a silent "present".
    fn materialize(&self, artifact: &Artifact) -> Result<Artifact, CacheError>;
}

/// Cache materialization failures
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// Materialization of an artifact that has no content
    #[error("cannot materialize missing artifact: {0}")]
    Missing(Identifier),

    /// Byte transfer failed
    #[error("cache i/o failure for {identifier}: {source}")]
    Io {
        /// Artifact being materialized
        identifier: Identifier,
        /// Underlying failure
        #[source]
        source: std::io::Error,
    },
}
