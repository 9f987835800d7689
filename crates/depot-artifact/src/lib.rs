//! Depot Artifact Model
//!
//! Coordinate-addressed artifact values and the contracts their providers
//! and caches satisfy.
//!
//! # Core Concepts
//!
//! - [`Identifier`]: immutable (group, name, version, classifier, extension)
//!   coordinates plus an open, typed attribute side-table
//! - [`Artifact`]: a value named by a coordinate, in an uncached or a
//!   locally-materialized state
//! - [`Metadata`]: content hash plus an extensible key/value map
//! - [`Repository`]: the provider capability resolving identifiers to
//!   artifacts
//! - [`CacheBackend`]: storage mapping an identifier to a deterministic local
//!   file
//!
//! Every "nothing" value here is a total sentinel, never a null-like hole:
//! [`Identifier::absent`], [`AttributeCollection::none`],
//! [`Metadata::absent`], and [`Artifact::absent`] all define every operation
//! as either a safe default or a well-defined failure.
//!
//! # Example
//!
//! ```rust,ignore
//! use depot_artifact::{Artifact, ArtifactKind, ContentSource, Identifier};
//!
//! let id = Identifier::new("com.example", "foo", "1.0");
//! let artifact = Artifact::uncached(id, ArtifactKind::Binary, ContentSource::bytes(b"X".to_vec()));
//! assert!(artifact.is_present());
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
mod artifact;
mod attribute;
mod cache;
mod identifier;
mod metadata;
mod repository;
mod transform;

// Re-exports
pub use artifact::{
    Artifact, ArtifactKind, ArtifactState, ContentProvider, ContentSource, MissingArtifact,
};
pub use attribute::{AttributeCollection, AttributeKey, ErasedKey, UnsupportedMutation};
pub use cache::{CacheBackend, CacheError};
pub use identifier::Identifier;
pub use metadata::Metadata;
pub use repository::{ArtifactProvider, ProviderRepository, Repository};
pub use transform::ArtifactTransformer;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
