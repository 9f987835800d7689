//! Repository contract
//!
//! A repository is a capability, not a value: it maps identifiers to
//! artifacts and optionally serves coordinate-listing documents for a
//! (group, name) pair. Implemented by the integrator, consumed by the path
//! translator and by direct coordinate lookups.

use crate::artifact::Artifact;
use crate::identifier::Identifier;
use std::path::PathBuf;

/// Provider capability resolving identifiers to artifacts
pub trait Repository: Send + Sync {
    /// Resolve an identifier to an artifact
    ///
    /// Total: returns [`Artifact::absent`] when nothing matches, never a
    /// null-like value, and never fails for "not found". Whether and when
    /// the result gets cached is the caller's decision via
    /// [`Artifact::cache`].
    fn artifact(&self, identifier: &Identifier) -> Artifact;

    /// Coordinate-listing document for a (group, name) pair
    ///
    /// `None` when the provider does not support listings.
    fn metadata_listing(&self, group: &str, name: &str) -> Option<PathBuf> {
        let _ = (group, name);
        None
    }
}

/// Single-function artifact source backing [`ProviderRepository`]
pub trait ArtifactProvider: Send + Sync {
    /// Produce the artifact for an identifier, or [`Artifact::absent`]
    fn provide(&self, identifier: &Identifier) -> Artifact;
}

impl<F> ArtifactProvider for F
where
    F: Fn(&Identifier) -> Artifact + Send + Sync,
{
    fn provide(&self, identifier: &Identifier) -> Artifact {
        self(identifier)
    }
}

/// Repository adapter over a provider function
///
/// Lets an integrator stand up a repository from a single closure or trait
/// impl without writing the boilerplate.
#[derive(Debug, Clone)]
pub struct ProviderRepository<P> {
    provider: P,
}

impl<P: ArtifactProvider> ProviderRepository<P> {
    /// Wrap a provider
    #[inline]
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

impl<P: ArtifactProvider> Repository for ProviderRepository<P> {
    fn artifact(&self, identifier: &Identifier) -> Artifact {
        self.provider.provide(identifier)
    }
}
