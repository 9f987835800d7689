//! Virtual-path translator
//!
//! Decodes a hierarchical virtual path into an identifier (or recognizes it
//! as a listing path), resolves it through the repository, and hands back a
//! local file location. The translator is state-free per call and is the
//! sole caller of the repository from the virtual-filesystem side.

use crate::candidates::CandidateSource;
use crate::codec::{Coordinates, LayoutCodec, PathQuery};
use depot_artifact::{
    Artifact, CacheBackend, CacheError, MissingArtifact, Repository,
};
use std::fmt::{self, Debug, Formatter};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Outcome of translating one virtual path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    /// A local file backs the request: either the materialized artifact or
    /// the deterministic not-yet-materialized cache location of a non-present
    /// one (the host's own not-found handling proceeds on the latter)
    Resolved(PathBuf),
    /// A coordinate-listing document backs the request
    Listing(PathBuf),
    /// The request is outside this system's purview; pass it through
    /// unmodified. Never an error.
    PassThrough,
}

/// Translation failures
///
/// Only materialization and file access can fail; an unmatched path is
/// [`Translation::PassThrough`], not an error.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    /// Cache materialization failed
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Materialized artifact lost its file
    #[error(transparent)]
    Missing(#[from] MissingArtifact),
}

/// Bridge from a path-shaped client to a coordinate-shaped repository
pub struct PathTranslator {
    root: String,
    repository: Arc<dyn Repository>,
    cache: Arc<dyn CacheBackend>,
    candidates: Arc<dyn CandidateSource>,
    layout: Arc<dyn LayoutCodec>,
}

impl PathTranslator {
    /// Create a translator rooted at `root`
    #[must_use]
    pub fn new(
        root: impl AsRef<Path>,
        repository: Arc<dyn Repository>,
        cache: Arc<dyn CacheBackend>,
        candidates: Arc<dyn CandidateSource>,
        layout: Arc<dyn LayoutCodec>,
    ) -> Self {
        Self {
            root: clean_root(root.as_ref()),
            repository,
            cache,
            candidates,
            layout,
        }
    }

    /// Normalized repository root, always `/`-separated with a trailing `/`
    #[inline]
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Translate one virtual path
    ///
    /// # Errors
    /// [`TranslateError`] when a matched artifact fails to materialize or
    /// open; collaborator failures propagate unmodified and are never
    /// reported as pass-through.
    pub fn translate(&self, path: &str) -> Result<Translation, TranslateError> {
        let normalized = path.replace('\\', "/");
        let Some(relative) = normalized.strip_prefix(&self.root) else {
            warn!(path, root = %self.root, "request outside repository root");
            return Ok(Translation::PassThrough);
        };

        match self.layout.decode(relative) {
            Some(PathQuery::Artifact(coords)) => self.resolve_artifact(&coords),
            Some(PathQuery::Listing { group, name }) => {
                match self.repository.metadata_listing(&group, &name) {
                    Some(listing) => Ok(Translation::Listing(listing)),
                    None => {
                        debug!(%group, %name, "no coordinate listing");
                        Ok(Translation::PassThrough)
                    }
                }
            }
            None if relative.ends_with('/') => {
                debug!(relative, "directory listing not supported");
                Ok(Translation::PassThrough)
            }
            None => {
                debug!(relative, "path does not match the coordinate layout");
                Ok(Translation::PassThrough)
            }
        }
    }

    /// Resolve decoded coordinates against the pending candidates
    ///
    /// Several pending descriptors may share the coordinates and differ only
    /// by attributes; the first whose repository lookup is non-absent wins.
    fn resolve_artifact(&self, coords: &Coordinates) -> Result<Translation, TranslateError> {
        for attributes in self
            .candidates
            .matching(&coords.group, &coords.name, &coords.version)
        {
            let identifier = coords.to_identifier().with_attributes(attributes);
            let artifact = self.repository.artifact(&identifier);
            if artifact.is_absent() {
                continue;
            }
            return self.deliver(artifact);
        }
        debug!(
            group = %coords.group,
            name = %coords.name,
            version = %coords.version,
            "no pending candidate produced an artifact"
        );
        Ok(Translation::PassThrough)
    }

    fn deliver(&self, artifact: Artifact) -> Result<Translation, TranslateError> {
        if !artifact.is_present() {
            // Deterministic location lets the host's own not-found handling
            // proceed naturally.
            return Ok(Translation::Resolved(
                self.cache.locate(artifact.identifier()),
            ));
        }
        let cached = artifact.cache(self.cache.as_ref())?;
        let path = cached.file_location()?.to_path_buf();
        Ok(Translation::Resolved(path))
    }
}

impl Debug for PathTranslator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathTranslator")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

/// Normalize a root path to `/`-separated form with a trailing `/`
fn clean_root(root: &Path) -> String {
    let mut cleaned = root.to_string_lossy().replace('\\', "/");
    if !cleaned.ends_with('/') {
        cleaned.push('/');
    }
    cleaned
}
