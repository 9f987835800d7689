//! Layout-addressed cache backend
//!
//! [`LocatedCache`] materializes artifacts under a root directory at the
//! location the layout codec derives from their identifier. Writers stage
//! into a temporary file in the target directory and publish with a rename,
//! so readers only ever observe complete files.

use depot_artifact::{Artifact, ArtifactState, CacheBackend, CacheError, Identifier};
use depot_layout::LayoutCodec;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Local artifact store addressed by the coordinate layout
pub struct LocatedCache<L> {
    root: PathBuf,
    layout: L,
}

impl<L: LayoutCodec> LocatedCache<L> {
    /// Create a cache rooted at `root`
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, layout: L) -> Self {
        Self {
            root: root.into(),
            layout,
        }
    }

    /// Root directory of the store
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn io_error(identifier: &Identifier, source: io::Error) -> CacheError {
        CacheError::Io {
            identifier: identifier.clone(),
            source,
        }
    }

    /// Stream `source` into `target` atomically
    fn publish(
        identifier: &Identifier,
        source: &depot_artifact::ContentSource,
        target: &Path,
    ) -> Result<(), CacheError> {
        let io_err = |source| Self::io_error(identifier, source);

        let parent = target.parent().ok_or_else(|| {
            io_err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "cache target has no parent directory",
            ))
        })?;
        std::fs::create_dir_all(parent).map_err(io_err)?;

        // Stage in the target directory so the final rename never crosses a
        // filesystem boundary.
        let staging = tempfile::NamedTempFile::new_in(parent).map_err(io_err)?;
        let mut reader = source.open().map_err(io_err)?;
        io::copy(&mut reader, &mut staging.as_file())
            .map_err(io_err)?;
        staging
            .persist(target)
            .map_err(|err| io_err(err.error))?;
        Ok(())
    }
}

impl<L: LayoutCodec> CacheBackend for LocatedCache<L> {
    fn locate(&self, identifier: &Identifier) -> PathBuf {
        self.root.join(self.layout.encode(identifier))
    }

    fn materialize(&self, artifact: &Artifact) -> Result<Artifact, CacheError> {
        match artifact.state() {
            ArtifactState::Absent => Err(CacheError::Missing(artifact.identifier().clone())),
            ArtifactState::Cached { .. } => Ok(artifact.clone()),
            ArtifactState::Uncached { source } => {
                let identifier = artifact.identifier().clone();
                let target = self.locate(&identifier);

                if target.is_file() {
                    debug!(identifier = %identifier, "cache hit, reusing materialized file");
                } else {
                    Self::publish(&identifier, source, &target)?;
                    debug!(identifier = %identifier, path = %target.display(), "materialized");
                }

                Ok(Artifact::cached(identifier, artifact.kind(), target)
                    .with_metadata(artifact.metadata().clone()))
            }
        }
    }
}

impl<L> std::fmt::Debug for LocatedCache<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocatedCache")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}
