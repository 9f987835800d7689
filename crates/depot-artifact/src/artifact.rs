//! Artifact values and their cached/uncached state machine
//!
//! An [`Artifact`] represents "a thing identified by a coordinate, maybe
//! materialized locally, maybe not". File and stream accessors are defined
//! off the [`ArtifactState::Cached`] state only; everywhere else they fail
//! with [`MissingArtifact`], including on the absent sentinel.

use crate::cache::{CacheBackend, CacheError};
use crate::identifier::Identifier;
use crate::metadata::Metadata;
use crate::transform::ArtifactTransformer;
use std::fmt::{self, Debug, Formatter};
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Classification of artifact content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ArtifactKind {
    /// Compiled/binary payload
    Binary,
    /// Source payload
    Source,
    /// Anything else
    #[default]
    Other,
}

/// Provider of artifact bytes that have not been materialized yet
pub trait ContentProvider: Send + Sync {
    /// Open a fresh byte stream over the content
    ///
    /// # Errors
    /// I/O failure producing the stream.
    fn open(&self) -> io::Result<Box<dyn Read + Send>>;

    /// Whether the content can currently be produced
    fn exists(&self) -> bool {
        true
    }
}

/// Where an uncached artifact's bytes come from
#[derive(Clone)]
pub enum ContentSource {
    /// In-memory payload
    Bytes(Arc<Vec<u8>>),
    /// Existing local file
    File(PathBuf),
    /// Deferred producer
    Provider(Arc<dyn ContentProvider>),
}

impl ContentSource {
    /// In-memory content source
    #[inline]
    #[must_use]
    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(Arc::new(data.into()))
    }

    /// Open a fresh byte stream over the content
    ///
    /// # Errors
    /// I/O failure opening the underlying file or producer.
    pub fn open(&self) -> io::Result<Box<dyn Read + Send>> {
        match self {
            Self::Bytes(data) => Ok(Box::new(Cursor::new(SharedBytes(Arc::clone(data))))),
            Self::File(path) => Ok(Box::new(File::open(path)?)),
            Self::Provider(provider) => provider.open(),
        }
    }

    /// Whether the content can currently be produced
    #[must_use]
    pub fn exists(&self) -> bool {
        match self {
            Self::Bytes(_) => true,
            Self::File(path) => path.is_file(),
            Self::Provider(provider) => provider.exists(),
        }
    }
}

impl Debug for ContentSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes(data) => f.debug_tuple("Bytes").field(&data.len()).finish(),
            Self::File(path) => f.debug_tuple("File").field(path).finish(),
            Self::Provider(_) => f.write_str("Provider(..)"),
        }
    }
}

/// `Cursor` adapter over shared bytes
struct SharedBytes(Arc<Vec<u8>>);

impl AsRef<[u8]> for SharedBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Materialization state of an artifact
#[derive(Debug, Clone)]
pub enum ArtifactState {
    /// The distinguished "nothing" artifact
    Absent,
    /// Identified, content producible, not materialized locally
    Uncached {
        /// Byte source used during materialization
        source: ContentSource,
    },
    /// Materialized to a local file
    Cached {
        /// Local file location
        path: PathBuf,
    },
}

/// Accessor invoked on an artifact with no local content
///
/// Carries the offending identifier, or the absent identifier when raised by
/// the global absent sentinel.
#[derive(Debug, Clone, thiserror::Error)]
#[error("missing artifact: {identifier}")]
pub struct MissingArtifact {
    /// Identifier of the artifact the accessor was invoked on
    pub identifier: Identifier,
}

/// A value named by a coordinate, in an uncached or a locally-materialized
/// state
///
/// All operations are total on the absent sentinel: `with_metadata`, `apply`
/// and `cache` are the identity, `is_present` reports `false`, and the file
/// and stream accessors fail with [`MissingArtifact`].
#[derive(Debug, Clone)]
pub struct Artifact {
    identifier: Identifier,
    metadata: Metadata,
    kind: ArtifactKind,
    state: ArtifactState,
}

impl Artifact {
    /// An identified artifact whose content has not been materialized
    #[must_use]
    pub fn uncached(identifier: Identifier, kind: ArtifactKind, source: ContentSource) -> Self {
        Self {
            identifier,
            metadata: Metadata::empty(),
            kind,
            state: ArtifactState::Uncached { source },
        }
    }

    /// An artifact already materialized at `path`
    #[must_use]
    pub fn cached(identifier: Identifier, kind: ArtifactKind, path: impl Into<PathBuf>) -> Self {
        Self {
            identifier,
            metadata: Metadata::empty(),
            kind,
            state: ArtifactState::Cached { path: path.into() },
        }
    }

    /// The absent sentinel
    ///
    /// Cached-shaped, never present, and total: every file/stream accessor
    /// fails with [`MissingArtifact`] carrying the absent identifier.
    #[must_use]
    pub fn absent() -> Self {
        Self {
            identifier: Identifier::absent(),
            metadata: Metadata::absent(),
            kind: ArtifactKind::Other,
            state: ArtifactState::Absent,
        }
    }

    /// Whether this is the absent sentinel
    #[inline]
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self.state, ArtifactState::Absent)
    }

    /// Coordinate identifier
    #[inline]
    #[must_use]
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// Content metadata
    #[inline]
    #[must_use]
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Content classification
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }

    /// Materialization state
    #[inline]
    #[must_use]
    pub fn state(&self) -> &ArtifactState {
        &self.state
    }

    /// Same state, replaced metadata; identity on the absent sentinel
    #[must_use]
    pub fn with_metadata(self, metadata: Metadata) -> Self {
        if self.is_absent() {
            return self;
        }
        Self { metadata, ..self }
    }

    /// Run a transformer over this artifact; identity on the absent sentinel
    ///
    /// A single function slot: multi-step pipelines are composed by the
    /// caller before calling `apply`.
    #[must_use]
    pub fn apply(self, transformer: &dyn ArtifactTransformer) -> Self {
        if self.is_absent() {
            return self;
        }
        transformer.transform(self)
    }

    /// Materialize this artifact through a cache backend
    ///
    /// No-op (a clone) for an already-cached artifact and for the absent
    /// sentinel.
    ///
    /// # Errors
    /// [`CacheError`] from the backend; I/O failure is never reported as
    /// absence.
    pub fn cache(&self, backend: &dyn CacheBackend) -> Result<Self, CacheError> {
        match self.state {
            ArtifactState::Uncached { .. } => backend.materialize(self),
            ArtifactState::Cached { .. } | ArtifactState::Absent => Ok(self.clone()),
        }
    }

    /// Whether content is currently obtainable
    #[must_use]
    pub fn is_present(&self) -> bool {
        match &self.state {
            ArtifactState::Absent => false,
            ArtifactState::Uncached { source } => source.exists(),
            ArtifactState::Cached { path } => path.is_file(),
        }
    }

    /// Local file location, without checking that the file exists
    ///
    /// # Errors
    /// [`MissingArtifact`] unless this artifact is cached.
    pub fn file_location(&self) -> Result<&Path, MissingArtifact> {
        match &self.state {
            ArtifactState::Cached { path } => Ok(path),
            _ => Err(self.missing()),
        }
    }

    /// Local file, verified to exist
    ///
    /// # Errors
    /// [`MissingArtifact`] unless this artifact is cached and the file is on
    /// disk.
    pub fn as_file(&self) -> Result<&Path, MissingArtifact> {
        match &self.state {
            ArtifactState::Cached { path } if path.is_file() => Ok(path),
            _ => Err(self.missing()),
        }
    }

    /// Open a byte stream over the materialized content
    ///
    /// # Errors
    /// [`MissingArtifact`] unless this artifact is cached and readable.
    pub fn open_stream(&self) -> Result<Box<dyn Read + Send>, MissingArtifact> {
        let path = self.as_file()?;
        match File::open(path) {
            Ok(file) => Ok(Box::new(file)),
            Err(_) => Err(self.missing()),
        }
    }

    fn missing(&self) -> MissingArtifact {
        MissingArtifact {
            identifier: self.identifier.clone(),
        }
    }
}
