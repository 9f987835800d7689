//! Single-flight dependency resolver
//!
//! The slot table is the only concurrently-mutated shared structure in the
//! core. The table offers atomic check-and-insert (no two callers ever
//! believe they are the sole executor for one key) and TTL eviction; a
//! `watch` channel per slot broadcasts the one outcome, value or failure,
//! to every current and future waiter.

use crate::backend::{BackendError, ResolutionBackend};
use crate::request::{DependencyRequest, DependencySpec};
use moka::future::Cache;
use std::collections::BTreeSet;
use std::fmt::{self, Debug, Formatter};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Default slot time-to-live
pub const DEFAULT_TTL: Duration = Duration::from_secs(30 * 60);

/// One resolution outcome, shared across all requesters of a key
type Outcome = Result<BTreeSet<PathBuf>, Arc<BackendError>>;

/// Pending or completed resolution for one canonical key
///
/// The executor holds the sender; the slot stores a receiver that waiters
/// clone. A sender dropped before publishing closes the channel, which
/// waiters observe as an abandoned resolution.
#[derive(Clone)]
struct Slot {
    rx: watch::Receiver<Option<Outcome>>,
}

/// Resolution failures surfaced to requesters
#[derive(Debug, Clone, thiserror::Error)]
pub enum ResolveError {
    /// The sole executor's resolution failed; every waiter of the key
    /// observes this same failure
    #[error("resolution of `{key}` failed: {source}")]
    Failed {
        /// Canonical key of the failed resolution
        key: String,
        /// The executor's failure
        #[source]
        source: Arc<BackendError>,
    },

    /// The executor disappeared before publishing an outcome
    #[error("resolution of `{key}` was abandoned before completing")]
    Abandoned {
        /// Canonical key of the abandoned resolution
        key: String,
    },

    /// A single-file request resolved to an empty set
    #[error("resolution of `{key}` produced no files")]
    Empty {
        /// Canonical key of the empty resolution
        key: String,
    },
}

/// Deduplicating, TTL-expiring dependency resolver
///
/// Concurrent requests for the same canonical key block on one shared slot
/// while a single executor performs the delegated resolution. Slots expire a
/// fixed duration after insertion, whether or not resolution completed: the
/// TTL bounds staleness, it does not guarantee freshness, and it is not a
/// cancellation mechanism: an in-flight resolution cannot be aborted here.
pub struct DependencyResolver<B> {
    backend: B,
    slots: Cache<String, Slot>,
    counter: AtomicU64,
}

impl<B: ResolutionBackend> DependencyResolver<B> {
    /// Create a resolver with the default TTL
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self::with_ttl(backend, DEFAULT_TTL)
    }

    /// Create a resolver whose slots expire `ttl` after insertion
    #[must_use]
    pub fn with_ttl(backend: B, ttl: Duration) -> Self {
        Self {
            backend,
            slots: Cache::builder().time_to_live(ttl).build(),
            counter: AtomicU64::new(0),
        }
    }

    /// The delegated resolution backend
    #[inline]
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Resolve a request to its file set
    ///
    /// A [`DependencyRequest::Files`] input has no coordinate identity and
    /// bypasses deduplication entirely: its files are returned directly and
    /// no slot is created.
    ///
    /// # Errors
    /// [`ResolveError`] from the module path; the files path cannot fail.
    pub async fn resolve(
        &self,
        request: DependencyRequest,
    ) -> Result<BTreeSet<PathBuf>, ResolveError> {
        match request {
            DependencyRequest::Files(files) => Ok(files.into_iter().collect()),
            DependencyRequest::Module(spec) => self.resolve_module(&spec).await,
        }
    }

    /// Resolve a coordinate descriptor through the single-flight table
    ///
    /// # Errors
    /// The executor's failure is broadcast to every requester of the key;
    /// the failed slot is evicted immediately so a subsequent request
    /// retries instead of observing a tombstone.
    pub async fn resolve_module(
        &self,
        spec: &DependencySpec,
    ) -> Result<BTreeSet<PathBuf>, ResolveError> {
        let key = spec.canonical_key();

        // Atomic check-and-insert: exactly one caller runs the init future
        // for a vacant key and walks away holding the sender.
        let mut claim: Option<watch::Sender<Option<Outcome>>> = None;
        let entry = self
            .slots
            .entry(key.clone())
            .or_insert_with(async {
                let (tx, rx) = watch::channel(None);
                claim = Some(tx);
                Slot { rx }
            })
            .await;

        match claim {
            Some(tx) => self.execute(&key, spec, tx).await,
            None => self.await_outcome(&key, entry.into_value().rx).await,
        }
    }

    /// Resolve a single dependency without its transitives
    ///
    /// # Errors
    /// [`ResolveError::Empty`] when the resolution produced no files, plus
    /// everything [`Self::resolve_module`] can raise.
    pub async fn resolve_single(&self, spec: &DependencySpec) -> Result<PathBuf, ResolveError> {
        let spec = spec.clone().non_transitive();
        let key = spec.canonical_key();
        let files = self.resolve_module(&spec).await?;
        files
            .into_iter()
            .next()
            .ok_or(ResolveError::Empty { key })
    }

    /// Sole-executor path: run the delegated resolution and publish
    async fn execute(
        &self,
        key: &str,
        spec: &DependencySpec,
        tx: watch::Sender<Option<Outcome>>,
    ) -> Result<BTreeSet<PathBuf>, ResolveError> {
        let ticket = self.counter.fetch_add(1, Ordering::Relaxed);
        debug!(key, ticket, "claimed resolution");

        match self.backend.resolve(ticket, spec).await {
            Ok(files) => {
                let _ = tx.send(Some(Ok(files.clone())));
                debug!(key, files = files.len(), "resolution published");
                Ok(files)
            }
            Err(error) => {
                let error = Arc::new(error);
                // Evict before publishing: a waiter that sees the failure
                // and retries immediately gets a fresh slot.
                self.slots.invalidate(key).await;
                let _ = tx.send(Some(Err(Arc::clone(&error))));
                warn!(key, %error, "resolution failed");
                Err(ResolveError::Failed {
                    key: key.to_string(),
                    source: error,
                })
            }
        }
    }

    /// Waiter path: block on the in-flight slot and share its outcome
    async fn await_outcome(
        &self,
        key: &str,
        mut rx: watch::Receiver<Option<Outcome>>,
    ) -> Result<BTreeSet<PathBuf>, ResolveError> {
        debug!(key, "joining in-flight resolution");

        // The `Ref` guard returned by `wait_for` is not `Send`, so it must be
        // dropped before any subsequent `.await` rather than held across the
        // match below.
        let published = match rx.wait_for(Option::is_some).await {
            Ok(outcome) => Some((*outcome).clone()),
            Err(_) => None,
        };

        let published = match published {
            Some(outcome) => outcome,
            None => {
                // The executor dropped its sender without publishing. Evict
                // the dead slot so the next request retries.
                self.slots.invalidate(key).await;
                return Err(ResolveError::Abandoned {
                    key: key.to_string(),
                });
            }
        };

        match published {
            Some(Ok(files)) => Ok(files),
            Some(Err(source)) => Err(ResolveError::Failed {
                key: key.to_string(),
                source,
            }),
            // wait_for only returns once a value is published; a closed
            // channel is handled above.
            None => Err(ResolveError::Abandoned {
                key: key.to_string(),
            }),
        }
    }
}

impl<B> Debug for DependencyResolver<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependencyResolver")
            .field("pending", &self.slots.entry_count())
            .finish_non_exhaustive()
    }
}
