//! Content metadata
//!
//! Provides [`Metadata`]: a content hash plus an extensible key/value map.
//! Unlike the attribute side-table, metadata is copy-on-write: `with`
//! returns a new instance and never mutates in place.

use crate::attribute::UnsupportedMutation;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Hash reported by the absent sentinel
const ABSENT_HASH: &str = "ERROR";

/// Content metadata attached to an artifact
///
/// The `Absent` variant is the metadata of the absent artifact: it reports
/// the fixed hash `"ERROR"` and refuses every mutation, so callers can chain
/// metadata operations without a null check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metadata {
    /// Hash plus open key/value entries
    Entries {
        /// Content hash, hex-encoded
        hash: String,
        /// Extensible side-entries
        entries: BTreeMap<String, String>,
    },
    /// The absent sentinel
    Absent,
}

impl Metadata {
    /// Empty metadata with no hash yet
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::Entries {
            hash: String::new(),
            entries: BTreeMap::new(),
        }
    }

    /// Metadata carrying a precomputed hash
    #[inline]
    #[must_use]
    pub fn of_hash(hash: impl Into<String>) -> Self {
        Self::Entries {
            hash: hash.into(),
            entries: BTreeMap::new(),
        }
    }

    /// Metadata hashing the given content (blake3, hex-encoded)
    #[must_use]
    pub fn of_bytes(data: &[u8]) -> Self {
        Self::of_hash(hex::encode(blake3::hash(data).as_bytes()))
    }

    /// The absent sentinel
    #[inline]
    #[must_use]
    pub fn absent() -> Self {
        Self::Absent
    }

    /// Whether this is the absent sentinel
    #[inline]
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Content hash; `"ERROR"` on the absent sentinel
    #[inline]
    #[must_use]
    pub fn hash(&self) -> &str {
        match self {
            Self::Entries { hash, .. } => hash,
            Self::Absent => ABSENT_HASH,
        }
    }

    /// Read a side-entry
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        match self {
            Self::Entries { entries, .. } => entries.get(key).map(String::as_str),
            Self::Absent => None,
        }
    }

    /// Return a new metadata instance with `key` set to `value`
    ///
    /// # Errors
    /// [`UnsupportedMutation`] on the absent sentinel.
    pub fn with(
        &self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, UnsupportedMutation> {
        match self {
            Self::Absent => Err(UnsupportedMutation { target: "metadata" }),
            Self::Entries { hash, entries } => {
                let mut entries = entries.clone();
                entries.insert(key.into(), value.into());
                Ok(Self::Entries {
                    hash: hash.clone(),
                    entries,
                })
            }
        }
    }

    /// Iterate over the side-entries
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        let map = match self {
            Self::Entries { entries, .. } => Some(entries),
            Self::Absent => None,
        };
        map.into_iter()
            .flat_map(|entries| entries.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_is_copy_on_write() {
        let base = Metadata::of_hash("abc");
        let derived = base.with("origin", "remote").unwrap();

        assert_eq!(base.get("origin"), None);
        assert_eq!(derived.get("origin"), Some("remote"));
        assert_eq!(derived.hash(), "abc");
    }

    #[test]
    fn with_overrides_existing_entry() {
        let meta = Metadata::empty()
            .with("k", "v1")
            .unwrap()
            .with("k", "v2")
            .unwrap();
        assert_eq!(meta.get("k"), Some("v2"));
    }

    #[test]
    fn absent_reports_error_hash() {
        let meta = Metadata::absent();
        assert!(meta.is_absent());
        assert_eq!(meta.hash(), "ERROR");
        assert_eq!(meta.get("anything"), None);
        assert_eq!(meta.entries().count(), 0);
    }

    #[test]
    fn absent_refuses_mutation() {
        let err = Metadata::absent().with("k", "v").unwrap_err();
        assert!(err.to_string().contains("metadata"));
    }

    #[test]
    fn of_bytes_is_deterministic() {
        let a = Metadata::of_bytes(b"payload");
        let b = Metadata::of_bytes(b"payload");
        let c = Metadata::of_bytes(b"other");

        assert_eq!(a.hash(), b.hash());
        assert_ne!(a.hash(), c.hash());
        assert_eq!(a.hash().len(), 64);
    }

    #[test]
    fn serde_round_trip() {
        let meta = Metadata::of_hash("abc").with("k", "v").unwrap();
        let json = serde_json::to_string(&meta).unwrap();
        let back: Metadata = serde_json::from_str(&json).unwrap();
        assert_eq!(meta, back);
    }
}
