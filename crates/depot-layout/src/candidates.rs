//! Pending dependency candidates
//!
//! A virtual path never maps 1:1 onto an identifier: several pending
//! dependency descriptors can share (group, name, version) and differ only
//! by attributes. The translator disambiguates by querying the repository
//! once per candidate attribute context, first present wins.

use dashmap::DashMap;
use depot_artifact::AttributeCollection;

/// Source of pending dependency descriptors visible to the translator
pub trait CandidateSource: Send + Sync {
    /// Attribute contexts of pending descriptors matching the coordinates
    ///
    /// Iteration order across contexts is implementation-defined beyond
    /// "declaration order of pending candidates".
    fn matching(&self, group: &str, name: &str, version: &str) -> Vec<AttributeCollection>;
}

/// Concurrent registry of declared dependency descriptors
///
/// The integrator keeps this current with whatever its host considers
/// pending. Declarations for one coordinate accumulate in declaration order.
#[derive(Debug, Default)]
pub struct DeclaredDependencies {
    entries: DashMap<(String, String, String), Vec<AttributeCollection>>,
}

impl DeclaredDependencies {
    /// Create an empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a pending descriptor for the coordinates
    pub fn declare(
        &self,
        group: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
        attributes: AttributeCollection,
    ) {
        self.entries
            .entry((group.into(), name.into(), version.into()))
            .or_default()
            .push(attributes);
    }

    /// Drop every declaration
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of coordinates with at least one declaration
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is declared
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CandidateSource for DeclaredDependencies {
    fn matching(&self, group: &str, name: &str, version: &str) -> Vec<AttributeCollection> {
        self.entries
            .get(&(group.to_string(), name.to_string(), version.to_string()))
            .map(|candidates| candidates.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depot_artifact::AttributeKey;

    static FLAVOR: AttributeKey<String> = AttributeKey::new("flavor");

    #[test]
    fn matching_returns_declarations_in_order() {
        let declared = DeclaredDependencies::new();

        let mut debug = AttributeCollection::new();
        debug.with(&FLAVOR, "debug".to_string()).unwrap();
        let mut release = AttributeCollection::new();
        release.with(&FLAVOR, "release".to_string()).unwrap();

        declared.declare("com.example", "foo", "1.0", debug);
        declared.declare("com.example", "foo", "1.0", release);

        let candidates = declared.matching("com.example", "foo", "1.0");
        assert_eq!(candidates.len(), 2);
        assert_eq!(
            candidates[0].get(&FLAVOR).map(String::as_str),
            Some("debug")
        );
        assert_eq!(
            candidates[1].get(&FLAVOR).map(String::as_str),
            Some("release")
        );
    }

    #[test]
    fn unknown_coordinates_have_no_candidates() {
        let declared = DeclaredDependencies::new();
        declared.declare("g", "n", "1", AttributeCollection::new());

        assert!(declared.matching("g", "n", "2").is_empty());
        assert!(declared.matching("g", "other", "1").is_empty());
    }

    #[test]
    fn clear_empties_the_registry() {
        let declared = DeclaredDependencies::new();
        declared.declare("g", "n", "1", AttributeCollection::new());
        assert!(!declared.is_empty());

        declared.clear();
        assert!(declared.is_empty());
        assert!(declared.matching("g", "n", "1").is_empty());
    }
}
