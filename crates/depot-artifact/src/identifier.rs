//! Artifact coordinates
//!
//! Provides [`Identifier`], the (group, name, version, classifier, extension)
//! tuple naming an artifact, and the absent sentinel returned wherever "no
//! identifier" must still behave as a valid identifier.

use crate::attribute::AttributeCollection;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};

/// Coordinates of the absent sentinel
const ABSENT_GROUP: &str = "missing";
const ABSENT_NAME: &str = "missing";
const ABSENT_VERSION: &str = "0.0.0";
const ABSENT_EXTENSION: &str = "missing";

/// Default packaging extension when a caller names none
const DEFAULT_EXTENSION: &str = "jar";

/// Coordinate key naming an artifact
///
/// Equality, hashing, and the canonical `group:name:version[:classifier@extension]`
/// form cover the five coordinate strings only. The typed attribute
/// side-table travels with the identifier but does not participate in
/// identity, so two lookups for the same coordinates with different attribute
/// contexts compare equal.
///
/// An empty classifier means "no classifier"; the canonical form then omits
/// the `classifier@extension` suffix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identifier {
    group: String,
    name: String,
    version: String,
    #[serde(default)]
    classifier: String,
    extension: String,
    #[serde(skip, default)]
    attributes: AttributeCollection,
}

impl Identifier {
    /// Create an identifier with no classifier and the default extension
    #[must_use]
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            version: version.into(),
            classifier: String::new(),
            extension: DEFAULT_EXTENSION.to_string(),
            attributes: AttributeCollection::new(),
        }
    }

    /// Replace the classifier
    #[inline]
    #[must_use]
    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = classifier.into();
        self
    }

    /// Replace the extension
    #[inline]
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Replace the attribute side-table
    #[inline]
    #[must_use]
    pub fn with_attributes(mut self, attributes: AttributeCollection) -> Self {
        self.attributes = attributes;
        self
    }

    /// The absent sentinel
    ///
    /// Fixed coordinates (`missing:missing:0.0.0`, extension `missing`) and
    /// the no-op attribute collection. Behaves as a valid identifier in every
    /// operation.
    #[must_use]
    pub fn absent() -> Self {
        Self {
            group: ABSENT_GROUP.to_string(),
            name: ABSENT_NAME.to_string(),
            version: ABSENT_VERSION.to_string(),
            classifier: String::new(),
            extension: ABSENT_EXTENSION.to_string(),
            attributes: AttributeCollection::none(),
        }
    }

    /// Whether this is the absent sentinel
    #[inline]
    #[must_use]
    pub fn is_absent(&self) -> bool {
        self.group == ABSENT_GROUP
            && self.name == ABSENT_NAME
            && self.version == ABSENT_VERSION
            && self.classifier.is_empty()
            && self.extension == ABSENT_EXTENSION
    }

    /// Group coordinate (dot-separated)
    #[inline]
    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Module name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Version string
    #[inline]
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Classifier; empty when none is set
    #[inline]
    #[must_use]
    pub fn classifier(&self) -> &str {
        &self.classifier
    }

    /// Whether a non-empty classifier is set
    #[inline]
    #[must_use]
    pub fn has_classifier(&self) -> bool {
        !self.classifier.is_empty()
    }

    /// Packaging extension
    #[inline]
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Typed attribute side-table
    #[inline]
    #[must_use]
    pub fn attributes(&self) -> &AttributeCollection {
        &self.attributes
    }

    /// Mutable access to the attribute side-table
    ///
    /// The coordinates themselves stay immutable; attributes are the one
    /// explicitly-mutable part of an identifier.
    #[inline]
    pub fn attributes_mut(&mut self) -> &mut AttributeCollection {
        &mut self.attributes
    }

    /// Canonical key: `group:name:version[:classifier@extension]`
    #[must_use]
    pub fn canonical(&self) -> String {
        if self.classifier.is_empty() {
            format!("{}:{}:{}", self.group, self.name, self.version)
        } else {
            format!(
                "{}:{}:{}:{}@{}",
                self.group, self.name, self.version, self.classifier, self.extension
            )
        }
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        self.group == other.group
            && self.name == other.name
            && self.version == other.version
            && self.classifier == other.classifier
            && self.extension == other.extension
    }
}

impl Eq for Identifier {}

impl Hash for Identifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.group.hash(state);
        self.name.hash(state);
        self.version.hash(state);
        self.classifier.hash(state);
        self.extension.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::AttributeKey;

    #[test]
    fn canonical_without_classifier() {
        let id = Identifier::new("com.example", "foo", "1.0");
        assert_eq!(id.canonical(), "com.example:foo:1.0");
        assert_eq!(id.to_string(), "com.example:foo:1.0");
    }

    #[test]
    fn canonical_with_classifier() {
        let id = Identifier::new("com.example", "foo", "1.0")
            .with_classifier("sources")
            .with_extension("zip");
        assert_eq!(id.canonical(), "com.example:foo:1.0:sources@zip");
    }

    #[test]
    fn default_extension_is_jar() {
        let id = Identifier::new("g", "n", "1");
        assert_eq!(id.extension(), "jar");
        assert!(!id.has_classifier());
    }

    #[test]
    fn absent_sentinel_coordinates() {
        let id = Identifier::absent();
        assert!(id.is_absent());
        assert_eq!(id.group(), "missing");
        assert_eq!(id.name(), "missing");
        assert_eq!(id.version(), "0.0.0");
        assert_eq!(id.classifier(), "");
        assert_eq!(id.extension(), "missing");
        assert!(id.attributes().is_noop());
    }

    #[test]
    fn absent_is_a_valid_identifier() {
        let id = Identifier::absent();
        assert_eq!(id.canonical(), "missing:missing:0.0.0");
        assert_eq!(id, Identifier::absent());
    }

    #[test]
    fn equality_ignores_attributes() {
        static FLAVOR: AttributeKey<String> = AttributeKey::new("flavor");

        let plain = Identifier::new("g", "n", "1");
        let mut flavored = Identifier::new("g", "n", "1");
        flavored
            .attributes_mut()
            .with(&FLAVOR, "debug".to_string())
            .unwrap();

        assert_eq!(plain, flavored);
    }

    #[test]
    fn equality_covers_classifier_and_extension() {
        let a = Identifier::new("g", "n", "1");
        let b = Identifier::new("g", "n", "1").with_classifier("sources");
        let c = Identifier::new("g", "n", "1").with_extension("zip");
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn serde_round_trip_over_coordinates() {
        let id = Identifier::new("com.example", "foo", "1.0").with_classifier("linux");
        let json = serde_json::to_string(&id).unwrap();
        let back: Identifier = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
        assert_eq!(back.classifier(), "linux");
    }
}
