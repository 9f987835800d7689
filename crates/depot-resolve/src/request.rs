//! Dependency descriptors and requests

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;

/// Extension assumed when a qualifier names none
const DEFAULT_EXTENSION: &str = "jar";

/// Coordinate-addressed dependency descriptor
///
/// The canonical key is `group:name:version`, extended with
/// `:classifier@extension` when either artifact qualifier is carried. The
/// transitive flag does not participate in the key: a transitive and a
/// non-transitive request for the same coordinates share one resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencySpec {
    /// Dot-separated group
    pub group: String,
    /// Module name
    pub name: String,
    /// Version string
    pub version: String,
    /// Optional artifact classifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
    /// Optional packaging extension
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    /// Whether transitive dependencies are resolved as well
    #[serde(default = "default_transitive")]
    pub transitive: bool,
}

fn default_transitive() -> bool {
    true
}

impl DependencySpec {
    /// Create a transitive descriptor with no artifact qualifiers
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
            classifier: None,
            extension: None,
            transitive: true,
        }
    }

    /// Set the classifier qualifier
    #[inline]
    #[must_use]
    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }

    /// Set the extension qualifier
    #[inline]
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    /// Drop transitive resolution
    #[inline]
    #[must_use]
    pub fn non_transitive(mut self) -> Self {
        self.transitive = false;
        self
    }

    /// Canonical key: `group:name:version[:classifier@extension]`
    #[must_use]
    pub fn canonical_key(&self) -> String {
        let mut key = format!("{}:{}:{}", self.group, self.name, self.version);
        if self.classifier.is_some() || self.extension.is_some() {
            key.push(':');
            key.push_str(self.classifier.as_deref().unwrap_or(""));
            key.push('@');
            key.push_str(self.extension.as_deref().unwrap_or(DEFAULT_EXTENSION));
        }
        key
    }
}

impl Display for DependencySpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical_key())
    }
}

/// Input to the resolver
#[derive(Debug, Clone)]
pub enum DependencyRequest {
    /// Coordinate-addressed module dependency, subject to deduplication
    Module(DependencySpec),
    /// Raw file collection with no coordinate identity; returned directly,
    /// no slot is created
    Files(Vec<PathBuf>),
}

impl From<DependencySpec> for DependencyRequest {
    fn from(spec: DependencySpec) -> Self {
        Self::Module(spec)
    }
}

impl From<Vec<PathBuf>> for DependencyRequest {
    fn from(files: Vec<PathBuf>) -> Self {
        Self::Files(files)
    }
}
