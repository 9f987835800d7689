//! Coordinate layout codec
//!
//! Encodes identifiers as hierarchical repository paths and decodes such
//! paths back into coordinates. The codec is a seam: the translator, the
//! cache, and the resolver are all layout-agnostic, so alternate conventions
//! plug in without touching them.

use depot_artifact::Identifier;

/// Decoded meaning of a relative repository path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathQuery {
    /// A coordinate-addressed artifact file
    Artifact(Coordinates),
    /// The coordinate-listing document for a (group, name) pair
    Listing {
        /// Dot-separated group
        group: String,
        /// Module name
        name: String,
    },
}

/// Plain coordinates decoded from a path, without an attribute context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinates {
    /// Dot-separated group
    pub group: String,
    /// Module name
    pub name: String,
    /// Version string
    pub version: String,
    /// Optional classifier (never empty when present)
    pub classifier: Option<String>,
    /// Packaging extension
    pub extension: String,
}

impl Coordinates {
    /// Build an identifier carrying these coordinates
    #[must_use]
    pub fn to_identifier(&self) -> Identifier {
        Identifier::new(&self.group, &self.name, &self.version)
            .with_classifier(self.classifier.as_deref().unwrap_or(""))
            .with_extension(&self.extension)
    }
}

/// Path ⇄ identifier codec for one layout convention
pub trait LayoutCodec: Send + Sync {
    /// Decode a relative path into its coordinate meaning
    ///
    /// `None` means the path carries no meaning under this layout; the
    /// caller treats the request as outside its purview.
    fn decode(&self, relative: &str) -> Option<PathQuery>;

    /// Encode an identifier as a relative path under this layout
    fn encode(&self, identifier: &Identifier) -> String;

    /// Fixed filename of the coordinate-listing document
    fn listing_filename(&self) -> &str;
}

/// The standard hierarchical layout:
/// `{group-as-slash-path}/{name}/{version}/{name}-{version}[-{classifier}].{extension}`
/// with `maven-metadata.xml` as the listing document.
///
/// Decoding requires the filename to repeat the `name-version` directory
/// segments. The classifier may not contain `.` or whitespace; the extension
/// may contain dots (`tar.gz`).
#[derive(Debug, Clone, Copy, Default)]
pub struct MavenLayout;

impl MavenLayout {
    const LISTING: &'static str = "maven-metadata.xml";
}

impl LayoutCodec for MavenLayout {
    fn decode(&self, relative: &str) -> Option<PathQuery> {
        let relative = relative.trim_start_matches('/');
        if relative.is_empty() || relative.ends_with('/') {
            return None;
        }

        let segments: Vec<&str> = relative.split('/').collect();
        if segments
            .iter()
            .any(|segment| segment.is_empty() || segment.contains(char::is_whitespace))
        {
            return None;
        }

        let (&filename, dirs) = segments.split_last()?;

        if filename == Self::LISTING {
            let (&name, group) = dirs.split_last()?;
            if group.is_empty() {
                return None;
            }
            return Some(PathQuery::Listing {
                group: group.join("."),
                name: name.to_string(),
            });
        }

        // group (>= 1 segment) / name / version / filename
        if dirs.len() < 3 {
            return None;
        }
        let version = dirs[dirs.len() - 1];
        let name = dirs[dirs.len() - 2];
        let group = dirs[..dirs.len() - 2].join(".");

        let prefix = format!("{name}-{version}");
        let rest = filename.strip_prefix(prefix.as_str())?;

        let (classifier, extension) = if let Some(extension) = rest.strip_prefix('.') {
            (None, extension)
        } else if let Some(tail) = rest.strip_prefix('-') {
            let (classifier, extension) = tail.split_once('.')?;
            if classifier.is_empty() {
                return None;
            }
            (Some(classifier.to_string()), extension)
        } else {
            return None;
        };

        if extension.is_empty() {
            return None;
        }

        Some(PathQuery::Artifact(Coordinates {
            group,
            name: name.to_string(),
            version: version.to_string(),
            classifier,
            extension: extension.to_string(),
        }))
    }

    fn encode(&self, identifier: &Identifier) -> String {
        let mut path = identifier.group().replace('.', "/");
        path.push('/');
        path.push_str(identifier.name());
        path.push('/');
        path.push_str(identifier.version());
        path.push('/');
        path.push_str(identifier.name());
        path.push('-');
        path.push_str(identifier.version());
        if identifier.has_classifier() {
            path.push('-');
            path.push_str(identifier.classifier());
        }
        path.push('.');
        path.push_str(identifier.extension());
        path
    }

    fn listing_filename(&self) -> &str {
        Self::LISTING
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn decode(path: &str) -> Option<PathQuery> {
        MavenLayout.decode(path)
    }

    #[test]
    fn decode_plain_artifact() {
        let query = decode("com/example/foo/1.0/foo-1.0.jar").unwrap();
        assert_eq!(
            query,
            PathQuery::Artifact(Coordinates {
                group: "com.example".to_string(),
                name: "foo".to_string(),
                version: "1.0".to_string(),
                classifier: None,
                extension: "jar".to_string(),
            })
        );
    }

    #[test]
    fn decode_with_classifier() {
        let query = decode("com/example/foo/1.0/foo-1.0-sources.zip").unwrap();
        let PathQuery::Artifact(coords) = query else {
            panic!("expected artifact query");
        };
        assert_eq!(coords.classifier.as_deref(), Some("sources"));
        assert_eq!(coords.extension, "zip");
    }

    #[test]
    fn decode_dotted_extension() {
        let query = decode("org/acme/pkg/2.1/pkg-2.1.tar.gz").unwrap();
        let PathQuery::Artifact(coords) = query else {
            panic!("expected artifact query");
        };
        assert_eq!(coords.classifier, None);
        assert_eq!(coords.extension, "tar.gz");
    }

    #[test]
    fn decode_classifier_then_dotted_extension() {
        let query = decode("org/acme/pkg/2.1/pkg-2.1-linux.tar.gz").unwrap();
        let PathQuery::Artifact(coords) = query else {
            panic!("expected artifact query");
        };
        assert_eq!(coords.classifier.as_deref(), Some("linux"));
        assert_eq!(coords.extension, "tar.gz");
    }

    #[test]
    fn decode_dashed_name_and_version() {
        let query = decode("com/example/foo-bar/1.0-rc1/foo-bar-1.0-rc1.jar").unwrap();
        let PathQuery::Artifact(coords) = query else {
            panic!("expected artifact query");
        };
        assert_eq!(coords.name, "foo-bar");
        assert_eq!(coords.version, "1.0-rc1");
        assert_eq!(coords.classifier, None);
    }

    #[test]
    fn decode_listing_path() {
        let query = decode("com/example/foo/maven-metadata.xml").unwrap();
        assert_eq!(
            query,
            PathQuery::Listing {
                group: "com.example".to_string(),
                name: "foo".to_string(),
            }
        );
    }

    #[test]
    fn listing_needs_a_group() {
        assert_eq!(decode("foo/maven-metadata.xml"), None);
    }

    #[test]
    fn filename_must_repeat_name_and_version() {
        assert_eq!(decode("com/example/foo/1.0/bar-1.0.jar"), None);
        assert_eq!(decode("com/example/foo/1.0/foo-2.0.jar"), None);
    }

    #[test]
    fn rejects_structures_outside_the_layout() {
        assert_eq!(decode("foo-1.0.jar"), None);
        assert_eq!(decode("foo/1.0/foo-1.0.jar"), None);
        assert_eq!(decode("com/example/foo/1.0/"), None);
        assert_eq!(decode("com//foo/1.0/foo-1.0.jar"), None);
        assert_eq!(decode("com/exa mple/foo/1.0/foo-1.0.jar"), None);
        assert_eq!(decode(""), None);
    }

    #[test]
    fn rejects_empty_classifier_or_extension() {
        assert_eq!(decode("com/example/foo/1.0/foo-1.0-.jar"), None);
        assert_eq!(decode("com/example/foo/1.0/foo-1.0."), None);
    }

    #[test]
    fn encode_matches_the_layout() {
        let id = Identifier::new("com.example", "foo", "1.0");
        assert_eq!(MavenLayout.encode(&id), "com/example/foo/1.0/foo-1.0.jar");

        let id = id.with_classifier("sources").with_extension("zip");
        assert_eq!(
            MavenLayout.encode(&id),
            "com/example/foo/1.0/foo-1.0-sources.zip"
        );
    }

    #[test]
    fn scenario_round_trip() {
        let id = Identifier::new("com.example", "foo", "1.0");
        let encoded = MavenLayout.encode(&id);
        assert_eq!(encoded, "com/example/foo/1.0/foo-1.0.jar");

        let Some(PathQuery::Artifact(coords)) = MavenLayout.decode(&encoded) else {
            panic!("expected artifact query");
        };
        assert_eq!(coords.to_identifier(), id);
    }

    mod round_trip {
        use super::*;
        use proptest::prelude::*;

        fn segment() -> impl Strategy<Value = String> {
            "[a-z][a-z0-9]{0,7}"
        }

        fn group() -> impl Strategy<Value = String> {
            prop::collection::vec(segment(), 1..4).prop_map(|segments| segments.join("."))
        }

        fn version() -> impl Strategy<Value = String> {
            "[0-9]{1,2}(\\.[0-9]{1,2}){0,2}(-[a-z0-9]{1,5})?"
        }

        fn extension() -> impl Strategy<Value = String> {
            "[a-z]{1,4}(\\.[a-z]{1,3})?"
        }

        proptest! {
            #[test]
            fn encode_then_decode_is_identity(
                group in group(),
                name in segment(),
                version in version(),
                classifier in prop::option::of("[a-z][a-z0-9]{0,5}"),
                extension in extension(),
            ) {
                let id = Identifier::new(&group, &name, &version)
                    .with_classifier(classifier.as_deref().unwrap_or(""))
                    .with_extension(&extension);

                let encoded = MavenLayout.encode(&id);
                let decoded = MavenLayout.decode(&encoded);

                prop_assert_eq!(
                    decoded,
                    Some(PathQuery::Artifact(Coordinates {
                        group,
                        name,
                        version,
                        classifier,
                        extension,
                    }))
                );
            }
        }
    }
}
