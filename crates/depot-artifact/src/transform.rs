//! Artifact transformers
//!
//! A transformer is a pure `Artifact -> Artifact` mapping applied before
//! caching, typically to inject or rewrite metadata.

use crate::artifact::Artifact;

/// Pure artifact-to-artifact mapping
///
/// `transform` must be side-effect-free on its input: it returns a new or
/// same-state artifact and never mutates shared state. Composition order of
/// multi-step pipelines is the caller's concern; [`Artifact::apply`] takes a
/// single slot.
pub trait ArtifactTransformer: Send + Sync {
    /// Map one artifact to another
    fn transform(&self, artifact: Artifact) -> Artifact;
}

impl<F> ArtifactTransformer for F
where
    F: Fn(Artifact) -> Artifact + Send + Sync,
{
    fn transform(&self, artifact: Artifact) -> Artifact {
        self(artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::{ArtifactKind, ContentSource};
    use crate::identifier::Identifier;
    use crate::metadata::Metadata;

    fn artifact() -> Artifact {
        Artifact::uncached(
            Identifier::new("g", "n", "1"),
            ArtifactKind::Other,
            ContentSource::bytes(b"data".to_vec()),
        )
        .with_metadata(Metadata::of_hash("h"))
    }

    #[test]
    fn closures_are_transformers() {
        let mark = |a: Artifact| {
            let meta = a.metadata().with("seen", "yes").unwrap();
            a.with_metadata(meta)
        };
        let out = artifact().apply(&mark);
        assert_eq!(out.metadata().get("seen"), Some("yes"));
    }

    #[test]
    fn caller_composes_pipelines() {
        let first = |a: Artifact| {
            let meta = a.metadata().with("step", "1").unwrap();
            a.with_metadata(meta)
        };
        let second = |a: Artifact| {
            let meta = a.metadata().with("step", "2").unwrap();
            a.with_metadata(meta)
        };
        let composed = move |a: Artifact| second(first(a));

        let out = artifact().apply(&composed);
        assert_eq!(out.metadata().get("step"), Some("2"));
    }
}
