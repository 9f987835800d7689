//! End-to-end flow: virtual path -> translator -> repository -> cache file

use depot_artifact::{
    Artifact, ArtifactKind, AttributeCollection, CacheBackend, ContentSource, Identifier,
    ProviderRepository, Repository,
};
use depot_cache::LocatedCache;
use depot_layout::{DeclaredDependencies, MavenLayout, PathTranslator, Translation};
use std::sync::Arc;

fn repository_with_bytes(content: &'static [u8]) -> Arc<dyn Repository> {
    Arc::new(ProviderRepository::new(move |id: &Identifier| {
        Artifact::uncached(
            id.clone(),
            ArtifactKind::Binary,
            ContentSource::bytes(content.to_vec()),
        )
    }))
}

#[test]
fn translated_path_materializes_into_the_cache() {
    let dir = tempfile::tempdir().unwrap();
    let cache = Arc::new(LocatedCache::new(dir.path(), MavenLayout));
    let declared = Arc::new(DeclaredDependencies::new());
    declared.declare("com.example", "foo", "1.0", AttributeCollection::new());

    let translator = PathTranslator::new(
        dir.path(),
        repository_with_bytes(b"X"),
        Arc::clone(&cache) as Arc<dyn CacheBackend>,
        declared,
        Arc::new(MavenLayout),
    );

    let path = format!("{}com/example/foo/1.0/foo-1.0.jar", translator.root());
    let Translation::Resolved(file) = translator.translate(&path).unwrap() else {
        panic!("expected a resolved file");
    };

    assert_eq!(
        file,
        cache.locate(&Identifier::new("com.example", "foo", "1.0"))
    );
    assert_eq!(std::fs::read(&file).unwrap(), b"X");

    // A second translation reuses the published file.
    let Translation::Resolved(again) = translator.translate(&path).unwrap() else {
        panic!("expected a resolved file");
    };
    assert_eq!(again, file);
}

#[test]
fn concurrent_materialization_publishes_one_complete_file() {
    let dir = tempfile::tempdir().unwrap();
    let cache = Arc::new(LocatedCache::new(dir.path(), MavenLayout));
    let id = Identifier::new("com.example", "foo", "1.0");

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = Arc::clone(&cache);
            let id = id.clone();
            std::thread::spawn(move || {
                let artifact = Artifact::uncached(
                    id,
                    ArtifactKind::Binary,
                    ContentSource::bytes(b"payload-bytes".to_vec()),
                );
                cache.materialize(&artifact).unwrap()
            })
        })
        .collect();

    for handle in handles {
        let cached = handle.join().unwrap();
        assert_eq!(
            std::fs::read(cached.as_file().unwrap()).unwrap(),
            b"payload-bytes"
        );
    }
}
