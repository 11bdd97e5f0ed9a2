//! Tests for registry bootstrap.

use std::sync::{Arc, Barrier};
use std::thread;

use lookup_application::ServiceRegistry;
use lookup_infrastructure::config::ConfigBuilder;
use lookup_infrastructure::{global_registry, init_global_registry, init_registry};

use crate::fixtures::{Greeter, write_descriptor};

#[test]
fn test_manifest_is_the_only_backend_without_descriptors() {
    let config = ConfigBuilder::new().with_embedded_descriptors(false).build();
    let registry = init_registry(&config);

    assert_eq!(registry.backends(), vec!["manifest"]);
    assert!(registry.lookup::<dyn Greeter>().is_none());
}

#[test]
fn test_backends_discovered_through_manifest_are_appended() {
    let root = tempfile::tempdir().unwrap();
    write_descriptor(
        root.path(),
        "lookup.LookupProvider",
        "infra.FrenchLookup\n",
    );

    let config = ConfigBuilder::new()
        .with_search_dir(root.path())
        .with_embedded_descriptors(false)
        .build();
    let registry = init_registry(&config);

    assert_eq!(registry.backends(), vec!["manifest", "french"]);
    assert_eq!(registry.lookup::<dyn Greeter>().unwrap().greet(), "bonjour");
}

#[test]
fn test_manifest_answers_before_discovered_backends() {
    let root = tempfile::tempdir().unwrap();
    write_descriptor(
        root.path(),
        "lookup.LookupProvider",
        "infra.FrenchLookup\n",
    );
    write_descriptor(root.path(), "infra.Greeter", "infra.EnglishGreeter\n");

    let config = ConfigBuilder::new()
        .with_search_dir(root.path())
        .with_embedded_descriptors(false)
        .build();
    let registry = init_registry(&config);

    assert_eq!(registry.lookup::<dyn Greeter>().unwrap().greet(), "hello");
    let all: Vec<String> = registry
        .lookup_all::<dyn Greeter>()
        .iter()
        .map(|g| g.greet())
        .collect();
    assert_eq!(all, vec!["hello", "bonjour"]);
}

#[test]
fn test_registry_override_is_used() {
    let config = ConfigBuilder::new()
        .with_registry_override("pinned")
        .with_embedded_descriptors(false)
        .build();
    let registry = init_registry(&config);

    assert_eq!(registry.backends(), vec!["manifest"]);
    assert_eq!(registry.lookup::<dyn Greeter>().unwrap().greet(), "pinned");
}

#[test]
fn test_invalid_registry_override_falls_back_to_default() {
    for name in ["no-such-registry", "failing"] {
        let config = ConfigBuilder::new()
            .with_registry_override(name)
            .with_embedded_descriptors(false)
            .build();
        let registry = init_registry(&config);

        assert_eq!(registry.backends(), vec!["manifest"]);
        assert!(registry.registered::<dyn Greeter>().is_none());
    }
}

#[test]
fn test_global_registry_is_created_once_under_contention() {
    const THREADS: usize = 8;
    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                global_registry()
            })
        })
        .collect();
    let registries: Vec<Arc<ServiceRegistry>> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    for registry in &registries[1..] {
        assert!(Arc::ptr_eq(&registries[0], registry));
    }
    assert!(Arc::ptr_eq(&registries[0], &global_registry()));
    assert!(init_global_registry(&ConfigBuilder::new().build()).is_err());
}
