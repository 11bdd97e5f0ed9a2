//! Generated descriptors consumed through the bootstrapped registry.

use std::path::Path;
use std::sync::Arc;

use lookup::infrastructure::config::ConfigBuilder;
use lookup::{Error, ServiceRegistry, init_registry};

use crate::fixtures::{Custom, Greeting, Service, Standalone, Unused, generate_into};

fn registry_over(out: &Path) -> Arc<ServiceRegistry> {
    let config = ConfigBuilder::new()
        .with_search_dir(out)
        .with_embedded_descriptors(false)
        .build();
    init_registry(&config)
}

#[test]
fn test_generated_descriptor_lists_both_providers() {
    let out = tempfile::tempdir().unwrap();
    let report = generate_into(out.path());

    assert!(!report.has_errors());
    let descriptor =
        std::fs::read_to_string(out.path().join("META-INF/services/e2e.Service")).unwrap();
    assert_eq!(descriptor, "e2e.Provider1\ne2e.Provider2\n");
}

#[test]
fn test_lookup_all_returns_every_generated_provider() {
    let out = tempfile::tempdir().unwrap();
    generate_into(out.path());
    let registry = registry_over(out.path());

    let all: Vec<_> = registry
        .lookup_all::<dyn Service>()
        .iter()
        .map(|service| service.id())
        .collect();
    assert_eq!(all, vec!["provider1", "provider2"]);

    let one = registry.lookup::<dyn Service>().unwrap();
    assert!(["provider1", "provider2"].contains(&one.id()));
}

#[test]
fn test_self_capability_resolves() {
    let out = tempfile::tempdir().unwrap();
    generate_into(out.path());
    let registry = registry_over(out.path());

    assert!(registry.lookup::<Standalone>().is_some());
}

#[test]
fn test_zero_implementations_is_absent() {
    let out = tempfile::tempdir().unwrap();
    generate_into(out.path());
    let registry = registry_over(out.path());

    assert!(registry.lookup::<dyn Unused>().is_none());
    assert!(registry.lookup_all::<dyn Unused>().is_empty());
}

#[test]
fn test_instance_override_shadows_descriptors() {
    let out = tempfile::tempdir().unwrap();
    generate_into(out.path());
    let registry = registry_over(out.path());
    let custom: Arc<dyn Service> = Arc::new(Custom);

    registry.register::<dyn Service>(Arc::clone(&custom));

    let found = registry.lookup::<dyn Service>().unwrap();
    assert!(Arc::ptr_eq(&found, &custom));
    assert_eq!(registry.lookup_all::<dyn Service>().len(), 2);
}

#[test]
fn test_nominated_fallback() {
    let registry = registry_over(tempfile::tempdir().unwrap().path());

    assert!(registry.lookup_or::<dyn Unused>("e2e::DefaultUnused").is_ok());

    let err = registry
        .lookup_or::<dyn Unused>("e2e::Missing")
        .err()
        .unwrap();
    assert!(matches!(err, Error::FallbackConstruction { .. }));
}

#[test]
fn test_embedded_descriptor_prefers_non_default() {
    let config = ConfigBuilder::new().build();
    let registry = init_registry(&config);

    assert_eq!(registry.lookup::<dyn Greeting>().unwrap().text(), "howdy");
    let all: Vec<_> = registry
        .lookup_all::<dyn Greeting>()
        .iter()
        .map(|greeting| greeting.text())
        .collect();
    assert_eq!(all, vec!["greetings", "howdy"]);
}
