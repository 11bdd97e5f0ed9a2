//! Tests for the manifest backend and its resource sources.

use std::sync::Arc;

use lookup_domain::error::{Error, Result};
use lookup_domain::ports::{LookupProvider, Resource, ResourceSource};
use lookup_domain::value_objects::CapabilityId;
use lookup_infrastructure::manifest::{EmbeddedResources, FileSystemResources, ManifestLookup};

use crate::fixtures::{Greeter, write_descriptor};

fn greeter() -> CapabilityId {
    CapabilityId::of::<dyn Greeter>()
}

fn filesystem(roots: &[&std::path::Path]) -> ManifestLookup {
    ManifestLookup::new(vec![Arc::new(FileSystemResources::new(roots.iter().copied()))])
}

fn implementations(manifest: &ManifestLookup) -> Vec<String> {
    manifest
        .lookup_all(&greeter())
        .into_iter()
        .map(|c| c.implementation.to_string())
        .collect()
}

#[test]
fn test_descriptors_from_several_roots_are_merged() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    write_descriptor(first.path(), "infra.Greeter", "infra.EnglishGreeter\n");
    write_descriptor(
        second.path(),
        "infra.Greeter",
        "# second unit\ninfra.DefaultGreeter\ninfra.EnglishGreeter\n",
    );

    let manifest = filesystem(&[first.path(), second.path()]);

    assert_eq!(
        implementations(&manifest),
        vec!["infra.EnglishGreeter", "infra.DefaultGreeter"]
    );
}

#[test]
fn test_unavailable_entries_are_skipped() {
    let root = tempfile::tempdir().unwrap();
    write_descriptor(
        root.path(),
        "infra.Greeter",
        "infra.BrokenGreeter\ninfra.Missing   # removed\n\ninfra.DefaultGreeter\n",
    );

    let manifest = filesystem(&[root.path()]);

    assert_eq!(implementations(&manifest), vec!["infra.DefaultGreeter"]);
    let first = manifest.lookup(&greeter()).expect("one entry instantiates");
    assert_eq!(first.implementation.as_str(), "infra.DefaultGreeter");
}

#[test]
fn test_lookup_returns_first_instantiable() {
    let root = tempfile::tempdir().unwrap();
    write_descriptor(
        root.path(),
        "infra.Greeter",
        "infra.DefaultGreeter\ninfra.EnglishGreeter\n",
    );

    let manifest = filesystem(&[root.path()]);
    let candidate = manifest.lookup(&greeter()).unwrap();

    assert_eq!(candidate.implementation.as_str(), "infra.DefaultGreeter");
    assert_eq!(candidate.instance.get::<dyn Greeter>().unwrap().greet(), "greetings");
}

#[test]
fn test_no_descriptor_means_absent() {
    let root = tempfile::tempdir().unwrap();
    let manifest = filesystem(&[root.path()]);

    assert!(manifest.lookup(&greeter()).is_none());
    assert!(manifest.lookup_all(&greeter()).is_empty());
}

#[test]
fn test_only_broken_entries_means_absent() {
    let root = tempfile::tempdir().unwrap();
    write_descriptor(root.path(), "infra.Greeter", "infra.BrokenGreeter\n");

    assert!(filesystem(&[root.path()]).lookup(&greeter()).is_none());
}

struct FlakySource;

impl ResourceSource for FlakySource {
    fn name(&self) -> &str {
        "flaky"
    }

    fn resources(&self, _relative_path: &str) -> Vec<Result<Resource>> {
        vec![
            Err(Error::io("permission denied")),
            Ok(Resource::new("flaky:1", "infra.EnglishGreeter\n")),
        ]
    }
}

#[test]
fn test_unreadable_resource_does_not_hide_others() {
    let manifest = ManifestLookup::new(vec![Arc::new(FlakySource)]);
    assert_eq!(implementations(&manifest), vec!["infra.EnglishGreeter"]);
}

#[test]
fn test_embedded_descriptors_are_read() {
    let manifest = ManifestLookup::new(vec![Arc::new(EmbeddedResources)]);
    assert_eq!(implementations(&manifest), vec!["infra.EnglishGreeter"]);
}

#[test]
fn test_filesystem_entries_come_before_embedded() {
    let root = tempfile::tempdir().unwrap();
    write_descriptor(root.path(), "infra.Greeter", "infra.DefaultGreeter\n");

    let manifest = filesystem(&[root.path()]).with_source(Arc::new(EmbeddedResources));

    assert_eq!(
        implementations(&manifest),
        vec!["infra.DefaultGreeter", "infra.EnglishGreeter"]
    );
}
