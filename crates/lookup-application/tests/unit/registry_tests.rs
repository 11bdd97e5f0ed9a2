//! Tests for the link-time factory table
//!
//! Entries are registered in `fixtures.rs` via `linkme`.

use lookup_application::ports::registry::{
    list_implementations, list_registry_overrides, resolve_implementation,
    resolve_registry_override,
};
use lookup_domain::error::Error;
use lookup_domain::value_objects::{CapabilityId, ImplementationId};

use crate::fixtures::{Greeter, Orphan};

#[test]
fn test_resolve_registered_implementation() {
    let instance = resolve_implementation(
        &CapabilityId::of::<dyn Greeter>(),
        &ImplementationId::new("fixtures.FriendlyGreeter"),
    )
    .expect("friendly greeter should be registered");

    let greeter = instance
        .downcast::<dyn Greeter>()
        .ok()
        .expect("instance should be a greeter");
    assert_eq!(greeter.greet(), "friendly");
}

#[test]
fn test_resolve_accepts_rust_path_separators() {
    let result = resolve_implementation(
        &CapabilityId::new("fixtures::Greeter"),
        &ImplementationId::new("fixtures::FriendlyGreeter"),
    );
    assert!(result.is_ok());
}

#[test]
fn test_resolve_unknown_implementation_fails() {
    let result = resolve_implementation(
        &CapabilityId::of::<dyn Greeter>(),
        &ImplementationId::new("fixtures.NoSuchGreeter"),
    );

    match result {
        Err(err) => assert!(err.is_unknown_implementation(), "unexpected error: {err}"),
        Ok(_) => panic!("Expected error for unknown implementation"),
    }
}

#[test]
fn test_resolve_wrong_capability_fails() {
    let result = resolve_implementation(
        &CapabilityId::of::<dyn Orphan>(),
        &ImplementationId::new("fixtures.FriendlyGreeter"),
    );
    assert!(matches!(result, Err(Error::UnknownImplementation { .. })));
}

#[test]
fn test_failing_factory_reports_message() {
    let result = resolve_implementation(
        &CapabilityId::of::<dyn Greeter>(),
        &ImplementationId::new("fixtures.BrokenGreeter"),
    );

    match result {
        Err(Error::Instantiation { message, .. }) => assert_eq!(message, "missing credentials"),
        other => panic!("Expected instantiation error, got {other:?}"),
    }
}

#[test]
fn test_factory_with_wrong_capability_is_rejected() {
    let result = resolve_implementation(
        &CapabilityId::of::<dyn Greeter>(),
        &ImplementationId::new("fixtures.MislabeledGreeter"),
    );

    match result {
        Err(Error::Instantiation { message, .. }) => {
            assert!(message.contains("fixtures.Named"), "{message}");
        }
        other => panic!("Expected instantiation error, got {other:?}"),
    }
}

#[test]
fn test_list_implementations_has_descriptions() {
    let implementations = list_implementations(&CapabilityId::of::<dyn Greeter>());

    assert_eq!(implementations.len(), 3, "{implementations:?}");
    for (name, description) in &implementations {
        assert!(!name.is_empty());
        assert!(!description.is_empty(), "'{name}' should have a description");
    }
    assert!(list_implementations(&CapabilityId::of::<dyn Orphan>()).is_empty());
}

#[test]
fn test_unknown_registry_override_lists_available() {
    assert!(list_registry_overrides().is_empty());

    let err = resolve_registry_override("tuned").expect_err("nothing registered");
    assert!(err.to_string().contains("Unknown registry override 'tuned'"));
}
