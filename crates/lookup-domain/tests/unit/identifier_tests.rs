//! Identifier normalisation and the preference naming convention.

use lookup_domain::value_objects::{CapabilityId, ImplementationId, Preference};

#[test]
fn test_rust_paths_normalise_to_dotted_form() {
    assert_eq!(
        CapabilityId::new("my_app::greeting::Greeter").as_str(),
        "my_app.greeting.Greeter"
    );
    assert_eq!(
        ImplementationId::new(" my_app::Outer$Inner ").as_str(),
        "my_app.Outer.Inner"
    );
}

#[test]
fn test_nested_identifiers_match_type_paths() {
    assert_eq!(
        ImplementationId::new("my_app.setup.install$Local"),
        ImplementationId::new("my_app::setup::install::Local")
    );
    assert_ne!(
        CapabilityId::new("my_app.Outer$Inner"),
        CapabilityId::new("my_app.Outer.Inner")
    );
}

#[test]
fn test_descriptor_path() {
    assert_eq!(
        CapabilityId::new("my_app::Greeter").descriptor_path(),
        "META-INF/services/my_app.Greeter"
    );
}

#[test]
fn test_default_marker_is_case_insensitive() {
    assert_eq!(Preference::of("app.DefaultGreeter"), Preference::Fallback);
    assert_eq!(Preference::of("app.greeters.DEFAULT"), Preference::Fallback);
    assert_eq!(Preference::of("app.default_impl.Loud"), Preference::Fallback);
    assert_eq!(Preference::of("app.LoudGreeter"), Preference::Preferred);
}
