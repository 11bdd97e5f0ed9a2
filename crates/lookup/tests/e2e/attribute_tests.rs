//! Attribute-only registrations resolved through descriptors generated from
//! their own source.

use std::path::Path;
use std::sync::Arc;

use lookup::codegen::{GenerationReport, ServiceProviderGenerator, SourceScanner};
use lookup::infrastructure::config::ConfigBuilder;
use lookup::{ServiceRegistry, init_registry};

use crate::fixtures::UNIT;
use crate::providers::{Clock, Oracle, install};

const PROVIDERS: &str = include_str!("providers.rs");

fn generate_providers(out: &Path) -> GenerationReport {
    let scan = SourceScanner::new(UNIT)
        .scan_module(Path::new("tests/e2e/providers.rs"), &["providers"], PROVIDERS)
        .unwrap();
    let generator = ServiceProviderGenerator::new(out);
    generator.process_round(&scan);
    generator.finish().unwrap()
}

fn registry_over(out: &Path) -> Arc<ServiceRegistry> {
    let config = ConfigBuilder::new()
        .with_search_dir(out)
        .with_embedded_descriptors(false)
        .build();
    init_registry(&config)
}

#[test]
fn test_attribute_providers_resolve_by_generated_names() {
    let out = tempfile::tempdir().unwrap();
    let report = generate_providers(out.path());
    install();

    assert!(!report.has_errors(), "{:?}", report.diagnostics);
    let descriptor =
        std::fs::read_to_string(out.path().join("META-INF/services/e2e.providers.Oracle"))
            .unwrap();
    assert_eq!(
        descriptor,
        "e2e.providers.CachedOracle\ne2e.providers.SlowOracle\ne2e.providers.install$Ticker\n"
    );

    let registry = registry_over(out.path());
    let answers: Vec<u32> = registry
        .lookup_all::<dyn Oracle>()
        .iter()
        .map(|oracle| oracle.answer())
        .collect();
    assert_eq!(answers, vec![42, 7, 1]);
    assert!(registry.lookup::<Clock>().is_some());
}

#[test]
fn test_generated_backend_descriptor_extends_the_chain() {
    let out = tempfile::tempdir().unwrap();
    generate_providers(out.path());

    let descriptor =
        std::fs::read_to_string(out.path().join("META-INF/services/lookup.LookupProvider"))
            .unwrap();
    assert_eq!(descriptor, "e2e.providers.EchoLookup\n");

    let registry = registry_over(out.path());
    assert_eq!(registry.backends(), vec!["manifest", "echo"]);
}
