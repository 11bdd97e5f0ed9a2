//! Capabilities, factory entries and descriptor helpers shared by the suite.

use std::path::Path;
use std::sync::Arc;

use lookup_application::ServiceRegistry;
use lookup_application::ports::registry::{
    DescriptorResourceEntry, EMBEDDED_DESCRIPTORS, IMPLEMENTATIONS, ImplementationEntry,
    ImplementationName, REGISTRY_OVERRIDES, RegistryOverrideEntry,
};
use lookup_domain::ports::LookupProvider;
use lookup_domain::value_objects::{Candidate, Capability, CapabilityId, Instance};

pub trait Greeter: Send + Sync {
    fn greet(&self) -> String;
}

impl Capability for dyn Greeter {
    const NAME: &'static str = "infra::Greeter";
}

pub struct Phrase(pub &'static str);

impl Greeter for Phrase {
    fn greet(&self) -> String {
        self.0.to_string()
    }
}

#[linkme::distributed_slice(IMPLEMENTATIONS)]
static ENGLISH_GREETER: ImplementationEntry = ImplementationEntry {
    capability: <dyn Greeter as Capability>::NAME,
    implementation: ImplementationName::Path("infra::EnglishGreeter"),
    description: "Hello",
    factory: || Ok(Instance::new::<dyn Greeter>(Arc::new(Phrase("hello")))),
};

#[linkme::distributed_slice(IMPLEMENTATIONS)]
static DEFAULT_GREETER: ImplementationEntry = ImplementationEntry {
    capability: <dyn Greeter as Capability>::NAME,
    implementation: ImplementationName::Path("infra::DefaultGreeter"),
    description: "Generic greeting",
    factory: || Ok(Instance::new::<dyn Greeter>(Arc::new(Phrase("greetings")))),
};

#[linkme::distributed_slice(IMPLEMENTATIONS)]
static BROKEN_GREETER: ImplementationEntry = ImplementationEntry {
    capability: <dyn Greeter as Capability>::NAME,
    implementation: ImplementationName::Path("infra::BrokenGreeter"),
    description: "Never builds",
    factory: || Err("no locale".to_string()),
};

/// Backend discovered through the manifest itself
pub struct FrenchLookup;

impl LookupProvider for FrenchLookup {
    fn name(&self) -> &str {
        "french"
    }

    fn lookup_all(&self, capability: &CapabilityId) -> Vec<Candidate> {
        if *capability != CapabilityId::of::<dyn Greeter>() {
            return Vec::new();
        }
        vec![Candidate::of::<dyn Greeter>(
            "infra.FrenchGreeter",
            Arc::new(Phrase("bonjour")),
        )]
    }
}

#[linkme::distributed_slice(IMPLEMENTATIONS)]
static FRENCH_LOOKUP: ImplementationEntry = ImplementationEntry {
    capability: <dyn LookupProvider as Capability>::NAME,
    implementation: ImplementationName::Path("infra::FrenchLookup"),
    description: "Answers in French",
    factory: || Ok(Instance::new::<dyn LookupProvider>(Arc::new(FrenchLookup))),
};

#[linkme::distributed_slice(REGISTRY_OVERRIDES)]
static PINNED_REGISTRY: RegistryOverrideEntry = RegistryOverrideEntry {
    name: "pinned",
    description: "Registry with a pinned greeter",
    factory: || {
        let registry = ServiceRegistry::new();
        registry.register::<dyn Greeter>(Arc::new(Phrase("pinned")));
        Ok(registry)
    },
};

#[linkme::distributed_slice(REGISTRY_OVERRIDES)]
static FAILING_REGISTRY: RegistryOverrideEntry = RegistryOverrideEntry {
    name: "failing",
    description: "Always fails",
    factory: || Err("misconfigured".to_string()),
};

#[linkme::distributed_slice(EMBEDDED_DESCRIPTORS)]
static EMBEDDED_GREETERS: DescriptorResourceEntry = DescriptorResourceEntry {
    unit: "infra-fixtures",
    path: "META-INF/services/infra.Greeter",
    contents: "# embedded\ninfra.EnglishGreeter\n",
};

/// Write a descriptor for `capability` below `root`
pub fn write_descriptor(root: &Path, capability: &str, body: &str) {
    let services = root.join("META-INF").join("services");
    std::fs::create_dir_all(&services).unwrap();
    std::fs::write(services.join(capability), body).unwrap();
}
