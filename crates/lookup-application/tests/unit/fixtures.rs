//! Shared capabilities, implementations and an in-memory backend.

use std::sync::Arc;

use lookup_application::ports::registry::{IMPLEMENTATIONS, ImplementationEntry, ImplementationName};
use lookup_domain::ports::LookupProvider;
use lookup_domain::value_objects::{Candidate, Capability, CapabilityId, Instance};

pub trait Greeter: Send + Sync {
    fn greet(&self) -> String;
}

impl Capability for dyn Greeter {
    const NAME: &'static str = "fixtures::Greeter";
}

pub struct Named(pub &'static str);

impl Greeter for Named {
    fn greet(&self) -> String {
        self.0.to_string()
    }
}

/// Capability with no registered implementation at all
pub trait Orphan: Send + Sync {}

impl Capability for dyn Orphan {
    const NAME: &'static str = "fixtures::Orphan";
}

#[linkme::distributed_slice(IMPLEMENTATIONS)]
static FRIENDLY_GREETER: ImplementationEntry = ImplementationEntry {
    capability: <dyn Greeter as Capability>::NAME,
    implementation: ImplementationName::Path("fixtures::FriendlyGreeter"),
    description: "Says hello",
    factory: || Ok(Instance::new::<dyn Greeter>(Arc::new(Named("friendly")))),
};

#[linkme::distributed_slice(IMPLEMENTATIONS)]
static BROKEN_GREETER: ImplementationEntry = ImplementationEntry {
    capability: <dyn Greeter as Capability>::NAME,
    implementation: ImplementationName::Path("fixtures::BrokenGreeter"),
    description: "Always fails to build",
    factory: || Err("missing credentials".to_string()),
};

#[linkme::distributed_slice(IMPLEMENTATIONS)]
static MISLABELED_GREETER: ImplementationEntry = ImplementationEntry {
    capability: <dyn Greeter as Capability>::NAME,
    implementation: ImplementationName::Path("fixtures::MislabeledGreeter"),
    description: "Erases itself as the wrong capability",
    factory: || Ok(Instance::new(Arc::new(Named("mislabeled")))),
};

impl Capability for Named {
    const NAME: &'static str = "fixtures::Named";
}

/// Backend answering from a fixed list of `(implementation, greeting)` pairs
pub struct StaticLookup {
    name: &'static str,
    greeters: Vec<(&'static str, &'static str)>,
}

impl StaticLookup {
    pub fn new(name: &'static str, greeters: Vec<(&'static str, &'static str)>) -> Arc<Self> {
        Arc::new(Self { name, greeters })
    }
}

impl LookupProvider for StaticLookup {
    fn name(&self) -> &str {
        self.name
    }

    fn lookup_all(&self, capability: &CapabilityId) -> Vec<Candidate> {
        if *capability != CapabilityId::of::<dyn Greeter>() {
            return Vec::new();
        }
        self.greeters
            .iter()
            .map(|(implementation, greeting)| {
                Candidate::of::<dyn Greeter>(*implementation, Arc::new(Named(greeting)))
            })
            .collect()
    }
}

pub fn greetings(greeters: &[Arc<dyn Greeter>]) -> Vec<String> {
    greeters.iter().map(|g| g.greet()).collect()
}
