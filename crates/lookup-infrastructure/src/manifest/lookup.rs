//! Manifest lookup provider
//!
//! Identifiers are gathered from every resource of every source, merged in
//! first-seen order, then instantiated through the factory table. An
//! identifier that cannot be instantiated is skipped; the others still
//! resolve.

use std::fmt;
use std::sync::Arc;

use lookup_application::ports::registry::resolve_implementation;
use lookup_domain::ports::{LookupProvider, ResourceSource};
use lookup_domain::value_objects::{Candidate, CapabilityId, DescriptorFile, ImplementationId};
use tracing::{debug, warn};

use crate::config::ManifestConfig;
use crate::constants::MANIFEST_BACKEND_NAME;
use crate::manifest::resources::{EmbeddedResources, FileSystemResources};

/// Backend reading per-capability descriptor files
pub struct ManifestLookup {
    sources: Vec<Arc<dyn ResourceSource>>,
}

impl ManifestLookup {
    /// Read descriptors from `sources`, in order
    pub fn new(sources: Vec<Arc<dyn ResourceSource>>) -> Self {
        Self { sources }
    }

    /// Sources as configured: search path directories first, then embedded
    /// descriptors when enabled
    pub fn from_config(config: &ManifestConfig) -> Self {
        let mut sources: Vec<Arc<dyn ResourceSource>> = Vec::new();
        if !config.search_path.is_empty() {
            sources.push(Arc::new(FileSystemResources::new(
                config.search_path.iter().cloned(),
            )));
        }
        if config.embedded {
            sources.push(Arc::new(EmbeddedResources));
        }
        Self::new(sources)
    }

    /// Add a source after the existing ones
    #[must_use]
    pub fn with_source(mut self, source: Arc<dyn ResourceSource>) -> Self {
        self.sources.push(source);
        self
    }

    /// Merged descriptor for `capability` across every source
    pub fn descriptor(&self, capability: &CapabilityId) -> DescriptorFile {
        let path = capability.descriptor_path();
        let mut merged = DescriptorFile::new();
        for source in &self.sources {
            for resource in source.resources(&path) {
                match resource {
                    Ok(resource) => {
                        debug!(
                            capability = %capability,
                            source = source.name(),
                            origin = %resource.origin,
                            "Reading descriptor"
                        );
                        merged.extend(&DescriptorFile::parse(&resource.contents));
                    }
                    Err(e) => {
                        warn!(
                            capability = %capability,
                            source = source.name(),
                            error = %e,
                            "Skipping unreadable descriptor"
                        );
                    }
                }
            }
        }
        merged
    }

    fn instantiate(&self, capability: &CapabilityId, identifier: &str) -> Option<Candidate> {
        let implementation = ImplementationId::new(identifier);
        match resolve_implementation(capability, &implementation) {
            Ok(instance) => Some(Candidate::new(implementation, instance)),
            Err(e) => {
                debug!(
                    capability = %capability,
                    implementation = %implementation,
                    error = %e,
                    "Implementation unavailable"
                );
                None
            }
        }
    }
}

impl LookupProvider for ManifestLookup {
    fn name(&self) -> &str {
        MANIFEST_BACKEND_NAME
    }

    fn lookup(&self, capability: &CapabilityId) -> Option<Candidate> {
        self.descriptor(capability)
            .identifiers()
            .find_map(|identifier| self.instantiate(capability, identifier))
    }

    fn lookup_all(&self, capability: &CapabilityId) -> Vec<Candidate> {
        self.descriptor(capability)
            .identifiers()
            .filter_map(|identifier| self.instantiate(capability, identifier))
            .collect()
    }
}

impl fmt::Debug for ManifestLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sources: Vec<&str> = self.sources.iter().map(|s| s.name()).collect();
        f.debug_struct("ManifestLookup")
            .field("sources", &sources)
            .finish()
    }
}
