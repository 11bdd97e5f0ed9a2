//! Service Registry
//!
//! Facade clients use to obtain implementations of a capability without
//! knowing which backend discovers them.
//!
//! ## Resolution order
//!
//! 1. Instance overrides added with [`ServiceRegistry::register`]
//! 2. Backends in chain order. For a single-result lookup the first backend
//!    with a non-empty result wins and its candidates go through
//!    [`select_preferred`]; results are never merged across backends.
//!
//! [`ServiceRegistry::lookup_all`] instead concatenates every backend's
//! candidates in chain order, without deduplication or preference filtering.
//!
//! ## Concurrency
//!
//! Instance overrides live in a concurrent map. The chain is guarded by a
//! lock and snapshotted per lookup; mutating it is meant for configuration
//! time, before steady-state lookups.

use std::any::TypeId;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use dashmap::DashMap;
use lookup_domain::error::{Error, Result};
use lookup_domain::ports::LookupProvider;
use lookup_domain::value_objects::{Candidate, Capability, CapabilityId, ImplementationId, Instance};
use tracing::{debug, trace};

use crate::domain_services::preference::select_preferred;
use crate::ports::registry::resolve_implementation;

/// Provider-chain resolver with an instance override map
#[derive(Default)]
pub struct ServiceRegistry {
    backends: RwLock<Vec<Arc<dyn LookupProvider>>>,
    objects: DashMap<TypeId, Instance>,
}

impl ServiceRegistry {
    /// Create a registry with an empty chain and no overrides
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the given chain
    pub fn with_backends(backends: Vec<Arc<dyn LookupProvider>>) -> Self {
        Self {
            backends: RwLock::new(backends),
            objects: DashMap::new(),
        }
    }

    /// Preferred implementation of `T`, or `None` if nothing provides one
    pub fn lookup<T: Capability + ?Sized>(&self) -> Option<Arc<T>> {
        if let Some(instance) = self.registered::<T>() {
            return Some(instance);
        }

        let capability = CapabilityId::of::<T>();
        for backend in self.chain() {
            let candidates = typed_candidates::<T>(backend.as_ref(), &capability);
            if candidates.is_empty() {
                continue;
            }

            let chosen = select_preferred(candidates);
            debug!(
                capability = %capability,
                backend = backend.name(),
                implementation = %chosen.implementation,
                "Resolved implementation"
            );
            return chosen.instance.downcast::<T>().ok();
        }

        trace!(capability = %capability, "No implementation found");
        None
    }

    /// Like [`lookup`](Self::lookup), building `fallback` through the factory
    /// table when nothing is found.
    ///
    /// The caller nominated the fallback, so failing to build it is an error
    /// rather than an absent result.
    pub fn lookup_or<T: Capability + ?Sized>(
        &self,
        fallback: impl Into<ImplementationId>,
    ) -> Result<Arc<T>> {
        if let Some(instance) = self.lookup::<T>() {
            return Ok(instance);
        }

        let capability = CapabilityId::of::<T>();
        let fallback = fallback.into();
        let instance = resolve_implementation(&capability, &fallback).map_err(|e| {
            Error::fallback_construction(capability.as_str(), fallback.as_str(), e)
        })?;

        instance.downcast::<T>().map_err(|instance| {
            Error::fallback_construction(
                capability.as_str(),
                fallback.as_str(),
                format!("factory produced an instance of '{}'", instance.capability()),
            )
        })
    }

    /// Like [`lookup`](Self::lookup), calling `fallback` when nothing is found
    pub fn lookup_or_else<T, F, E>(&self, fallback: F) -> Result<Arc<T>>
    where
        T: Capability + ?Sized,
        F: FnOnce() -> std::result::Result<Arc<T>, E>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        if let Some(instance) = self.lookup::<T>() {
            return Ok(instance);
        }

        fallback().map_err(|e| {
            Error::fallback_construction(
                CapabilityId::of::<T>().as_str(),
                std::any::type_name::<F>(),
                e,
            )
        })
    }

    /// Every implementation of `T` from every backend, in chain order
    pub fn lookup_all<T: Capability + ?Sized>(&self) -> Vec<Arc<T>> {
        let capability = CapabilityId::of::<T>();
        self.chain()
            .iter()
            .flat_map(|backend| typed_candidates::<T>(backend.as_ref(), &capability))
            .filter_map(|candidate| candidate.instance.downcast::<T>().ok())
            .collect()
    }

    /// Pin `instance` as the result of every `lookup::<T>()` until replaced
    pub fn register<T: Capability + ?Sized>(&self, instance: Arc<T>) {
        debug!(capability = T::NAME, "Registered instance override");
        self.objects
            .insert(TypeId::of::<T>(), Instance::new(instance));
    }

    /// The instance override for `T`, if any
    pub fn registered<T: Capability + ?Sized>(&self) -> Option<Arc<T>> {
        self.objects
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.get::<T>())
    }

    /// Append a backend to the chain
    pub fn register_lookup(&self, backend: Arc<dyn LookupProvider>) {
        debug!(backend = backend.name(), "Registered lookup provider");
        self.backends
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(backend);
    }

    /// Put a backend at the head of the chain
    pub fn register_lookup_first(&self, backend: Arc<dyn LookupProvider>) {
        debug!(backend = backend.name(), "Registered lookup provider at chain head");
        self.backends
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(0, backend);
    }

    /// Remove a backend (by identity); remaining backends keep their order.
    ///
    /// Returns false if the backend was not in the chain.
    pub fn unregister_lookup(&self, backend: &Arc<dyn LookupProvider>) -> bool {
        let mut backends = self
            .backends
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let target = Arc::as_ptr(backend).cast::<()>();
        match backends
            .iter()
            .position(|b| Arc::as_ptr(b).cast::<()>() == target)
        {
            Some(index) => {
                let removed = backends.remove(index);
                debug!(backend = removed.name(), "Unregistered lookup provider");
                true
            }
            None => false,
        }
    }

    /// Names of the backends in chain order
    pub fn backends(&self) -> Vec<String> {
        self.chain()
            .iter()
            .map(|backend| backend.name().to_string())
            .collect()
    }

    fn chain(&self) -> Vec<Arc<dyn LookupProvider>> {
        self.backends
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("backends", &self.backends())
            .field("overrides", &self.objects.len())
            .finish()
    }
}

/// Candidates of `backend` that really are instances of `T`
fn typed_candidates<T: Capability + ?Sized>(
    backend: &dyn LookupProvider,
    capability: &CapabilityId,
) -> Vec<Candidate> {
    backend
        .lookup_all(capability)
        .into_iter()
        .filter(|candidate| {
            let matches = candidate.instance.is::<T>();
            if !matches {
                debug!(
                    capability = %capability,
                    backend = backend.name(),
                    implementation = %candidate.implementation,
                    "Skipping candidate of unexpected type"
                );
            }
            matches
        })
        .collect()
}
