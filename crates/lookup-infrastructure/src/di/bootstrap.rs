//! Registry Bootstrap
//!
//! ```text
//! LookupConfig ──► registry override? ──► ServiceRegistry
//!                       (linkme)              │
//!                                             ├── ManifestLookup   (chain head)
//!                                             └── backends named by descriptors
//!                                                 for `dyn LookupProvider`
//! ```
//!
//! [`init_registry`] builds a registry without touching global state.
//! [`global_registry`] builds the process-wide instance once, on first use.

use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use lookup_application::ServiceRegistry;
use lookup_application::ports::registry::resolve_registry_override;
use lookup_domain::error::{Error, Result};
use lookup_domain::ports::LookupProvider;
use lookup_domain::value_objects::CapabilityId;
use tracing::{debug, info, warn};

use crate::config::{ConfigLoader, LookupConfig};
use crate::manifest::ManifestLookup;

static GLOBAL_REGISTRY: OnceLock<Arc<ServiceRegistry>> = OnceLock::new();
static GLOBAL_INIT: Mutex<()> = Mutex::new(());

/// Build a registry from `config`
///
/// An unknown or failing registry override is logged and replaced by the
/// default registry.
pub fn init_registry(config: &LookupConfig) -> Arc<ServiceRegistry> {
    let registry = match config.registry.override_name() {
        Some(name) => match resolve_registry_override(name) {
            Ok(registry) => {
                info!(registry_override = name, "Using registry override");
                registry
            }
            Err(e) => {
                warn!(
                    registry_override = name,
                    error = %e,
                    "Ignoring registry override, using default registry"
                );
                ServiceRegistry::new()
            }
        },
        None => ServiceRegistry::new(),
    };

    let manifest = Arc::new(ManifestLookup::from_config(&config.manifest));
    registry.register_lookup_first(manifest.clone());

    let capability = CapabilityId::of::<dyn LookupProvider>();
    for candidate in manifest.lookup_all(&capability) {
        let implementation = candidate.implementation.clone();
        match candidate.instance.downcast::<dyn LookupProvider>() {
            Ok(backend) => {
                debug!(implementation = %implementation, "Discovered lookup provider");
                registry.register_lookup(backend);
            }
            Err(_) => {
                warn!(
                    implementation = %implementation,
                    "Discovered entry is not a lookup provider"
                );
            }
        }
    }

    info!(backends = ?registry.backends(), "Service registry initialized");
    Arc::new(registry)
}

/// The process-wide registry, created on first access
///
/// Configuration comes from [`ConfigLoader`]; if it cannot be loaded the
/// defaults are used.
pub fn global_registry() -> Arc<ServiceRegistry> {
    if let Some(registry) = GLOBAL_REGISTRY.get() {
        return Arc::clone(registry);
    }

    let _guard = GLOBAL_INIT.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(registry) = GLOBAL_REGISTRY.get() {
        return Arc::clone(registry);
    }

    let config = ConfigLoader::new().load().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load configuration, using defaults");
        LookupConfig::default()
    });
    GLOBAL_REGISTRY.get_or_init(|| init_registry(&config)).clone()
}

/// Create the process-wide registry from `config`
///
/// Fails if the registry already exists.
pub fn init_global_registry(config: &LookupConfig) -> Result<Arc<ServiceRegistry>> {
    let _guard = GLOBAL_INIT.lock().unwrap_or_else(PoisonError::into_inner);
    if GLOBAL_REGISTRY.get().is_some() {
        return Err(Error::configuration(
            "Global service registry is already initialized",
        ));
    }
    Ok(GLOBAL_REGISTRY.get_or_init(|| init_registry(config)).clone())
}
