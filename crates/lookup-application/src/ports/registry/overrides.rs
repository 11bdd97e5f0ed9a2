//! Registry Override Table
//!
//! Alternate registry constructions selectable by name through
//! configuration, replacing the default empty registry at bootstrap.

use lookup_domain::error::{Error, Result};

use crate::use_cases::registry::ServiceRegistry;

/// Registry entry for an alternate registry construction
pub struct RegistryOverrideEntry {
    /// Unique name referenced by configuration
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function building the registry before the built-in
    /// manifest backend is attached
    pub factory: fn() -> std::result::Result<ServiceRegistry, String>,
}

#[linkme::distributed_slice]
pub static REGISTRY_OVERRIDES: [RegistryOverrideEntry] = [..];

/// Build the registry registered under `name`
pub fn resolve_registry_override(name: &str) -> Result<ServiceRegistry> {
    let entry = REGISTRY_OVERRIDES
        .iter()
        .find(|entry| entry.name == name)
        .ok_or_else(|| {
            let available: Vec<&str> = REGISTRY_OVERRIDES.iter().map(|e| e.name).collect();
            Error::configuration(format!(
                "Unknown registry override '{name}'. Available overrides: {available:?}"
            ))
        })?;

    (entry.factory)().map_err(|message| {
        Error::configuration(format!("Registry override '{name}' failed: {message}"))
    })
}

/// List all registered registry overrides as `(name, description)` tuples
pub fn list_registry_overrides() -> Vec<(&'static str, &'static str)> {
    REGISTRY_OVERRIDES
        .iter()
        .map(|entry| (entry.name, entry.description))
        .collect()
}
