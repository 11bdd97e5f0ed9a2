//! Implementation Factory Table
//!
//! Maps `(capability, implementation)` identifiers to factory functions.
//! Implementations register via `linkme::distributed_slice(IMPLEMENTATIONS)`.

use lookup_domain::error::{Error, Result};
use lookup_domain::value_objects::{CapabilityId, ImplementationId, Instance};

/// Registry entry for one implementation of one capability
///
/// An implementation serving several capabilities registers one entry per
/// capability, each factory erasing the instance as that capability.
pub struct ImplementationEntry {
    /// Capability identifier (`::` or `.` separated)
    pub capability: &'static str,
    /// Implementation identifier, as written in descriptor files
    pub implementation: ImplementationName,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function to create the instance
    pub factory: fn() -> std::result::Result<Instance, String>,
}

impl ImplementationEntry {
    /// True if this entry serves `capability` under `implementation`
    pub fn matches(&self, capability: &CapabilityId, implementation: &ImplementationId) -> bool {
        self.serves(capability)
            && ImplementationId::new(self.implementation.as_str()) == *implementation
    }

    /// True if this entry serves `capability`
    pub fn serves(&self, capability: &CapabilityId) -> bool {
        CapabilityId::new(self.capability) == *capability
    }
}

/// How an entry names its implementation
#[derive(Debug, Clone, Copy)]
pub enum ImplementationName {
    /// A path written out by hand
    Path(&'static str),
    /// The Rust type name, read when the entry is matched
    TypeName(fn() -> &'static str),
}

impl ImplementationName {
    /// Name taken from the definition path of `T`
    ///
    /// Types declared in function bodies include the function in their
    /// path, matching the nested identifiers of generated descriptors.
    pub const fn of<T: ?Sized>() -> Self {
        Self::TypeName(std::any::type_name::<T>)
    }

    /// The name as registered
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Path(path) => path,
            Self::TypeName(name) => name(),
        }
    }
}

#[linkme::distributed_slice]
pub static IMPLEMENTATIONS: [ImplementationEntry] = [..];

/// Instantiate `implementation` as `capability` using its registered factory
///
/// # Returns
/// * `Ok(Instance)` - The erased instance, guaranteed to be of `capability`
/// * `Err(Error::UnknownImplementation)` - No factory under that name
/// * `Err(Error::Instantiation)` - The factory failed or built the wrong type
pub fn resolve_implementation(
    capability: &CapabilityId,
    implementation: &ImplementationId,
) -> Result<Instance> {
    let entry = IMPLEMENTATIONS
        .iter()
        .find(|entry| entry.matches(capability, implementation))
        .ok_or_else(|| {
            Error::unknown_implementation(capability.as_str(), implementation.as_str())
        })?;

    let instance = (entry.factory)()
        .map_err(|message| Error::instantiation(implementation.as_str(), message))?;

    if instance.capability() != capability {
        return Err(Error::instantiation(
            implementation.as_str(),
            format!(
                "factory produced an instance of '{}' instead of '{}'",
                instance.capability(),
                capability
            ),
        ));
    }

    Ok(instance)
}

/// List all registered implementations of a capability
///
/// Returns `(implementation, description)` tuples in registration order.
pub fn list_implementations(capability: &CapabilityId) -> Vec<(&'static str, &'static str)> {
    IMPLEMENTATIONS
        .iter()
        .filter(|entry| entry.serves(capability))
        .map(|entry| (entry.implementation.as_str(), entry.description))
        .collect()
}
