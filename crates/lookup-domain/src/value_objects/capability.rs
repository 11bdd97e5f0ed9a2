use std::fmt;

use serde::{Deserialize, Serialize};

use super::normalize_identifier;
use crate::constants::{LOOKUP_PROVIDER_ALIASES, LOOKUP_PROVIDER_CAPABILITY, SERVICES_PATH};

/// A type that can be requested from the registry.
///
/// Normally implemented for a trait object (`dyn Service`); a concrete type
/// may also implement it for itself, in which case it is both capability
/// and implementation.
///
/// ```ignore
/// pub trait Greeter: Send + Sync {
///     fn greet(&self) -> String;
/// }
///
/// impl Capability for dyn Greeter {
///     const NAME: &'static str = concat!(module_path!(), "::Greeter");
/// }
/// ```
pub trait Capability: Send + Sync + 'static {
    /// Stable identifier; `::` and `.` separators are interchangeable
    const NAME: &'static str;

    /// Canonical identifier of this capability
    fn capability_id() -> CapabilityId {
        CapabilityId::new(Self::NAME)
    }
}

/// Canonical, dotted identifier of a capability (e.g. `app.cache.Service`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilityId(String);

impl CapabilityId {
    /// Create an identifier, normalising Rust path separators
    ///
    /// Every re-exported path of the backend capability maps to
    /// [`LOOKUP_PROVIDER_CAPABILITY`].
    pub fn new(raw: impl AsRef<str>) -> Self {
        let id = normalize_identifier(raw.as_ref());
        if LOOKUP_PROVIDER_ALIASES.contains(&id.as_str()) {
            Self(LOOKUP_PROVIDER_CAPABILITY.to_string())
        } else {
            Self(id)
        }
    }

    /// Identifier of the capability `T`
    pub fn of<T: Capability + ?Sized>() -> Self {
        T::capability_id()
    }

    /// The identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Relative path of this capability's descriptor file
    pub fn descriptor_path(&self) -> String {
        format!("{SERVICES_PATH}/{}", self.0)
    }
}

impl fmt::Display for CapabilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CapabilityId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CapabilityId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl AsRef<str> for CapabilityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
