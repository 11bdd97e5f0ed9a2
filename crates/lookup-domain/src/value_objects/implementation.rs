use std::fmt;

use serde::{Deserialize, Serialize};

use super::normalize_identifier;
use crate::constants::{FALLBACK_MARKER, NESTED_TYPE_SEPARATOR};

/// Canonical identifier of a concrete implementation
///
/// Written into descriptor files and used as the key of the factory table.
/// A nested-type separator compares equal to a namespace separator, so
/// `app.install$Local` names the same type as `app::install::Local`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImplementationId(String);

impl ImplementationId {
    /// Create an identifier, normalising Rust path and nested-type separators
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(normalize_identifier(raw.as_ref()).replace(NESTED_TYPE_SEPARATOR, "."))
    }

    /// The identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Rank of this implementation under the naming convention
    pub fn preference(&self) -> Preference {
        Preference::of(self.as_str())
    }
}

impl fmt::Display for ImplementationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImplementationId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ImplementationId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl AsRef<str> for ImplementationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Naming-convention rank used to break ties between candidates.
///
/// An implementation whose identifier contains `"default"` (any case) is a
/// [`Preference::Fallback`]; anything else is [`Preference::Preferred`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Preference {
    /// Chosen first, in discovery order
    Preferred,
    /// Chosen only when no preferred candidate exists
    Fallback,
}

impl Preference {
    /// Rank an implementation identifier
    pub fn of(identifier: &str) -> Self {
        if identifier.to_lowercase().contains(FALLBACK_MARKER) {
            Self::Fallback
        } else {
            Self::Preferred
        }
    }

    /// True for [`Preference::Preferred`]
    pub fn is_preferred(self) -> bool {
        self == Self::Preferred
    }
}
