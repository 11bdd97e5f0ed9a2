//! Resource Source Port
//!
//! Descriptor fragments for the same capability may come from several build
//! units. A resource source enumerates *every* resource matching a relative
//! path, not just the first.

use std::fmt;

use crate::error::Result;

/// One descriptor resource located by a [`ResourceSource`]
#[derive(Clone, PartialEq, Eq)]
pub struct Resource {
    /// Where the resource came from (file path, embedded unit name, ...)
    pub origin: String,
    /// UTF-8 content
    pub contents: String,
}

impl Resource {
    /// Create a resource
    pub fn new(origin: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            contents: contents.into(),
        }
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("origin", &self.origin)
            .field("len", &self.contents.len())
            .finish()
    }
}

/// Enumerates descriptor resources by relative path
pub trait ResourceSource: Send + Sync {
    /// Short name used in diagnostics
    fn name(&self) -> &str;

    /// Every resource at `relative_path`, in search order. A resource that
    /// exists but cannot be read is reported as an error entry so callers
    /// can skip it without losing the rest.
    fn resources(&self, relative_path: &str) -> Vec<Result<Resource>>;
}
