//! Manifest backend
//!
//! Discovers implementations from descriptor files stored under
//! `META-INF/services/<capability>`. Descriptors are read from every
//! configured [`ResourceSource`](lookup_domain::ports::ResourceSource) and
//! merged before instantiation through the factory table.

pub mod lookup;
pub mod resources;

pub use lookup::ManifestLookup;
pub use resources::{EmbeddedResources, FileSystemResources};
