//! Infrastructure Layer - Lookup
//!
//! Technical concerns around the registry: the manifest backend and its
//! resource sources, layered configuration, structured logging, and the
//! bootstrap that wires them into a [`ServiceRegistry`](lookup_application::ServiceRegistry).
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`manifest`] | Descriptor-file backend (filesystem and embedded sources) |
//! | [`di`] | Registry bootstrap and the process-wide instance |
//! | [`config`] | Figment-based configuration loading |
//! | [`logging`] | tracing subscriber setup |
//! | [`error_ext`] | Context helpers mapping foreign errors to the domain error |

pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod logging;
pub mod manifest;

pub use config::{ConfigLoader, LookupConfig};
pub use di::{global_registry, init_global_registry, init_registry};
pub use error_ext::ErrorContext;
pub use logging::init_logging;
pub use manifest::{EmbeddedResources, FileSystemResources, ManifestLookup};
