//! Configuration
//!
//! Layered configuration loaded with Figment: defaults, then a TOML file,
//! then `LOOKUP_`-prefixed environment variables.

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::{LoggingConfig, LookupConfig, ManifestConfig, RegistryConfig};
