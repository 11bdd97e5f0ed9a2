//! Domain Port Interfaces
//!
//! Contracts implemented by the outer layers.
//!
//! | Port | Description |
//! |------|-------------|
//! | [`LookupProvider`] | A backend in the registry's provider chain |
//! | [`ResourceSource`] | Enumerates descriptor resources on a search path |

/// Provider chain backend port
pub mod lookup_provider;
/// Descriptor resource enumeration port
pub mod resources;

pub use lookup_provider::LookupProvider;
pub use resources::{Resource, ResourceSource};
