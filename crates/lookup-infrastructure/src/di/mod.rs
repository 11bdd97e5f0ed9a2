//! Registry bootstrap
//!
//! Composition root for the service registry: optional override, the
//! manifest backend at the head of the chain, then every backend the
//! manifest itself discovers.

pub mod bootstrap;

pub use bootstrap::{global_registry, init_global_registry, init_registry};
