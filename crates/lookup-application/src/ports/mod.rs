//! Application ports
//!
//! Link-time registration tables consumed by the registry and its backends.

pub mod registry;

pub use registry::*;
