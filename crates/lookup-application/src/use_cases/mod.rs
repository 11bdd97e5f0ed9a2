//! Use cases
//!
//! The registry facade clients interact with.

pub mod registry;

pub use registry::ServiceRegistry;
