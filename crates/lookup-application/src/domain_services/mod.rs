//! Domain services
//!
//! Pure policies applied by the registry.

pub mod preference;
