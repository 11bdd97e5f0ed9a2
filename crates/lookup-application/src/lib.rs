//! Application Layer - Lookup
//!
//! Orchestrates service discovery on top of the domain types.
//!
//! ## Architecture
//!
//! ```text
//! ServiceRegistry::lookup::<dyn Service>()
//!        │
//!        ├── instance overrides (register)      ← checked first
//!        │
//!        └── provider chain, in order
//!              ├── backend 1 ── lookup_all ──┐
//!              ├── backend 2                 │  first non-empty result wins
//!              └── ...                       ▼
//!                               select_preferred(candidates)
//! ```
//!
//! ## Modules
//!
//! - `ports::registry`: link-time registration tables (factories, registry
//!   overrides, embedded descriptors)
//! - `domain_services::preference`: the naming-convention tie-break
//! - `use_cases::registry`: the [`ServiceRegistry`] facade
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `lookup-domain`: identifiers, instances and backend ports
//! - `linkme`, `dashmap` and `tracing`

pub mod domain_services;
pub mod ports;
pub mod use_cases;

pub use domain_services::preference::select_preferred;
pub use use_cases::registry::ServiceRegistry;
