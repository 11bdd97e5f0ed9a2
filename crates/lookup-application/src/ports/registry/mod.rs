//! Link-time Registration Tables
//!
//! Implementations are discovered by name without runtime reflection: each
//! implementation contributes a factory to a `linkme` distributed slice, and
//! descriptor files name the entries to instantiate.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                   Implementation Discovery Flow                   │
//! ├──────────────────────────────────────────────────────────────────┤
//! │                                                                  │
//! │  1. Crate declares:   #[linkme::distributed_slice(IMPLEMENTATIONS)]
//! │                       static ENTRY: ImplementationEntry = ...    │
//! │                              ↓                                   │
//! │  2. Generator writes: META-INF/services/<capability>             │
//! │                              ↓                                   │
//! │  3. Manifest backend: reads identifiers from every descriptor    │
//! │                              ↓                                   │
//! │  4. Factory table:    resolve_implementation(capability, id)     │
//! │                                                                  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use lookup_application::ports::registry::{
//!     ImplementationEntry, ImplementationName, IMPLEMENTATIONS,
//! };
//!
//! #[linkme::distributed_slice(IMPLEMENTATIONS)]
//! static CONSOLE_GREETER: ImplementationEntry = ImplementationEntry {
//!     capability: <dyn Greeter as Capability>::NAME,
//!     implementation: ImplementationName::of::<ConsoleGreeter>(),
//!     description: "Greets on stdout",
//!     factory: || Ok(Instance::new::<dyn Greeter>(Arc::new(ConsoleGreeter))),
//! };
//! ```

pub mod descriptors;
pub mod implementations;
pub mod overrides;

// Re-export all registry types and functions
pub use descriptors::{
    DescriptorResourceEntry, EMBEDDED_DESCRIPTORS, embedded_descriptors, list_embedded_descriptors,
};
pub use implementations::{
    IMPLEMENTATIONS, ImplementationEntry, ImplementationName, list_implementations,
    resolve_implementation,
};
pub use overrides::{
    REGISTRY_OVERRIDES, RegistryOverrideEntry, list_registry_overrides, resolve_registry_override,
};
