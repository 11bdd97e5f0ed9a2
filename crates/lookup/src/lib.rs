//! # Lookup
//!
//! Pluggable service discovery. Clients ask for an implementation of a
//! capability; a chain of backends finds one without the client knowing how.
//!
//! ## Example
//!
//! ```ignore
//! #[lookup::capability]
//! pub trait Greeter: Send + Sync {
//!     fn greet(&self) -> String;
//! }
//!
//! /// English greetings
//! #[lookup::service_provider(dyn Greeter)]
//! #[derive(Default)]
//! pub struct English;
//!
//! impl Greeter for English {
//!     fn greet(&self) -> String { "hello".into() }
//! }
//!
//! // build.rs runs lookup::codegen::build::generate_for_build(), and the
//! // crate embeds the result:
//! include!(concat!(env!("OUT_DIR"), "/lookup_descriptors.rs"));
//!
//! let greeter = lookup::global_registry().lookup::<dyn Greeter>();
//! ```
//!
//! Implementations can also be registered by hand, with an
//! `ImplementationEntry` in [`registry::IMPLEMENTATIONS`] named by
//! `ImplementationName::of::<T>()`.
//!
//! ## Architecture
//!
//! - `domain` - identifiers, erased instances, backend ports, errors
//! - `application` - registration tables and the [`ServiceRegistry`] facade
//! - `infrastructure` - manifest backend, configuration, logging, bootstrap
//! - `codegen` - build-time descriptor generator

/// Domain layer - identifiers, instances and backend contracts
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use lookup_domain::*;
}

/// Application layer - registry facade and preference policy
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use lookup_application::*;
}

/// Link-time registration tables
pub mod registry {
    pub use lookup_application::ports::registry::*;
}

/// Infrastructure layer - manifest backend, config, logging and bootstrap
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use lookup_infrastructure::*;
}

/// Build-time descriptor generator
pub mod codegen {
    pub use lookup_codegen::*;
}

pub use linkme;
pub use lookup_macros::{capability, service_provider};

pub use domain::{
    Candidate, Capability, CapabilityId, DescriptorFile, Error, ImplementationId, Instance,
    LookupProvider, Preference, ResourceSource, Result,
};

pub use application::{ServiceRegistry, select_preferred};

pub use infrastructure::{
    ConfigLoader, LookupConfig, ManifestLookup, global_registry, init_global_registry,
    init_logging, init_registry,
};
