//! Domain Layer - Lookup
//!
//! Core types of the service lookup system. Nothing in this crate knows how
//! implementations are discovered; it only defines what a capability is,
//! how implementations are identified, and the contracts backends fulfil.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`value_objects`] | Capability/implementation identifiers, erased instances, descriptor files |
//! | [`ports`] | Backend (`LookupProvider`) and resource enumeration (`ResourceSource`) contracts |
//! | [`error`] | Error taxonomy shared by every layer |
//! | [`constants`] | Descriptor layout and naming-convention constants |

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::{LookupProvider, ResourceSource};
pub use value_objects::{
    Candidate, Capability, CapabilityId, DescriptorFile, ImplementationId, Instance, Preference,
};
