//! Domain Value Objects
//!
//! Immutable values exchanged between the registry, its backends and the
//! descriptor generator.
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`CapabilityId`] | Canonical identifier of an abstract contract |
//! | [`ImplementationId`] | Canonical identifier of a concrete implementation |
//! | [`Preference`] | Naming-convention rank of an implementation |
//! | [`Instance`] | Type-erased `Arc<T>` produced by a factory |
//! | [`Candidate`] | An instance tagged with the implementation that built it |
//! | [`DescriptorFile`] | Parsed content of one descriptor file |

/// Capability identifiers and the `Capability` marker trait
pub mod capability;
/// Descriptor file format
pub mod descriptor;
/// Implementation identifiers and preference ranking
pub mod implementation;
/// Type-erased instances
pub mod instance;

pub use capability::{Capability, CapabilityId};
pub use descriptor::DescriptorFile;
pub use implementation::{ImplementationId, Preference};
pub use instance::{Candidate, Instance};

/// Rewrites Rust path separators so `a::b::C` and `a.b.C` compare equal.
pub(crate) fn normalize_identifier(raw: &str) -> String {
    raw.trim()
        .replace(crate::constants::RUST_PATH_SEPARATOR, ".")
}
