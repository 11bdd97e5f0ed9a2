//! Lookup Provider Port
//!
//! A backend able to discover implementations of a capability. The registry
//! queries its backends in registration order.
//!
//! Backends are themselves a capability: descriptor files for
//! `dyn LookupProvider` name additional backends, which the registry appends
//! to its chain at bootstrap. Its identifier is `lookup.LookupProvider`
//! whichever re-export the implementing crate imports it through.

use std::fmt;

use crate::constants::LOOKUP_PROVIDER_CAPABILITY;
use crate::value_objects::{Candidate, Capability, CapabilityId};

/// A pluggable strategy for discovering implementations
pub trait LookupProvider: Send + Sync {
    /// Short name used in diagnostics
    fn name(&self) -> &str;

    /// First implementation of `capability` this backend can produce
    fn lookup(&self, capability: &CapabilityId) -> Option<Candidate> {
        self.lookup_all(capability).into_iter().next()
    }

    /// Every implementation of `capability` this backend can produce, in
    /// discovery order. Implementations that fail to instantiate are left out.
    fn lookup_all(&self, capability: &CapabilityId) -> Vec<Candidate>;
}

impl Capability for dyn LookupProvider {
    const NAME: &'static str = LOOKUP_PROVIDER_CAPABILITY;
}

impl fmt::Debug for dyn LookupProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LookupProvider").field(&self.name()).finish()
    }
}
