use std::any::Any;
use std::fmt;
use std::sync::Arc;

use super::{Capability, CapabilityId, ImplementationId, Preference};

/// A type-erased `Arc<T>` for some capability `T`.
///
/// Backends are object safe, so they hand instances across the chain in this
/// form; the registry recovers the typed `Arc<T>` with [`Instance::downcast`].
pub struct Instance {
    capability: CapabilityId,
    value: Box<dyn Any + Send + Sync>,
}

impl Instance {
    /// Erase an instance of capability `T`
    pub fn new<T: Capability + ?Sized>(value: Arc<T>) -> Self {
        Self {
            capability: T::capability_id(),
            value: Box::new(value),
        }
    }

    /// Capability the instance was created for
    pub fn capability(&self) -> &CapabilityId {
        &self.capability
    }

    /// Recover the typed instance, handing `self` back on a type mismatch
    pub fn downcast<T: Capability + ?Sized>(self) -> Result<Arc<T>, Self> {
        let capability = self.capability;
        match self.value.downcast::<Arc<T>>() {
            Ok(value) => Ok(*value),
            Err(value) => Err(Self { capability, value }),
        }
    }

    /// Clone out the typed instance without consuming `self`
    pub fn get<T: Capability + ?Sized>(&self) -> Option<Arc<T>> {
        self.value.downcast_ref::<Arc<T>>().cloned()
    }

    /// True if the erased value is an `Arc<T>`
    pub fn is<T: Capability + ?Sized>(&self) -> bool {
        self.value.is::<Arc<T>>()
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("capability", &self.capability)
            .finish_non_exhaustive()
    }
}

/// An instance together with the implementation that produced it
#[derive(Debug)]
pub struct Candidate {
    /// Implementation identifier, used for preference ranking
    pub implementation: ImplementationId,
    /// The erased instance
    pub instance: Instance,
}

impl Candidate {
    /// Create a candidate
    pub fn new(implementation: impl Into<ImplementationId>, instance: Instance) -> Self {
        Self {
            implementation: implementation.into(),
            instance,
        }
    }

    /// Erase `value` and tag it with `implementation`
    pub fn of<T: Capability + ?Sized>(
        implementation: impl Into<ImplementationId>,
        value: Arc<T>,
    ) -> Self {
        Self::new(implementation, Instance::new(value))
    }

    /// Rank of the producing implementation
    pub fn preference(&self) -> Preference {
        self.implementation.preference()
    }
}
