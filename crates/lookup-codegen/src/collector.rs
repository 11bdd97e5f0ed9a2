//! Descriptor collector
//!
//! Accumulates `capability -> implementations` across every round of a
//! build. Contributions may come from several threads.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use crate::diagnostics::Diagnostic;
use crate::hierarchy::TypeHierarchy;
use crate::model::ProviderDeclaration;

/// Build-wide accumulator of validated declarations
#[derive(Debug, Default)]
pub struct DescriptorCollector {
    collected: Mutex<BTreeMap<String, Vec<String>>>,
}

impl DescriptorCollector {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `declaration` and record it under its capability
    ///
    /// A declaration whose implementer does not satisfy the capability is
    /// not recorded; the returned diagnostic points at it.
    pub fn collect(
        &self,
        declaration: &ProviderDeclaration,
        hierarchy: &dyn TypeHierarchy,
    ) -> Result<(), Diagnostic> {
        let capability = declaration.effective_capability();
        if !hierarchy.is_subtype(&declaration.implementer, capability) {
            return Err(Diagnostic::error(
                format!(
                    "service providers must implement their capability: {} does not implement {}",
                    declaration.implementer, capability
                ),
                Some(declaration.location.clone()),
            ));
        }

        self.record(capability.binary_name(), declaration.implementer.binary_name());
        Ok(())
    }

    /// Record `implementation` under `capability`; repeated pairs collapse
    pub fn record(&self, capability: String, implementation: String) {
        let mut collected = self.collected.lock().unwrap_or_else(PoisonError::into_inner);
        let implementations = collected.entry(capability).or_default();
        if !implementations.contains(&implementation) {
            implementations.push(implementation);
        }
    }

    /// Copy of everything collected so far, keyed by capability
    pub fn snapshot(&self) -> BTreeMap<String, Vec<String>> {
        self.collected
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of capabilities seen
    pub fn len(&self) -> usize {
        self.collected
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// True when nothing has been collected
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
