//! Subtype relation used to validate declarations

use std::collections::HashSet;

use crate::model::TypeElement;

/// Answers "does `implementer` satisfy `capability`?"
pub trait TypeHierarchy {
    /// True if `implementer` is `capability` or implements it
    fn is_subtype(&self, implementer: &TypeElement, capability: &TypeElement) -> bool;
}

/// `impl Trait for Type` relations recorded while scanning
#[derive(Debug, Clone, Default)]
pub struct SubtypeIndex {
    relations: HashSet<(String, String)>,
}

impl SubtypeIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `implementer` implements `capability`
    pub fn record(&mut self, implementer: &TypeElement, capability: &TypeElement) {
        self.relations
            .insert((implementer.binary_name(), capability.binary_name()));
    }

    /// Absorb every relation of `other`
    pub fn extend(&mut self, other: SubtypeIndex) {
        self.relations.extend(other.relations);
    }

    /// Number of recorded relations
    pub fn len(&self) -> usize {
        self.relations.len()
    }

    /// True when nothing is recorded
    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }
}

impl TypeHierarchy for SubtypeIndex {
    fn is_subtype(&self, implementer: &TypeElement, capability: &TypeElement) -> bool {
        let implementer = implementer.binary_name();
        let capability = capability.binary_name();
        implementer == capability || self.relations.contains(&(implementer, capability))
    }
}
