//! Descriptor file format
//!
//! One implementation identifier per line, UTF-8. Everything after `#` on a
//! line is a comment; blank lines are ignored. Files are read in any order
//! and always written sorted, one identifier per line.

use std::collections::BTreeSet;

use crate::constants::DESCRIPTOR_COMMENT;

/// The set of implementation identifiers recorded for one capability.
///
/// Identifiers keep first-seen order (the order lookups discover them in)
/// and compare by exact string equality.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptorFile {
    entries: Vec<String>,
}

impl DescriptorFile {
    /// Create an empty descriptor
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse descriptor content, dropping comments, blank lines and duplicates
    pub fn parse(content: &str) -> Self {
        let mut file = Self::new();
        for line in content.lines() {
            let line = match line.find(DESCRIPTOR_COMMENT) {
                Some(start) => &line[..start],
                None => line,
            };
            file.insert(line.trim());
        }
        file
    }

    /// Add an identifier; returns false for blanks and duplicates
    pub fn insert(&mut self, identifier: impl AsRef<str>) -> bool {
        let identifier = identifier.as_ref();
        if identifier.is_empty() || self.contains(identifier) {
            return false;
        }
        self.entries.push(identifier.to_string());
        true
    }

    /// Absorb every identifier of `other` that is not already present
    pub fn extend(&mut self, other: &DescriptorFile) {
        for identifier in &other.entries {
            self.insert(identifier);
        }
    }

    /// True if `identifier` is recorded
    pub fn contains(&self, identifier: &str) -> bool {
        self.entries.iter().any(|entry| entry == identifier)
    }

    /// True if every identifier of `identifiers` is already recorded
    pub fn contains_all<S: AsRef<str>>(&self, identifiers: &[S]) -> bool {
        identifiers
            .iter()
            .all(|identifier| self.contains(identifier.as_ref()))
    }

    /// Union of this file with `identifiers`, or `None` when it adds nothing
    pub fn union<S: AsRef<str>>(&self, identifiers: &[S]) -> Option<DescriptorFile> {
        if self.contains_all(identifiers) {
            return None;
        }
        let mut merged = self.clone();
        for identifier in identifiers {
            merged.insert(identifier);
        }
        Some(merged)
    }

    /// Identifiers in first-seen order
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Identifiers in alphabetical order
    pub fn sorted(&self) -> BTreeSet<&str> {
        self.identifiers().collect()
    }

    /// Number of identifiers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no identifier is recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the file: sorted, one identifier per line
    pub fn render(&self) -> String {
        let mut out = String::new();
        for identifier in self.sorted() {
            out.push_str(identifier);
            out.push('\n');
        }
        out
    }
}

impl<S: AsRef<str>> FromIterator<S> for DescriptorFile {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut file = Self::new();
        for identifier in iter {
            file.insert(identifier.as_ref().trim());
        }
        file
    }
}
