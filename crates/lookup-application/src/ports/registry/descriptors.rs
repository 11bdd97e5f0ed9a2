//! Embedded Descriptor Table
//!
//! Descriptor files compiled into the binary. The generator can emit the
//! declarations for a crate's descriptors; the manifest backend reads them
//! alongside descriptors found on the filesystem search path.

/// A descriptor file embedded at build time
pub struct DescriptorResourceEntry {
    /// Build unit that contributed the descriptor (usually the crate name)
    pub unit: &'static str,
    /// Relative path, e.g. `META-INF/services/app.Greeter`
    pub path: &'static str,
    /// File content
    pub contents: &'static str,
}

#[linkme::distributed_slice]
pub static EMBEDDED_DESCRIPTORS: [DescriptorResourceEntry] = [..];

/// Every embedded descriptor stored at `path`
pub fn embedded_descriptors(path: &str) -> impl Iterator<Item = &'static DescriptorResourceEntry> {
    EMBEDDED_DESCRIPTORS
        .iter()
        .filter(move |entry| entry.path == path)
}

/// List all embedded descriptors as `(unit, path)` tuples
pub fn list_embedded_descriptors() -> Vec<(&'static str, &'static str)> {
    EMBEDDED_DESCRIPTORS
        .iter()
        .map(|entry| (entry.unit, entry.path))
        .collect()
}
