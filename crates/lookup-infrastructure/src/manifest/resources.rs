//! Descriptor resource sources

use std::path::PathBuf;

use lookup_application::ports::registry::embedded_descriptors;
use lookup_domain::error::Result;
use lookup_domain::ports::{Resource, ResourceSource};

use crate::constants::{EMBEDDED_SOURCE_NAME, FILESYSTEM_SOURCE_NAME};
use crate::error_ext::ErrorContext;

/// Descriptor files below an ordered list of root directories
#[derive(Debug, Clone, Default)]
pub struct FileSystemResources {
    roots: Vec<PathBuf>,
}

impl FileSystemResources {
    /// Search `roots` in order
    pub fn new(roots: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    /// The search roots
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }
}

impl ResourceSource for FileSystemResources {
    fn name(&self) -> &str {
        FILESYSTEM_SOURCE_NAME
    }

    fn resources(&self, relative_path: &str) -> Vec<Result<Resource>> {
        self.roots
            .iter()
            .map(|root| root.join(relative_path))
            .filter(|path| path.is_file())
            .map(|path| -> Result<Resource> {
                let contents = std::fs::read_to_string(&path).descriptor_context(&path)?;
                Ok(Resource::new(path.display().to_string(), contents))
            })
            .collect()
    }
}

/// Descriptor files compiled into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedResources;

impl ResourceSource for EmbeddedResources {
    fn name(&self) -> &str {
        EMBEDDED_SOURCE_NAME
    }

    fn resources(&self, relative_path: &str) -> Vec<Result<Resource>> {
        embedded_descriptors(relative_path)
            .map(|entry| Ok(Resource::new(entry.unit, entry.contents)))
            .collect()
    }
}
