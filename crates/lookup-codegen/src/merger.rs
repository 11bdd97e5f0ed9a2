//! Descriptor merger
//!
//! Unions newly collected identifiers into the descriptor already present in
//! the output directory. Entries are never removed, and a descriptor that
//! already lists everything is left untouched.

use std::path::{Path, PathBuf};

use lookup_domain::value_objects::{CapabilityId, DescriptorFile};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{CodegenError, Result};

/// Result of merging one capability
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum MergeOutcome {
    /// The descriptor already contained every identifier
    Unchanged { path: PathBuf },
    /// The descriptor was (re)written
    Written { path: PathBuf, added: usize },
}

impl MergeOutcome {
    /// Descriptor path
    pub fn path(&self) -> &Path {
        match self {
            Self::Unchanged { path } | Self::Written { path, .. } => path,
        }
    }

    /// True if the file was written
    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written { .. })
    }
}

/// Writes descriptor files below an output directory
#[derive(Debug, Clone)]
pub struct DescriptorMerger {
    out_dir: PathBuf,
}

impl DescriptorMerger {
    /// Merge into descriptors below `out_dir`
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// Output directory
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Descriptor path for `capability`
    pub fn descriptor_path(&self, capability: &str) -> PathBuf {
        self.out_dir
            .join(CapabilityId::new(capability).descriptor_path())
    }

    /// Descriptor currently on disk; missing or unreadable means empty
    pub fn existing(&self, capability: &str) -> DescriptorFile {
        let path = self.descriptor_path(capability);
        match std::fs::read_to_string(&path) {
            Ok(content) => DescriptorFile::parse(&content),
            Err(e) => {
                debug!(
                    path = %path.display(),
                    error = %e,
                    "No readable descriptor, starting empty"
                );
                DescriptorFile::new()
            }
        }
    }

    /// Union `collected` into the descriptor for `capability`
    pub fn merge<S: AsRef<str>>(&self, capability: &str, collected: &[S]) -> Result<MergeOutcome> {
        let path = self.descriptor_path(capability);
        let existing = self.existing(capability);

        let Some(merged) = existing.union(collected) else {
            debug!(path = %path.display(), "Descriptor up to date");
            return Ok(MergeOutcome::Unchanged { path });
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| CodegenError::DescriptorWrite {
                path: path.clone(),
                source,
            })?;
        }
        std::fs::write(&path, merged.render()).map_err(|source| CodegenError::DescriptorWrite {
            path: path.clone(),
            source,
        })?;

        let added = merged.len() - existing.len();
        info!(path = %path.display(), added, total = merged.len(), "Wrote descriptor");
        Ok(MergeOutcome::Written { path, added })
    }
}
