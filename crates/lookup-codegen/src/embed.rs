//! Embedded descriptor index
//!
//! Emits Rust source registering every descriptor of an output directory
//! in the `EMBEDDED_DESCRIPTORS` table, for inclusion from the crate that
//! owns them:
//!
//! ```ignore
//! include!(concat!(env!("OUT_DIR"), "/lookup_descriptors.rs"));
//! ```

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use lookup_domain::constants::SERVICES_PATH;
use walkdir::WalkDir;

use crate::error::{CodegenError, Result};

/// File name of the generated index
pub const INDEX_FILE_NAME: &str = "lookup_descriptors.rs";

/// Path of the crate re-exporting `linkme` and the registration tables
pub const DEFAULT_CRATE_PATH: &str = "::lookup";

/// Generator of the embedded descriptor index
#[derive(Debug, Clone)]
pub struct EmbedIndex {
    unit: String,
    crate_path: String,
}

impl EmbedIndex {
    /// Index for descriptors contributed by `unit`
    pub fn new(unit: impl Into<String>) -> Self {
        Self {
            unit: unit.into(),
            crate_path: DEFAULT_CRATE_PATH.to_string(),
        }
    }

    /// Refer to the facade crate through `path` instead of `::lookup`
    #[must_use]
    pub fn with_crate_path(mut self, path: impl Into<String>) -> Self {
        self.crate_path = path.into();
        self
    }

    /// Descriptor files below `out_dir`, sorted
    pub fn descriptors(out_dir: &Path) -> Vec<PathBuf> {
        let services = out_dir.join(SERVICES_PATH);
        WalkDir::new(&services)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .map(walkdir::DirEntry::into_path)
            .collect()
    }

    /// Render the index source
    pub fn render(&self, out_dir: &Path) -> String {
        let krate = &self.crate_path;
        let mut source = String::from("// @generated by lookup-codegen. Do not edit.\n");

        for (index, path) in Self::descriptors(out_dir).iter().enumerate() {
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let relative = format!("{SERVICES_PATH}/{name}");
            let absolute = path.display().to_string();
            let _ = write!(
                source,
                "\n#[{krate}::linkme::distributed_slice({krate}::registry::EMBEDDED_DESCRIPTORS)]\n\
                 #[linkme(crate = {krate}::linkme)]\n\
                 static LOOKUP_DESCRIPTOR_{index}: {krate}::registry::DescriptorResourceEntry =\n    \
                 {krate}::registry::DescriptorResourceEntry {{\n        \
                 unit: {unit:?},\n        \
                 path: {relative:?},\n        \
                 contents: include_str!({absolute:?}),\n    \
                 }};\n",
                unit = self.unit,
            );
        }
        source
    }

    /// Write the index into `out_dir`
    pub fn write(&self, out_dir: &Path) -> Result<PathBuf> {
        let path = out_dir.join(INDEX_FILE_NAME);
        std::fs::write(&path, self.render(out_dir)).map_err(|source| CodegenError::IndexWrite {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}
