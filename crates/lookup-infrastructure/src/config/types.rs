//! Configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_LOG_LEVEL;

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Registry construction
    pub registry: RegistryConfig,
    /// Manifest backend
    pub manifest: ManifestConfig,
    /// Logging
    pub logging: LoggingConfig,
}

/// Registry construction settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Name of a registered registry override to build instead of the
    /// default registry. Empty or unknown names are ignored.
    pub override_name: Option<String>,
}

impl RegistryConfig {
    /// The override name, if set to something non-blank
    pub fn override_name(&self) -> Option<&str> {
        self.override_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// Manifest backend settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestConfig {
    /// Directories searched, in order, for `META-INF/services/<capability>`
    pub search_path: Vec<PathBuf>,
    /// Also read descriptors embedded in the binary
    pub embedded: bool,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            search_path: Vec::new(),
            embedded: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON output format
    pub json_format: bool,

    /// Log to file in addition to stderr
    pub file_output: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
            file_output: None,
        }
    }
}
