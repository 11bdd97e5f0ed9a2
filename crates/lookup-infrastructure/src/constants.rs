//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Descriptor layout constants are defined in `lookup_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "lookup.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "lookup";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "LOOKUP";

/// Separator between nested keys in environment variable names
/// (e.g. `LOOKUP_REGISTRY__OVERRIDE_NAME`)
pub const CONFIG_ENV_NESTING: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable holding a tracing filter directive
pub const LOG_FILTER_ENV: &str = "LOOKUP_LOG";

/// File name stem used when logging to a directory
pub const DEFAULT_LOG_FILE_STEM: &str = "lookup";

// ============================================================================
// MANIFEST CONSTANTS
// ============================================================================

/// Name of the built-in manifest backend
pub const MANIFEST_BACKEND_NAME: &str = "manifest";

/// Name of the filesystem resource source
pub const FILESYSTEM_SOURCE_NAME: &str = "filesystem";

/// Name of the embedded resource source
pub const EMBEDDED_SOURCE_NAME: &str = "embedded";
