//! Domain layer constants
//!
//! Descriptor file layout and the naming convention used to rank candidates.

// ============================================================================
// DESCRIPTOR CONSTANTS
// ============================================================================

/// Namespace directory holding one descriptor file per capability
pub const SERVICES_PATH: &str = "META-INF/services";

/// Start of a line comment inside a descriptor file
pub const DESCRIPTOR_COMMENT: char = '#';

// ============================================================================
// IDENTIFIER CONSTANTS
// ============================================================================

/// Separator between namespace segments in a canonical identifier
pub const NAMESPACE_SEPARATOR: char = '.';

/// Separator between an enclosing type and the type it encloses
pub const NESTED_TYPE_SEPARATOR: char = '$';

/// Rust path separator, normalised to [`NAMESPACE_SEPARATOR`]
pub const RUST_PATH_SEPARATOR: &str = "::";

// ============================================================================
// PREFERENCE CONSTANTS
// ============================================================================

/// Implementations whose identifier contains this marker (any case) are
/// only chosen when nothing else is available
pub const FALLBACK_MARKER: &str = "default";

// ============================================================================
// WELL-KNOWN CAPABILITIES
// ============================================================================

/// Identifier of the backend capability (`dyn LookupProvider`)
pub const LOOKUP_PROVIDER_CAPABILITY: &str = "lookup.LookupProvider";

/// Other paths that reach the backend capability through re-exports
pub const LOOKUP_PROVIDER_ALIASES: &[&str] = &[
    "lookup.domain.LookupProvider",
    "lookup.domain.ports.LookupProvider",
    "lookup.domain.ports.lookup_provider.LookupProvider",
    "lookup_domain.LookupProvider",
    "lookup_domain.ports.LookupProvider",
    "lookup_domain.ports.lookup_provider.LookupProvider",
];
