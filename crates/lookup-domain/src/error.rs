//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the lookup system
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (simple form)
    #[error("I/O error: {source}")]
    IoSimple {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },

    /// I/O operation error (with context)
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// No factory is registered under the requested identifiers
    #[error("Unknown implementation '{implementation}' for capability '{capability}'")]
    UnknownImplementation {
        /// Capability the implementation was requested for
        capability: String,
        /// Implementation identifier that has no factory
        implementation: String,
    },

    /// A registered factory failed or produced an instance of the wrong type
    #[error("Failed to instantiate '{implementation}': {message}")]
    Instantiation {
        /// Implementation identifier
        implementation: String,
        /// Description of the failure
        message: String,
    },

    /// The caller-nominated fallback implementation could not be constructed
    #[error("Failed to construct fallback '{fallback}' for capability '{capability}': {source}")]
    FallbackConstruction {
        /// Capability that had no discovered implementation
        capability: String,
        /// Fallback the caller nominated
        fallback: String,
        /// Underlying cause
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

// Basic error creation methods
impl Error {
    /// Create an unknown implementation error
    pub fn unknown_implementation<C: Into<String>, I: Into<String>>(
        capability: C,
        implementation: I,
    ) -> Self {
        Self::UnknownImplementation {
            capability: capability.into(),
            implementation: implementation.into(),
        }
    }

    /// Create an instantiation error
    pub fn instantiation<I: Into<String>, S: Into<String>>(implementation: I, message: S) -> Self {
        Self::Instantiation {
            implementation: implementation.into(),
            message: message.into(),
        }
    }
}

// I/O error creation methods
impl Error {
    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Lookup error creation methods
impl Error {
    /// Wrap the reason a caller-nominated fallback could not be built
    pub fn fallback_construction<C, F, E>(capability: C, fallback: F, source: E) -> Self
    where
        C: Into<String>,
        F: Into<String>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::FallbackConstruction {
            capability: capability.into(),
            fallback: fallback.into(),
            source: source.into(),
        }
    }

    /// True when the error means "nothing registered under that name"
    pub fn is_unknown_implementation(&self) -> bool {
        matches!(self, Self::UnknownImplementation { .. })
    }
}
