//! Generator error types

use std::path::PathBuf;

use thiserror::Error;

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that stop descriptor generation
#[derive(Error, Debug)]
pub enum CodegenError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error in {}: {message}", .file.display())]
    Parse { file: PathBuf, message: String },

    #[error("Invalid crate manifest {}: {message}", .path.display())]
    Manifest { path: PathBuf, message: String },

    #[error("Environment variable {name} is not set: {source}")]
    Environment {
        name: &'static str,
        #[source]
        source: std::env::VarError,
    },

    #[error("Unable to write descriptor {}: {source}", .path.display())]
    DescriptorWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to write descriptor index {}: {source}", .path.display())]
    IndexWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{count} service provider declaration(s) rejected")]
    Rejected { count: usize },
}
