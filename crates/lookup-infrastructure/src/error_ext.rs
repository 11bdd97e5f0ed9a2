//! Error context helpers
//!
//! Turn foreign errors (I/O, figment, toml) into the domain [`Error`] with a
//! message saying what was being attempted.

use std::fmt;
use std::path::Path;

use lookup_domain::error::{Error, Result};

type Cause = Box<dyn std::error::Error + Send + Sync>;

/// Extension trait for adding context to errors
///
/// ```ignore
/// use lookup_infrastructure::error_ext::ErrorContext;
///
/// let contents = std::fs::read_to_string(&path).descriptor_context(&path)?;
/// let config = figment.extract().config_context("Failed to extract configuration")?;
/// ```
pub trait ErrorContext<T>: Sized {
    /// Wrap the error as [`Error::Io`], keeping it as the source
    fn io_context<C: fmt::Display>(self, context: C) -> Result<T>;

    /// Wrap the error as [`Error::Configuration`], keeping it as the source
    fn config_context<C: fmt::Display>(self, context: C) -> Result<T>;

    /// A descriptor resource at `path` could not be read
    fn descriptor_context(self, path: &Path) -> Result<T> {
        self.io_context(format_args!("Failed to read descriptor {}", path.display()))
    }
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn io_context<C: fmt::Display>(self, context: C) -> Result<T> {
        wrap(self, context, |message, source| Error::Io {
            message,
            source: Some(source),
        })
    }

    fn config_context<C: fmt::Display>(self, context: C) -> Result<T> {
        wrap(self, context, |message, source| Error::Configuration {
            message,
            source: Some(source),
        })
    }
}

fn wrap<T, E, C>(
    result: std::result::Result<T, E>,
    context: C,
    into: impl FnOnce(String, Cause) -> Error,
) -> Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
    C: fmt::Display,
{
    result.map_err(|err| into(format!("{context}: {err}"), Box::new(err)))
}
