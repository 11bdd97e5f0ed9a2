//! Declarations discovered in source
//!
//! A [`TypeElement`] is a named type together with what encloses it. Its
//! binary name joins the namespace with `.` and each enclosing element with
//! `$`, so `app.Outer$Inner` names `Inner` declared inside `Outer`.

use std::fmt;
use std::path::PathBuf;

use lookup_domain::constants::{NAMESPACE_SEPARATOR, NESTED_TYPE_SEPARATOR};
use serde::Serialize;

/// What a [`TypeElement`] is declared in
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Enclosing {
    /// A top-level declaration in a namespace (module path segments)
    Namespace(Vec<String>),
    /// A declaration nested inside another element
    Element(Box<TypeElement>),
}

/// A named type declaration
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeElement {
    name: String,
    enclosing: Enclosing,
}

impl TypeElement {
    /// A top-level element in `namespace`
    pub fn top_level<S: Into<String>>(namespace: Vec<String>, name: S) -> Self {
        Self {
            name: name.into(),
            enclosing: Enclosing::Namespace(namespace),
        }
    }

    /// An element declared inside `outer`
    pub fn nested<S: Into<String>>(outer: TypeElement, name: S) -> Self {
        Self {
            name: name.into(),
            enclosing: Enclosing::Element(Box::new(outer)),
        }
    }

    /// Simple name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The enclosing namespace or element
    pub fn enclosing(&self) -> &Enclosing {
        &self.enclosing
    }

    /// Canonical identifier, as written in descriptor files
    pub fn binary_name(&self) -> String {
        match &self.enclosing {
            Enclosing::Namespace(namespace) if namespace.is_empty() => self.name.clone(),
            Enclosing::Namespace(namespace) => {
                let separator = NAMESPACE_SEPARATOR.to_string();
                let mut out = namespace.join(separator.as_str());
                out.push(NAMESPACE_SEPARATOR);
                out.push_str(&self.name);
                out
            }
            Enclosing::Element(outer) => {
                let mut out = outer.binary_name();
                out.push(NESTED_TYPE_SEPARATOR);
                out.push_str(&self.name);
                out
            }
        }
    }
}

impl fmt::Display for TypeElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.binary_name())
    }
}

/// Position of a declaration in a source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    /// Source file
    pub file: PathBuf,
    /// 1-based line
    pub line: usize,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file.display(), self.line)
    }
}

/// A declaration carrying the `#[service_provider]` marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderDeclaration {
    /// The annotated type
    pub implementer: TypeElement,
    /// Capability named by the marker; `None` means the implementer is its
    /// own capability
    pub capability: Option<TypeElement>,
    /// Where the marker was found
    pub location: SourceLocation,
}

impl ProviderDeclaration {
    /// The capability this declaration registers under
    pub fn effective_capability(&self) -> &TypeElement {
        self.capability.as_ref().unwrap_or(&self.implementer)
    }
}
