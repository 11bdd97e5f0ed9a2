//! Service descriptor generator
//!
//! Build-time half of Lookup: finds types marked `#[service_provider]`,
//! checks that each one implements the capability it declares, and merges
//! the results into `META-INF/services/<capability>` descriptor files read
//! by the manifest backend at runtime.
//!
//! ```text
//! SourceScanner ──► ServiceProviderGenerator::process_round  (per round)
//!                          │ DescriptorCollector (validated, accumulated)
//!                          ▼
//!                   ServiceProviderGenerator::finish         (once)
//!                          │ DescriptorMerger (union, skip if unchanged)
//!                          ▼
//!                   OUT/META-INF/services/*  ──► EmbedIndex
//! ```

pub mod build;
pub mod collector;
pub mod diagnostics;
pub mod embed;
pub mod error;
pub mod generator;
pub mod hierarchy;
pub mod merger;
pub mod model;
pub mod scan;

pub use collector::DescriptorCollector;
pub use diagnostics::{Diagnostic, Severity};
pub use embed::EmbedIndex;
pub use error::{CodegenError, Result};
pub use generator::{GenerationReport, ServiceProviderGenerator, generate_crate};
pub use hierarchy::{SubtypeIndex, TypeHierarchy};
pub use merger::{DescriptorMerger, MergeOutcome};
pub use model::{ProviderDeclaration, SourceLocation, TypeElement};
pub use scan::{ScanOutput, SourceScanner};
