//! `build.rs` integration
//!
//! ```ignore
//! // build.rs
//! fn main() {
//!     lookup_codegen::build::generate_for_build().expect("descriptor generation failed");
//! }
//! ```
//!
//! Descriptors land in `OUT_DIR/META-INF/services`, and `OUT_DIR/lookup_descriptors.rs`
//! embeds them into the crate.

use std::path::PathBuf;

use crate::embed::EmbedIndex;
use crate::error::{CodegenError, Result};
use crate::generator::{GenerationReport, generate_crate};
use crate::scan::SourceScanner;

/// Generate descriptors for the crate being built
///
/// Diagnostics are surfaced as `cargo:warning` lines. Rejected declarations
/// fail the build after every descriptor has been written.
pub fn generate_for_build() -> Result<GenerationReport> {
    let manifest_dir = env_path("CARGO_MANIFEST_DIR")?;
    let out_dir = env_path("OUT_DIR")?;
    println!("cargo:rerun-if-changed={}", manifest_dir.join("src").display());
    println!("cargo:rerun-if-changed={}", manifest_dir.join("Cargo.toml").display());

    let scanner = SourceScanner::for_crate(&manifest_dir)?;
    let report = generate_crate(&scanner, &manifest_dir, &out_dir)?;
    for diagnostic in &report.diagnostics {
        println!("cargo:warning={}", diagnostic.to_string().replace('\n', " | "));
    }

    EmbedIndex::new(scanner.crate_name()).write(&out_dir)?;

    if report.has_errors() {
        return Err(CodegenError::Rejected {
            count: report.error_count(),
        });
    }
    Ok(report)
}

fn env_path(name: &'static str) -> Result<PathBuf> {
    std::env::var(name)
        .map(PathBuf::from)
        .map_err(|source| CodegenError::Environment { name, source })
}
