//! Two-phase descriptor generation
//!
//! Phase one runs once per round and collects validated declarations into a
//! shared accumulator. Phase two, [`ServiceProviderGenerator::finish`], runs
//! exactly once and merges every capability into its descriptor file.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use tracing::{info, warn};

use crate::collector::DescriptorCollector;
use crate::diagnostics::Diagnostic;
use crate::error::Result;
use crate::hierarchy::SubtypeIndex;
use crate::merger::{DescriptorMerger, MergeOutcome};
use crate::scan::{ScanOutput, SourceScanner};

/// What a generation run produced
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationReport {
    /// One entry per collected capability
    pub descriptors: Vec<MergeOutcome>,
    /// Everything reported while processing rounds
    pub diagnostics: Vec<Diagnostic>,
}

impl GenerationReport {
    /// Descriptors written by this run
    pub fn written(&self) -> impl Iterator<Item = &Path> {
        self.descriptors
            .iter()
            .filter(|outcome| outcome.is_written())
            .map(MergeOutcome::path)
    }

    /// Number of error and fatal diagnostics
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    /// True if any declaration was rejected or a round failed
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}

/// Collects declarations round by round, then writes descriptors
#[derive(Debug)]
pub struct ServiceProviderGenerator {
    collector: DescriptorCollector,
    merger: DescriptorMerger,
    hierarchy: Mutex<SubtypeIndex>,
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl ServiceProviderGenerator {
    /// Generator writing descriptors below `out_dir`
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            collector: DescriptorCollector::new(),
            merger: DescriptorMerger::new(out_dir),
            hierarchy: Mutex::new(SubtypeIndex::new()),
            diagnostics: Mutex::new(Vec::new()),
        }
    }

    /// Process one round of declarations
    ///
    /// Subtype relations accumulate across rounds. A rejected declaration
    /// is reported and the rest of the round continues.
    pub fn process_round(&self, round: &ScanOutput) {
        let mut diagnostics = round.diagnostics.clone();
        {
            let mut hierarchy = self.hierarchy.lock().unwrap_or_else(PoisonError::into_inner);
            hierarchy.extend(round.hierarchy.clone());
            for declaration in &round.declarations {
                if let Err(diagnostic) = self.collector.collect(declaration, &*hierarchy) {
                    diagnostics.push(diagnostic);
                }
            }
        }

        for diagnostic in &diagnostics {
            if diagnostic.is_error() {
                warn!(%diagnostic, "Rejected service provider declaration");
            } else {
                warn!(%diagnostic, "Ignored service provider declaration");
            }
        }
        self.report(diagnostics);
    }

    /// Scan `crate_dir` and process it as one round
    ///
    /// A failed scan is recorded as a fatal diagnostic; returns false in
    /// that case.
    pub fn process_crate(&self, scanner: &SourceScanner, crate_dir: &Path) -> bool {
        match scanner.scan_crate(crate_dir) {
            Ok(round) => {
                self.process_round(&round);
                true
            }
            Err(e) => {
                let diagnostic = Diagnostic::fatal(&e);
                warn!(%diagnostic, "Round failed");
                self.report(vec![diagnostic]);
                false
            }
        }
    }

    /// Diagnostics reported so far
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Merge every collected capability into its descriptor
    ///
    /// Unchanged descriptors are skipped individually. The first write
    /// failure aborts the whole step.
    pub fn finish(self) -> Result<GenerationReport> {
        let collected = self.collector.snapshot();
        let mut descriptors = Vec::with_capacity(collected.len());
        for (capability, implementations) in &collected {
            descriptors.push(self.merger.merge(capability, implementations)?);
        }

        let report = GenerationReport {
            descriptors,
            diagnostics: self
                .diagnostics
                .into_inner()
                .unwrap_or_else(PoisonError::into_inner),
        };
        info!(
            capabilities = collected.len(),
            written = report.written().count(),
            errors = report.error_count(),
            "Descriptor generation finished"
        );
        Ok(report)
    }

    fn report(&self, diagnostics: Vec<Diagnostic>) {
        if diagnostics.is_empty() {
            return;
        }
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(diagnostics);
    }
}

/// Scan one crate and write its descriptors below `out_dir`
pub fn generate_crate(
    scanner: &SourceScanner,
    crate_dir: &Path,
    out_dir: &Path,
) -> Result<GenerationReport> {
    let generator = ServiceProviderGenerator::new(out_dir);
    generator.process_crate(scanner, crate_dir);
    generator.finish()
}
