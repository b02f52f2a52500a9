//! Core linter engine.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use serde::Serialize;
use tracing::info;

use crate::config::LintConfig;
use crate::document::{DocumentReport, DocumentReportBuilder};
use crate::error::LinterError;
use crate::file_finder::FileFinder;
use crate::parallel_linter::lint_documents;
use crate::source::{FsSourceReader, SourceReader};
use crate::summary::BatchSummary;
use crate::validator::Validator;

/// Everything a lint run produced.
#[derive(Debug, Clone, Serialize)]
pub struct LintOutcome {
    /// One report per linted document, in input order.
    pub reports: Vec<DocumentReport>,
    pub summary: BatchSummary,
}

/// The core linter engine.
///
/// Discovers documents, validates them in parallel and matches the warnings
/// against each document's ignore baseline.
pub struct Linter {
    config: LintConfig,
    validator: Box<dyn Validator>,
    reader: Box<dyn SourceReader>,
    /// Set to stop starting new documents.
    cancelled: Arc<AtomicBool>,
}

impl Linter {
    /// Creates a linter that runs the configured validator command against
    /// the file system.
    pub fn new(config: LintConfig) -> Self {
        let validator = Box::new(config.validator.build());
        Self::with_collaborators(config, validator, Box::new(FsSourceReader))
    }

    pub fn with_collaborators(
        config: LintConfig,
        validator: Box<dyn Validator>,
        reader: Box<dyn SourceReader>,
    ) -> Self {
        Self {
            config,
            validator,
            reader,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn config(&self) -> &LintConfig {
        &self.config
    }

    /// Flag that cancels the run when set. Documents already in progress
    /// still finish.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    /// Resolves files and directories to documents.
    pub fn discover_files<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Vec<PathBuf>, LinterError> {
        let finder = FileFinder::new(&self.config.extensions, &self.config.exclude)?
            .with_base_dir(self.config.base_dir.clone());
        finder.discover_files(paths)
    }

    /// Discovers and lints every document under `paths`.
    pub fn lint_paths<P: AsRef<Path>>(&self, paths: &[P]) -> Result<LintOutcome, LinterError> {
        let files = self.discover_files(paths)?;
        Ok(self.lint_files(&files))
    }

    /// Lints the given documents. A failing document never stops the batch.
    pub fn lint_files(&self, paths: &[PathBuf]) -> LintOutcome {
        let builder =
            DocumentReportBuilder::new(&self.config, self.validator.as_ref(), self.reader.as_ref());

        let (reports, skipped) = lint_documents(paths, &builder, &self.cancelled);

        let mut summary: BatchSummary = reports.iter().sum();
        summary.add_skipped(skipped);

        info!(
            "Linted {} documents: {} reported, {} suppressed",
            summary.documents, summary.tally.reported, summary.tally.suppressed
        );

        LintOutcome { reports, summary }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentStatus;
    use crate::test_utils::{MemorySourceReader, ScriptedValidator, raw_warning};
    use crate::validator::ValidationOutcome;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::Ordering;

    fn linter(config: LintConfig) -> Linter {
        let reader = MemorySourceReader::default()
            .with_document("clean.apib", "# Clean\n")
            .with_document("noisy.apib", "# Noisy\nbody\n")
            .with_ignore_file("noisy.apib.apiblint", "W6:2:2\n");
        let validator = ScriptedValidator::default().on(
            "# Noisy\nbody\n",
            ValidationOutcome::Warnings(vec![
                raw_warning("6", (2, 1), (2, 4)),
                raw_warning("10", (1, 1), (1, 3)),
            ]),
        );
        Linter::with_collaborators(config, Box::new(validator), Box::new(reader))
    }

    fn paths() -> Vec<PathBuf> {
        vec![PathBuf::from("clean.apib"), PathBuf::from("noisy.apib")]
    }

    #[test]
    fn test_lint_files_summarizes_batch() {
        let outcome = linter(LintConfig::new()).lint_files(&paths());

        assert_eq!(outcome.reports.len(), 2);
        assert_eq!(outcome.reports[0].status, DocumentStatus::Clean);
        assert_eq!(outcome.reports[1].status, DocumentStatus::WarningsFound);
        assert_eq!(outcome.summary.tally.reported, 1);
        assert_eq!(outcome.summary.tally.suppressed, 1);
        assert_eq!(outcome.summary.exit_code, 1);
        assert!(!outcome.summary.passed());
    }

    #[test]
    fn test_global_codes_make_batch_pass() {
        let mut config = LintConfig::new();
        config.ignore_codes = vec!["W10".to_string()];
        let outcome = linter(config).lint_files(&paths());

        assert!(outcome.summary.passed());
        assert_eq!(outcome.summary.tally.suppressed, 2);
        assert_eq!(outcome.summary.exit_code, 0);
    }

    #[test]
    fn test_cancel_handle_skips_documents() {
        let linter = linter(LintConfig::new());
        linter.cancel_handle().store(true, Ordering::Relaxed);

        let outcome = linter.lint_files(&paths());
        assert!(outcome.reports.is_empty());
        assert_eq!(outcome.summary.skipped, 2);
        assert!(outcome.summary.passed());
    }

    #[test]
    fn test_lint_paths_missing_path() {
        let result = linter(LintConfig::new()).lint_paths(&["/definitely/not/here"]);
        assert!(matches!(result, Err(LinterError::Config(_))));
    }
}
