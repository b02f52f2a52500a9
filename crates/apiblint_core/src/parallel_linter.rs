//! Parallel document linting logic.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::document::{DocumentReport, DocumentReportBuilder};

/// Reports in input order plus the number of documents skipped by
/// cancellation.
pub type LintDocumentsResult = (Vec<DocumentReport>, usize);

pub fn lint_documents(
    paths: &[PathBuf],
    builder: &DocumentReportBuilder<'_>,
    cancelled: &AtomicBool,
) -> LintDocumentsResult {
    let results: Vec<Option<DocumentReport>> = paths
        .par_iter()
        .map(|path| {
            if cancelled.load(Ordering::Relaxed) {
                debug!("Skipping {} after cancellation", path.display());
                return None;
            }
            Some(builder.build(path))
        })
        .collect();

    let mut reports = Vec::with_capacity(results.len());
    let mut skipped = 0;
    for result in results {
        match result {
            Some(report) => {
                if report.status.is_failure() {
                    warn!("Failed to lint {}: {:?}", report.path.display(), report.status);
                }
                reports.push(report);
            }
            None => skipped += 1,
        }
    }

    (reports, skipped)
}
