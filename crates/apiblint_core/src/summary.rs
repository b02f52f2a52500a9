//! Batch totals.

use std::iter::Sum;

use serde::Serialize;

use crate::document::{DocumentReport, DocumentTally};

/// Totals over every document of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub tally: DocumentTally,
    /// Documents processed, failed ones included.
    pub documents: usize,
    /// Documents with at least one reported warning.
    pub documents_with_reports: usize,
    pub failed: usize,
    /// Documents never started because the run was cancelled.
    pub skipped: usize,
    /// Highest per-document exit code.
    pub exit_code: u8,
}

impl BatchSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Summary of a single document.
    pub fn of(report: &DocumentReport) -> Self {
        Self {
            tally: report.tally,
            documents: 1,
            documents_with_reports: usize::from(report.tally.reported > 0),
            failed: usize::from(report.status.is_failure()),
            skipped: 0,
            exit_code: report.exit_code(),
        }
    }

    pub fn add(&mut self, report: &DocumentReport) {
        *self = self.merge(Self::of(report));
    }

    pub fn add_skipped(&mut self, count: usize) {
        self.skipped += count;
    }

    /// Combines two summaries. Commutative and associative.
    pub fn merge(self, other: Self) -> Self {
        Self {
            tally: self.tally + other.tally,
            documents: self.documents + other.documents,
            documents_with_reports: self.documents_with_reports + other.documents_with_reports,
            failed: self.failed + other.failed,
            skipped: self.skipped + other.skipped,
            exit_code: self.exit_code.max(other.exit_code),
        }
    }

    /// False when anything was reported or any document failed.
    pub fn passed(&self) -> bool {
        self.tally.reported == 0 && self.failed == 0
    }
}

impl Sum for BatchSummary {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::new(), Self::merge)
    }
}

impl<'a> Sum<&'a DocumentReport> for BatchSummary {
    fn sum<I: Iterator<Item = &'a DocumentReport>>(iter: I) -> Self {
        iter.map(Self::of).sum()
    }
}
