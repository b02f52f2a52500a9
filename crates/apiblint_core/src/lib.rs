//! # apiblint_core
//!
//! Core engine for apiblint, a linter for API Blueprint documents.
//!
//! This crate provides:
//! - Normalization of validator warnings into single spans
//! - Ignore baseline files and fuzzy suppression
//! - Highlighted excerpts for reported warnings
//! - The parallel `Linter` orchestrator
//!
//! ## Example
//!
//! ```rust,ignore
//! use apiblint_core::{LintConfig, Linter};
//!
//! let config = LintConfig::from_file(".apiblintrc.json")?;
//! let linter = Linter::new(config);
//!
//! let outcome = linter.lint_paths(&["docs/"])?;
//! for report in &outcome.reports {
//!     println!("{}: {} reported", report.path.display(), report.tally.reported);
//! }
//! ```

pub mod baseline;
mod config;
pub mod document;
mod error;
pub mod excerpt;
pub mod file_finder;
mod linter;
mod parallel_linter;
pub mod source;
pub mod summary;
pub mod suppression;
pub mod validator;
pub mod warning;

pub use baseline::{IgnoreBaseline, IgnoreEntry, IgnoreRecord};
pub use config::{CONFIG_FILE_NAMES, LintConfig, ValidatorConfig};
pub use document::{
    Disposition, DocumentReport, DocumentReportBuilder, DocumentStatus, DocumentTally,
    WarningReport,
};
pub use error::LinterError;
pub use excerpt::{Excerpt, ExcerptLine, ExcerptRenderer, LineKind, Segment};
pub use linter::{LintOutcome, Linter};
pub use source::{FsSourceReader, SourceReader};
pub use summary::BatchSummary;
pub use suppression::{SuppressionMatcher, SuppressionReason};
pub use validator::{CommandValidator, ValidationOutcome, Validator, ValidatorOptions};
pub use warning::{RawPosition, RawSegment, RawWarning, Warning};

#[cfg(test)]
pub mod test_utils;
