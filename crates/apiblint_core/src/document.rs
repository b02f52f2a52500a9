//! Single document linting.

use std::collections::HashSet;
use std::ops::{Add, AddAssign};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::baseline::IgnoreBaseline;
use crate::config::LintConfig;
use crate::error::LinterError;
use crate::excerpt::{Excerpt, ExcerptRenderer};
use crate::source::{SourceReader, split_lines};
use crate::suppression::{SuppressionMatcher, SuppressionReason};
use crate::validator::{ValidationOutcome, Validator, ValidatorOptions};
use crate::warning::{RawWarning, Warning};

/// Reported and suppressed warning counts for one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DocumentTally {
    pub reported: usize,
    pub suppressed: usize,
}

impl Add for DocumentTally {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            reported: self.reported + other.reported,
            suppressed: self.suppressed + other.suppressed,
        }
    }
}

impl AddAssign for DocumentTally {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

/// Final state of a document. Every document ends in exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "camelCase")]
pub enum DocumentStatus {
    /// No warnings, or every warning suppressed.
    Clean,
    /// At least one warning reported.
    WarningsFound,
    /// The validator itself failed.
    ValidatorError(String),
    /// The validator output was neither a success nor a parse result.
    UnrecognizedResult(String),
    /// Any other failure: unreadable file, bad position, corrupt ignore file.
    Failed(String),
}

impl DocumentStatus {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Clean => 0,
            Self::WarningsFound => 1,
            Self::ValidatorError(_) | Self::Failed(_) => 2,
            Self::UnrecognizedResult(_) => 3,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::ValidatorError(_) | Self::UnrecognizedResult(_) | Self::Failed(_)
        )
    }

    fn from_error(error: &LinterError) -> Self {
        match error {
            LinterError::Validator(message) => Self::ValidatorError(message.clone()),
            LinterError::UnrecognizedResult(message) => Self::UnrecognizedResult(message.clone()),
            other => Self::Failed(other.to_string()),
        }
    }
}

/// What happened to one warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "disposition", rename_all = "camelCase")]
pub enum Disposition {
    Suppressed { reason: SuppressionReason },
    Reported { excerpt: Excerpt },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WarningReport {
    pub warning: Warning,
    #[serde(flatten)]
    pub disposition: Disposition,
}

impl WarningReport {
    pub fn is_suppressed(&self) -> bool {
        matches!(self.disposition, Disposition::Suppressed { .. })
    }
}

/// Buffered result of linting one document, emitted as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentReport {
    pub path: PathBuf,
    pub ignore_file: PathBuf,
    #[serde(flatten)]
    pub status: DocumentStatus,
    pub tally: DocumentTally,
    /// Warnings in validator order.
    pub warnings: Vec<WarningReport>,
}

impl DocumentReport {
    fn empty(path: &Path, ignore_file: PathBuf, status: DocumentStatus) -> Self {
        Self {
            path: path.to_path_buf(),
            ignore_file,
            status,
            tally: DocumentTally::default(),
            warnings: Vec::new(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.status.exit_code()
    }
}

/// Lints one document at a time against injected collaborators.
pub struct DocumentReportBuilder<'a> {
    config: &'a LintConfig,
    validator: &'a dyn Validator,
    reader: &'a dyn SourceReader,
    validator_options: ValidatorOptions,
    global_codes: HashSet<String>,
}

impl<'a> DocumentReportBuilder<'a> {
    pub fn new(
        config: &'a LintConfig,
        validator: &'a dyn Validator,
        reader: &'a dyn SourceReader,
    ) -> Self {
        Self {
            config,
            validator,
            reader,
            validator_options: config.validator.options(),
            global_codes: config.global_ignore_codes(),
        }
    }

    /// Reads, validates and reports `path`. Errors end up in the status.
    pub fn build(&self, path: &Path) -> DocumentReport {
        let ignore_file = self.config.ignore_file_for(path);
        debug!("Linting {}", path.display());

        let result = self
            .reader
            .read_document(path)
            .and_then(|text| self.validate_and_report(path, &text));

        match result {
            Ok(report) => report,
            Err(error) => {
                debug!("Linting {} failed: {}", path.display(), error);
                DocumentReport::empty(path, ignore_file, DocumentStatus::from_error(&error))
            }
        }
    }

    fn validate_and_report(&self, path: &Path, text: &str) -> Result<DocumentReport, LinterError> {
        let outcome = self.validator.validate(text, &self.validator_options)?;
        self.report(path, text, outcome)
    }

    /// Builds the report for a document whose validator outcome is known.
    pub fn report(
        &self,
        path: &Path,
        text: &str,
        outcome: ValidationOutcome,
    ) -> Result<DocumentReport, LinterError> {
        let ignore_file = self.config.ignore_file_for(path);

        let raw_warnings = match outcome {
            ValidationOutcome::Clean => Vec::new(),
            ValidationOutcome::Warnings(raw) => raw,
            ValidationOutcome::Unrecognized(message) => {
                return Err(LinterError::UnrecognizedResult(message));
            }
        };

        if raw_warnings.is_empty() {
            return Ok(DocumentReport::empty(
                path,
                ignore_file,
                DocumentStatus::Clean,
            ));
        }

        let warnings = normalize(&raw_warnings)?;
        let baseline = self.load_baseline(&ignore_file, &warnings)?;

        let lines = split_lines(text);
        let renderer = ExcerptRenderer::new(&lines, self.config.context_lines);
        let matcher = SuppressionMatcher::new(
            &baseline,
            self.config.fuzzy_line_range,
            &self.global_codes,
        );

        let mut tally = DocumentTally::default();
        let mut reports = Vec::with_capacity(warnings.len());
        for warning in warnings {
            let disposition = match matcher.reason(&warning) {
                Some(reason) => {
                    tally.suppressed += 1;
                    Disposition::Suppressed { reason }
                }
                None => {
                    let excerpt = renderer.render(&warning)?;
                    tally.reported += 1;
                    Disposition::Reported { excerpt }
                }
            };
            reports.push(WarningReport {
                warning,
                disposition,
            });
        }

        let status = if tally.reported > 0 {
            DocumentStatus::WarningsFound
        } else {
            DocumentStatus::Clean
        };

        Ok(DocumentReport {
            path: path.to_path_buf(),
            ignore_file,
            status,
            tally,
            warnings: reports,
        })
    }

    fn load_baseline(
        &self,
        ignore_file: &Path,
        warnings: &[Warning],
    ) -> Result<IgnoreBaseline, LinterError> {
        if self.config.update_baseline {
            let baseline = IgnoreBaseline::from_warnings(warnings);
            self.reader
                .write_ignore_file(ignore_file, &baseline.to_file_contents())?;
            info!(
                "Recorded {} warnings in {}",
                baseline.len(),
                ignore_file.display()
            );
            return Ok(baseline);
        }

        let content = self.reader.read_ignore_file(ignore_file)?;
        if content.is_none() {
            debug!("No ignore file at {}", ignore_file.display());
        }
        IgnoreBaseline::parse_optional(content.as_deref())
    }
}

/// Normalizes every raw warning; one bad position fails the document.
fn normalize(raw_warnings: &[RawWarning]) -> Result<Vec<Warning>, LinterError> {
    raw_warnings.iter().map(Warning::from_raw).collect()
}
