//! Ignore baseline parsing and writing.
//!
//! An ignore file sits next to its document (`doc.apib.apiblint`) and holds
//! one record per line:
//!
//! ```text
//! W10:34:35
//! W6:45:45
//! ```
//!
//! Line numbers are 1-based and inclusive on disk and 0-based in memory.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::error::LinterError;
use crate::source::split_lines;
use crate::warning::Warning;

/// Separator between the fields of an ignore record.
pub const RECORD_SEPARATOR: char = ':';

/// A previously recorded warning span (0-based lines).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IgnoreEntry {
    pub start_line: usize,
    pub end_line: usize,
}

/// One on-disk ignore record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreRecord {
    pub code: String,
    pub entry: IgnoreEntry,
}

impl IgnoreRecord {
    pub fn for_warning(warning: &Warning) -> Self {
        Self {
            code: warning.code.clone(),
            entry: IgnoreEntry {
                start_line: warning.start_line,
                end_line: warning.end_line,
            },
        }
    }

    /// Parses a single non-blank record. `line_number` is 1-based and only
    /// used for error reporting.
    pub fn parse(line: &str, line_number: usize) -> Result<Self, LinterError> {
        let malformed = || LinterError::MalformedIgnoreLine {
            line_number,
            line: line.to_string(),
        };

        let fields: Vec<&str> = line.trim().split(RECORD_SEPARATOR).collect();
        let [code, start, end] = fields.as_slice() else {
            return Err(malformed());
        };

        let code = code.trim();
        if code.is_empty() {
            return Err(malformed());
        }

        let start_line = parse_line_number(start).ok_or_else(malformed)?;
        let end_line = parse_line_number(end).ok_or_else(malformed)?;

        Ok(Self {
            code: code.to_string(),
            entry: IgnoreEntry {
                start_line,
                end_line,
            },
        })
    }
}

impl fmt::Display for IgnoreRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}",
            self.code,
            self.entry.start_line + 1,
            self.entry.end_line + 1,
            sep = RECORD_SEPARATOR
        )
    }
}

/// Converts a 1-based line field to 0-based.
fn parse_line_number(field: &str) -> Option<usize> {
    field.trim().parse::<usize>().ok()?.checked_sub(1)
}

/// Parsed ignore file: warning code to recorded spans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreBaseline {
    entries: HashMap<String, Vec<IgnoreEntry>>,
    /// Codes in first-seen order, for writing the baseline back out.
    codes: Vec<String>,
}

impl IgnoreBaseline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the contents of an ignore file.
    ///
    /// Blank lines are skipped. The first malformed record rejects the whole
    /// file: dropping it would silently un-suppress warnings.
    pub fn parse(content: &str) -> Result<Self, LinterError> {
        let mut baseline = Self::new();

        for (index, line) in split_lines(content).into_iter().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            baseline.insert(IgnoreRecord::parse(line, index + 1)?);
        }

        Ok(baseline)
    }

    /// Parses an optional ignore file; a missing file is an empty baseline.
    pub fn parse_optional(content: Option<&str>) -> Result<Self, LinterError> {
        match content {
            Some(content) => Self::parse(content),
            None => Ok(Self::new()),
        }
    }

    /// Builds a baseline that covers every given warning.
    pub fn from_warnings<'a>(warnings: impl IntoIterator<Item = &'a Warning>) -> Self {
        let mut baseline = Self::new();
        for warning in warnings {
            let record = IgnoreRecord::for_warning(warning);
            if !baseline.entries_for(&record.code).contains(&record.entry) {
                baseline.insert(record);
            }
        }
        baseline
    }

    pub fn insert(&mut self, record: IgnoreRecord) {
        let IgnoreRecord { code, entry } = record;
        match self.entries.get_mut(&code) {
            Some(entries) => entries.push(entry),
            None => {
                self.codes.push(code.clone());
                self.entries.insert(code, vec![entry]);
            }
        }
    }

    /// Entries recorded for `code`, in file order.
    pub fn entries_for(&self, code: &str) -> &[IgnoreEntry] {
        self.entries.get(code).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of entries across all codes.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Records grouped by code, codes in first-seen order.
    pub fn records(&self) -> impl Iterator<Item = IgnoreRecord> + '_ {
        self.codes.iter().flat_map(move |code| {
            self.entries_for(code).iter().map(move |entry| IgnoreRecord {
                code: code.clone(),
                entry: *entry,
            })
        })
    }

    /// Renders the baseline in the on-disk format.
    pub fn to_file_contents(&self) -> String {
        let mut out = String::new();
        for record in self.records() {
            out.push_str(&record.to_string());
            out.push('\n');
        }
        out
    }
}
