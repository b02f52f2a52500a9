use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::LinterError;
use crate::source::SourceReader;
use crate::validator::{ValidationOutcome, Validator, ValidatorOptions};
use crate::warning::{RawPosition, RawSegment, RawWarning};

/// In-memory documents and ignore files.
#[derive(Default)]
pub struct MemorySourceReader {
    pub documents: HashMap<PathBuf, String>,
    pub ignore_files: Mutex<HashMap<PathBuf, String>>,
}

impl MemorySourceReader {
    pub fn with_document(mut self, path: &str, text: &str) -> Self {
        self.documents.insert(PathBuf::from(path), text.to_string());
        self
    }

    pub fn with_ignore_file(self, path: &str, text: &str) -> Self {
        self.ignore_files
            .lock()
            .unwrap()
            .insert(PathBuf::from(path), text.to_string());
        self
    }

    pub fn ignore_file(&self, path: &str) -> Option<String> {
        self.ignore_files.lock().unwrap().get(Path::new(path)).cloned()
    }
}

impl SourceReader for MemorySourceReader {
    fn read_document(&self, path: &Path) -> Result<String, LinterError> {
        self.documents
            .get(path)
            .cloned()
            .ok_or_else(|| LinterError::file(format!("Failed to read {}", path.display())))
    }

    fn read_ignore_file(&self, path: &Path) -> Result<Option<String>, LinterError> {
        Ok(self.ignore_files.lock().unwrap().get(path).cloned())
    }

    fn write_ignore_file(&self, path: &Path, contents: &str) -> Result<(), LinterError> {
        self.ignore_files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}

/// Validator answering from a table keyed by document text.
#[derive(Default)]
pub struct ScriptedValidator {
    pub outcomes: HashMap<String, Result<ValidationOutcome, String>>,
}

impl ScriptedValidator {
    pub fn on(mut self, text: &str, outcome: ValidationOutcome) -> Self {
        self.outcomes.insert(text.to_string(), Ok(outcome));
        self
    }

    pub fn failing_on(mut self, text: &str, message: &str) -> Self {
        self.outcomes
            .insert(text.to_string(), Err(message.to_string()));
        self
    }
}

impl Validator for ScriptedValidator {
    fn validate(
        &self,
        source: &str,
        _options: &ValidatorOptions,
    ) -> Result<ValidationOutcome, LinterError> {
        match self.outcomes.get(source) {
            Some(Ok(outcome)) => Ok(outcome.clone()),
            Some(Err(message)) => Err(LinterError::validator(message.clone())),
            None => Ok(ValidationOutcome::Clean),
        }
    }
}

/// `count` numbered lines: `line 1`, `line 2`, ...
pub fn numbered_document(count: usize) -> String {
    (1..=count)
        .map(|i| format!("line {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Raw warning with one segment per line, 1-based positions.
pub fn raw_warning(code: &str, start: (usize, usize), end: (usize, usize)) -> RawWarning {
    let source_map = if start.0 == end.0 {
        vec![RawSegment::new(
            RawPosition::new(start.0, start.1),
            RawPosition::new(end.0, end.1),
        )]
    } else {
        vec![
            RawSegment::new(
                RawPosition::new(start.0, start.1),
                RawPosition::new(start.0, 100),
            ),
            RawSegment::new(RawPosition::new(end.0, 1), RawPosition::new(end.0, end.1)),
        ]
    };

    RawWarning {
        code: code.to_string(),
        description: format!("warning {code}"),
        source_map,
    }
}
