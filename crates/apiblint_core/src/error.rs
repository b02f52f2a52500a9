//! Linter error types.

use thiserror::Error;

/// Errors that can occur while linting a document.
///
/// Every variant is scoped to a single document; a batch keeps going when one
/// document fails.
#[derive(Debug, Error)]
pub enum LinterError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// File error.
    #[error("File error: {0}")]
    File(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A raw warning has no usable source map.
    #[error("Malformed warning position: {reason}")]
    MalformedPosition { reason: String },

    /// An ignore file record could not be parsed.
    #[error("Malformed ignore record on line {line_number}: {line:?}")]
    MalformedIgnoreLine { line_number: usize, line: String },

    /// A warning points outside the document it was reported for.
    #[error(
        "Warning span (lines {start_line}..={end_line}) is outside the document ({line_count} lines)"
    )]
    OutOfRangeSpan {
        start_line: usize,
        end_line: usize,
        line_count: usize,
    },

    /// The external validator failed.
    #[error("Validator error: {0}")]
    Validator(String),

    /// The validator returned something that is not a parse result.
    #[error("Unrecognized validator result: {0}")]
    UnrecognizedResult(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LinterError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a file error.
    pub fn file(message: impl Into<String>) -> Self {
        Self::File(message.into())
    }

    /// Creates a malformed position error.
    pub fn malformed_position(reason: impl Into<String>) -> Self {
        Self::MalformedPosition {
            reason: reason.into(),
        }
    }

    /// Creates a validator error.
    pub fn validator(message: impl Into<String>) -> Self {
        Self::Validator(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_ignore_line_names_the_line() {
        let err = LinterError::MalformedIgnoreLine {
            line_number: 3,
            line: "W10:abc:4".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("line 3"));
        assert!(message.contains("W10:abc:4"));
    }

    #[test]
    fn test_out_of_range_span_message() {
        let err = LinterError::OutOfRangeSpan {
            start_line: 10,
            end_line: 12,
            line_count: 5,
        };
        assert_eq!(
            err.to_string(),
            "Warning span (lines 10..=12) is outside the document (5 lines)"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: LinterError = io.into();
        assert!(matches!(err, LinterError::Io(_)));
    }
}
