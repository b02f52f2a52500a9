//! Raw validator warnings and their normalized form.
//!
//! The validator describes a multi-line span as a sequence of single-line
//! segments. [`Warning::from_raw`] collapses that into one start/end pair so
//! nothing downstream ever sees the fragmented form.

use serde::{Deserialize, Serialize};

use crate::error::LinterError;

/// Prefix prepended to the validator's numeric code (`10` becomes `W10`).
pub const WARNING_CODE_PREFIX: char = 'W';

/// A 1-based position as reported by the validator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPosition {
    pub line: Option<usize>,
    pub column: Option<usize>,
}

impl RawPosition {
    pub fn new(line: usize, column: usize) -> Self {
        Self {
            line: Some(line),
            column: Some(column),
        }
    }
}

/// One segment of a source map: a start and an end position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSegment {
    pub start: RawPosition,
    pub end: RawPosition,
}

impl RawSegment {
    pub fn new(start: RawPosition, end: RawPosition) -> Self {
        Self { start, end }
    }
}

/// A warning exactly as it comes out of the validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawWarning {
    /// Machine code without the class prefix, e.g. `10`.
    pub code: String,
    /// Human-readable description.
    pub description: String,
    /// Ordered source map segments.
    pub source_map: Vec<RawSegment>,
}

/// A warning with a single 0-based span.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warning {
    pub code: String,
    pub description: String,
    pub start_line: usize,
    pub start_char: usize,
    pub end_line: usize,
    pub end_char: usize,
}

impl Warning {
    /// Normalizes a raw warning.
    ///
    /// The first segment's start and the last segment's end form the span;
    /// interior segment boundaries are dropped.
    pub fn from_raw(raw: &RawWarning) -> Result<Self, LinterError> {
        let (first, last) = match (raw.source_map.first(), raw.source_map.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                return Err(LinterError::malformed_position(format!(
                    "warning {} has an empty source map",
                    raw.code
                )));
            }
        };

        let (start_line, start_char) = zero_based(&first.start, "start", &raw.code)?;
        let (end_line, end_char) = zero_based(&last.end, "end", &raw.code)?;

        if (start_line, start_char) > (end_line, end_char) {
            return Err(LinterError::malformed_position(format!(
                "warning {} ends ({}:{}) before it starts ({}:{})",
                raw.code,
                end_line + 1,
                end_char + 1,
                start_line + 1,
                start_char + 1
            )));
        }

        Ok(Self {
            code: format!("{}{}", WARNING_CODE_PREFIX, raw.code),
            description: raw.description.clone(),
            start_line,
            start_char,
            end_line,
            end_char,
        })
    }
}

fn zero_based(
    position: &RawPosition,
    which: &str,
    code: &str,
) -> Result<(usize, usize), LinterError> {
    let line = position.line.ok_or_else(|| {
        LinterError::malformed_position(format!("warning {code} {which} position has no line"))
    })?;
    let column = position.column.ok_or_else(|| {
        LinterError::malformed_position(format!("warning {code} {which} position has no column"))
    })?;

    match (line.checked_sub(1), column.checked_sub(1)) {
        (Some(line), Some(column)) => Ok((line, column)),
        _ => Err(LinterError::malformed_position(format!(
            "warning {code} {which} position {line}:{column} is not 1-based"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn raw(code: &str, segments: &[((usize, usize), (usize, usize))]) -> RawWarning {
        RawWarning {
            code: code.to_string(),
            description: "no value(s) specified".to_string(),
            source_map: segments
                .iter()
                .map(|&((sl, sc), (el, ec))| {
                    RawSegment::new(RawPosition::new(sl, sc), RawPosition::new(el, ec))
                })
                .collect(),
        }
    }

    #[test]
    fn test_single_segment() {
        let warning = Warning::from_raw(&raw("6", &[((127, 7), (127, 38))])).unwrap();
        assert_eq!(
            warning,
            Warning {
                code: "W6".to_string(),
                description: "no value(s) specified".to_string(),
                start_line: 126,
                start_char: 6,
                end_line: 126,
                end_char: 37,
            }
        );
    }

    #[test]
    fn test_two_segments_use_outer_boundary() {
        let warning =
            Warning::from_raw(&raw("10", &[((21, 7), (21, 80)), ((22, 1), (22, 75))])).unwrap();
        assert_eq!(warning.code, "W10");
        assert_eq!((warning.start_line, warning.start_char), (20, 6));
        assert_eq!((warning.end_line, warning.end_char), (21, 74));
    }

    #[test]
    fn test_interior_segments_are_ignored() {
        let warning = Warning::from_raw(&raw(
            "4",
            &[
                ((398, 3), (398, 40)),
                ((399, 1), (399, 200)),
                ((401, 1), (401, 18)),
            ],
        ))
        .unwrap();
        assert_eq!((warning.start_line, warning.start_char), (397, 2));
        assert_eq!((warning.end_line, warning.end_char), (400, 17));
    }

    #[test]
    fn test_empty_source_map_is_malformed() {
        let err = Warning::from_raw(&raw("10", &[])).unwrap_err();
        assert!(matches!(err, LinterError::MalformedPosition { .. }));
    }

    #[test]
    fn test_missing_column_is_malformed() {
        let mut warning = raw("10", &[((3, 1), (3, 4))]);
        warning.source_map[0].end.column = None;
        let err = Warning::from_raw(&warning).unwrap_err();
        assert!(err.to_string().contains("end position has no column"));
    }

    #[test]
    fn test_zero_line_is_malformed() {
        let err = Warning::from_raw(&raw("10", &[((0, 1), (1, 1))])).unwrap_err();
        assert!(matches!(err, LinterError::MalformedPosition { .. }));
    }

    #[test]
    fn test_reversed_span_is_malformed() {
        let err = Warning::from_raw(&raw("10", &[((5, 1), (4, 1))])).unwrap_err();
        assert!(err.to_string().contains("ends (4:1) before it starts (5:1)"));
    }
}
