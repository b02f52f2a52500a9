//! Highlighted source excerpts for reported warnings.

use serde::Serialize;

use crate::error::LinterError;
use crate::warning::Warning;

/// Whether a line belongs to the warning span or only surrounds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    /// Surrounding line, displayed dimmed.
    Context,
    /// Line that overlaps the warning span.
    Span,
}

/// A run of text within a rendered line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub text: String,
    pub highlighted: bool,
}

impl Segment {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            highlighted: false,
        }
    }

    fn highlighted(text: &str) -> Self {
        Self {
            text: text.to_string(),
            highlighted: true,
        }
    }
}

/// One rendered line of an excerpt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExcerptLine {
    /// 1-based line number.
    pub line_number: usize,
    pub kind: LineKind,
    /// Non-empty segments in display order.
    pub segments: Vec<Segment>,
}

impl ExcerptLine {
    fn new(line_number: usize, kind: LineKind, segments: Vec<Segment>) -> Self {
        Self {
            line_number,
            kind,
            segments: segments
                .into_iter()
                .filter(|segment| !segment.text.is_empty())
                .collect(),
        }
    }
}

/// A rendered excerpt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Excerpt {
    /// Width of the line number gutter, shared by every excerpt of a document.
    pub gutter_width: usize,
    pub lines: Vec<ExcerptLine>,
}

/// Renders warnings against the lines of one document.
#[derive(Debug, Clone, Copy)]
pub struct ExcerptRenderer<'a> {
    lines: &'a [&'a str],
    context_size: usize,
}

impl<'a> ExcerptRenderer<'a> {
    pub fn new(lines: &'a [&'a str], context_size: usize) -> Self {
        Self {
            lines,
            context_size,
        }
    }

    /// Digit count of the document's line count.
    pub fn gutter_width(&self) -> usize {
        self.lines.len().to_string().len()
    }

    /// Renders `warning` with up to `context_size` lines on either side.
    ///
    /// Fails when the span's lines are not in the document; that means the
    /// validator and the text disagree and must not be papered over.
    pub fn render(&self, warning: &Warning) -> Result<Excerpt, LinterError> {
        let line_count = self.lines.len();
        if warning.start_line >= line_count || warning.end_line >= line_count {
            return Err(LinterError::OutOfRangeSpan {
                start_line: warning.start_line,
                end_line: warning.end_line,
                line_count,
            });
        }

        let first = warning.start_line.saturating_sub(self.context_size);
        let last = warning
            .end_line
            .saturating_add(self.context_size)
            .saturating_add(1)
            .min(line_count);

        let lines = (first..last)
            .map(|i| render_line(i, self.lines[i], warning))
            .collect();

        Ok(Excerpt {
            gutter_width: self.gutter_width(),
            lines,
        })
    }
}

fn render_line(index: usize, line: &str, warning: &Warning) -> ExcerptLine {
    let line_number = index + 1;
    let Warning {
        start_line,
        start_char,
        end_line,
        end_char,
        ..
    } = *warning;

    if index < start_line || index > end_line {
        return ExcerptLine::new(line_number, LineKind::Context, vec![Segment::plain(line)]);
    }

    let segments = if index == start_line && index == end_line {
        let start = byte_offset(line, start_char);
        let end = byte_offset(line, end_char).max(start);
        vec![
            Segment::plain(&line[..start]),
            Segment::highlighted(&line[start..end]),
            Segment::plain(&line[end..]),
        ]
    } else if index == start_line {
        let start = byte_offset(line, start_char);
        vec![
            Segment::plain(&line[..start]),
            Segment::highlighted(&line[start..]),
        ]
    } else if index == end_line {
        let end = byte_offset(line, end_char);
        vec![
            Segment::highlighted(&line[..end]),
            Segment::plain(&line[end..]),
        ]
    } else {
        vec![Segment::highlighted(line)]
    };

    ExcerptLine::new(line_number, LineKind::Span, segments)
}

/// Byte offset of the `column`-th character, clamped to the line end.
fn byte_offset(line: &str, column: usize) -> usize {
    line.char_indices()
        .nth(column)
        .map_or(line.len(), |(offset, _)| offset)
}
