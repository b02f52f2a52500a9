//! Text output formatter

use std::io::{self, Write};

use apiblint_core::{
    Disposition, DocumentReport, DocumentStatus, Excerpt, ExcerptLine, IgnoreRecord, LineKind,
    LintOutcome, SuppressionReason, WarningReport,
};
use owo_colors::{OwoColorize, Style};

/// Separator printed between warnings.
const SEPARATOR: &str = "-----------";

struct Painter {
    color: bool,
}

impl Painter {
    fn paint(&self, text: &str, style: Style) -> String {
        if self.color {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }
}

pub fn write_text(out: &mut impl Write, outcome: &LintOutcome, color: bool) -> io::Result<()> {
    let painter = Painter { color };

    for report in &outcome.reports {
        write_report(out, report, &painter)?;
    }

    let summary = &outcome.summary;
    let mut line = format!(
        "Checked {}, {} reported, {} suppressed",
        count(summary.documents, "document"),
        count(summary.tally.reported, "issue"),
        summary.tally.suppressed
    );
    if summary.failed > 0 {
        line.push_str(&format!(", {} failed", summary.failed));
    }
    if summary.skipped > 0 {
        line.push_str(&format!(", {} skipped", summary.skipped));
    }
    writeln!(out)?;
    writeln!(out, "{}", painter.paint(&line, Style::new().bold()))
}

/// `1 document`, `2 documents`.
fn count(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

fn write_report(
    out: &mut impl Write,
    report: &DocumentReport,
    painter: &Painter,
) -> io::Result<()> {
    let path = report.path.display().to_string();
    writeln!(out, "{}", painter.paint(&path, Style::new().bold()))?;

    match &report.status {
        DocumentStatus::ValidatorError(message) | DocumentStatus::Failed(message) => {
            return writeln!(
                out,
                "{} {}",
                painter.paint("Error:", Style::new().red().bold()),
                message
            );
        }
        DocumentStatus::UnrecognizedResult(message) => {
            return writeln!(
                out,
                "{} {}",
                painter.paint("Error: unrecognised linter result", Style::new().red().bold()),
                message
            );
        }
        DocumentStatus::Clean | DocumentStatus::WarningsFound => {}
    }

    if report.warnings.is_empty() {
        return writeln!(out, "{}", painter.paint("OK", Style::new().green()));
    }

    let ignore_file = report.ignore_file.display().to_string();
    let found = format!("{} found", count(report.warnings.len(), "linting issue"));
    writeln!(out, "{}", painter.paint(&found, Style::new().red().bold()))?;
    writeln!(
        out,
        "To ignore any of these instances, add the record shown to {}",
        painter.paint(&ignore_file, Style::new().bold())
    )?;

    for warning in &report.warnings {
        writeln!(out, "{SEPARATOR}")?;
        write_warning(out, warning, &ignore_file, painter)?;
    }
    writeln!(out, "{SEPARATOR}")
}

fn write_warning(
    out: &mut impl Write,
    report: &WarningReport,
    ignore_file: &str,
    painter: &Painter,
) -> io::Result<()> {
    let warning = &report.warning;
    let start = warning.start_line + 1;
    let end = warning.end_line + 1;
    let heading = format!("{} {}", warning.code, warning.description);
    writeln!(
        out,
        "{} (lines {start}-{end})",
        painter.paint(&heading, Style::new().red())
    )?;

    match &report.disposition {
        Disposition::Suppressed { reason } => {
            let by = match reason {
                SuppressionReason::GlobalCode => "--ignore-codes",
                SuppressionReason::Baseline(_) => ignore_file,
            };
            let range = format!("[{start}...{end}]");
            let marker = format!(
                "on lines {} ignored by {}",
                painter.paint(&range, Style::new().bold()),
                painter.paint(by, Style::new().bold())
            );
            writeln!(out, "{}", painter.paint(&marker, Style::new().bright_blue()))
        }
        Disposition::Reported { excerpt } => {
            write_excerpt(out, excerpt, painter)?;
            writeln!(
                out,
                "ignore record: {}",
                IgnoreRecord::for_warning(warning)
            )
        }
    }
}

fn write_excerpt(out: &mut impl Write, excerpt: &Excerpt, painter: &Painter) -> io::Result<()> {
    for line in &excerpt.lines {
        writeln!(out, "{}", format_line(line, excerpt.gutter_width, painter))?;
    }
    Ok(())
}

fn format_line(line: &ExcerptLine, width: usize, painter: &Painter) -> String {
    let gutter = format!("{:>width$}: ", line.line_number);
    let gutter_style = match line.kind {
        LineKind::Context => Style::new().yellow().dimmed(),
        LineKind::Span => Style::new().yellow(),
    };

    let mut rendered = painter.paint(&gutter, gutter_style);
    for segment in &line.segments {
        if segment.highlighted {
            rendered.push_str(&segment.text);
        } else {
            rendered.push_str(&painter.paint(&segment.text, Style::new().bright_black()));
        }
    }
    rendered
}
