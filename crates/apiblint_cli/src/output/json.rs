//! JSON output formatter

use std::io::Write;

use apiblint_core::LintOutcome;
use miette::{IntoDiagnostic, Result};

pub fn write_json(out: &mut impl Write, outcome: &LintOutcome) -> Result<()> {
    let output = serde_json::json!({
        "documents": outcome.reports,
        "summary": outcome.summary,
    });
    writeln!(
        out,
        "{}",
        serde_json::to_string_pretty(&output).into_diagnostic()?
    )
    .into_diagnostic()
}
