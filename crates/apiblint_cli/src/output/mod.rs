//! Output formatting module

mod json;
mod text;

use std::io::{self, IsTerminal, Write};

use apiblint_core::LintOutcome;
use miette::{IntoDiagnostic, Result};

use crate::cli::OutputFormat;

/// How the user asked for color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn from_flags(no_color: bool, force_color: bool) -> Self {
        if no_color {
            Self::Never
        } else if force_color {
            Self::Always
        } else {
            Self::Auto
        }
    }
}

fn use_colors(format: OutputFormat, choice: ColorChoice) -> bool {
    match (format, choice) {
        (OutputFormat::Json, _) | (_, ColorChoice::Never) => false,
        (_, ColorChoice::Always) => true,
        (_, ColorChoice::Auto) => {
            std::env::var_os("NO_COLOR").is_none() && io::stdout().is_terminal()
        }
    }
}

/// Writes every report, in order, followed by the batch summary.
pub fn output_outcome(
    outcome: &LintOutcome,
    format: OutputFormat,
    choice: ColorChoice,
) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Json => json::write_json(&mut out, outcome)?,
        OutputFormat::Text => {
            text::write_text(&mut out, outcome, use_colors(format, choice)).into_diagnostic()?
        }
    }

    out.flush().into_diagnostic()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_flags() {
        assert_eq!(ColorChoice::from_flags(false, false), ColorChoice::Auto);
        assert_eq!(ColorChoice::from_flags(true, false), ColorChoice::Never);
        assert_eq!(ColorChoice::from_flags(false, true), ColorChoice::Always);
    }

    #[test]
    fn test_json_is_never_colored() {
        assert!(!use_colors(OutputFormat::Json, ColorChoice::Always));
        assert!(use_colors(OutputFormat::Text, ColorChoice::Always));
        assert!(!use_colors(OutputFormat::Text, ColorChoice::Never));
    }
}
