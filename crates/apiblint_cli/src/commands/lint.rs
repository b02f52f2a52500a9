//! Lint command implementation

use std::path::PathBuf;

use apiblint_core::{LintConfig, Linter};
use miette::{IntoDiagnostic, Result};
use tracing::{debug, info};

use crate::cli::Cli;
use crate::output::{ColorChoice, output_outcome};

/// Runs the lint and returns the process exit code.
pub fn run_lint(cli: &Cli) -> Result<u8> {
    let mut config = match &cli.config {
        Some(path) => LintConfig::from_file(path).into_diagnostic()?,
        None => find_config()?,
    };
    apply_overrides(&mut config, cli);

    let linter = Linter::new(config);
    debug!("Effective configuration: {:?}", linter.config());
    let outcome = linter.lint_paths(&cli.files).into_diagnostic()?;

    output_outcome(
        &outcome,
        cli.format,
        ColorChoice::from_flags(cli.no_color, cli.force_color),
    )?;

    Ok(outcome.summary.exit_code)
}

/// Looks for a config file in the working directory.
pub fn find_config() -> Result<LintConfig> {
    let cwd: PathBuf = std::env::current_dir().into_diagnostic()?;
    match LintConfig::discover(&cwd) {
        Some(path) => {
            info!("Using config {}", path.display());
            LintConfig::from_file(&path).into_diagnostic()
        }
        None => Ok(LintConfig::new()),
    }
}

/// Command line values win over the config file.
fn apply_overrides(config: &mut LintConfig, cli: &Cli) {
    if let Some(fuzz) = cli.fuzzy_line_range {
        config.fuzzy_line_range = fuzz;
    }
    if let Some(context) = cli.context_lines {
        config.context_lines = context;
    }
    for code in &cli.ignore_codes {
        if !config.ignore_codes.contains(code) {
            config.ignore_codes.push(code.clone());
        }
    }
    config.update_baseline = cli.update_baseline;
}
