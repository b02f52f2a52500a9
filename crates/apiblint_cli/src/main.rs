//! apiblint CLI
//!
//! Lints API Blueprint documents and tolerates known warnings recorded in
//! per-document ignore files.

mod cli;
mod commands;
mod output;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::commands::lint::run_lint;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(cli.log_level.as_filter()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run_lint(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            // Reported regardless of the log level.
            eprintln!("{e:?}");
            ExitCode::from(2)
        }
    }
}
