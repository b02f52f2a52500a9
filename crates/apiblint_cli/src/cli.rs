//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// apiblint - Lint API Blueprint documents
#[derive(Parser)]
#[command(name = "apiblint")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Documents or directories to lint
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Line tolerance when matching warnings against the ignore file, to
    /// cope with small edits above a recorded warning
    #[arg(short = 'z', long, value_name = "N")]
    pub fuzzy_line_range: Option<usize>,

    /// Context lines shown above and below a highlighted warning
    #[arg(short = 'c', long, value_name = "N")]
    pub context_lines: Option<usize>,

    /// Warning codes to ignore everywhere, e.g. `-i W0 W1 -- docs/`
    #[arg(short = 'i', long, value_name = "CODE", num_args = 1..)]
    pub ignore_codes: Vec<String>,

    /// Log verbosity
    #[arg(short = 'l', long, value_enum, default_value_t = LogLevel::Info, ignore_case = true)]
    pub log_level: LogLevel,

    /// Monochrome output only
    #[arg(short = 'n', long)]
    pub no_color: bool,

    /// Color output even when stdout is not a terminal (e.g. in a pre-commit hook)
    #[arg(short = 'f', long, conflicts_with = "no_color")]
    pub force_color: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Configuration file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Record every current warning in the ignore files
    #[arg(long)]
    pub update_baseline: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Silent,
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive for `tracing_subscriber::EnvFilter`.
    pub fn as_filter(self) -> &'static str {
        match self {
            Self::Silent => "off",
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
