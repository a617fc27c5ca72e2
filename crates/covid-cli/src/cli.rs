//! CLI argument definitions for `covid-trends`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "covid-trends",
    version,
    about = "Daily COVID case and hospitalization trends",
    long_about = "Fetch daily COVID test results and hospitalizations, backfill suppressed \
                  counts, and report 7-day averages, 10-day changes and severity bands."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (default: platform config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Read test results from this file or URL instead of the configured source.
    #[arg(long = "cases", value_name = "PATH|URL", global = true)]
    pub cases: Option<String>,

    /// Read hospitalizations from this file or URL instead of the configured source.
    #[arg(long = "hospitalizations", value_name = "PATH|URL", global = true)]
    pub hospitalizations: Option<String>,

    /// Always fetch remote sources, ignoring today's cached download.
    #[arg(long = "no-cache", global = true)]
    pub no_cache: bool,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Append logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the most recent case rows.
    Cases(RowsArgs),

    /// Show the most recent hospitalization rows.
    Hospitalizations(RowsArgs),

    /// Latest value, recent peak and severity band for each dashboard metric.
    Summary(SummaryArgs),

    /// Write both enriched series to a directory.
    Export(ExportArgs),

    /// Print the effective configuration.
    Config,
}

#[derive(Args)]
pub struct RowsArgs {
    /// Number of trailing rows to show (default: `display.rows`).
    #[arg(long = "last", value_name = "N")]
    pub last: Option<usize>,
}

#[derive(Args)]
pub struct SummaryArgs {
    /// Trailing window for peaks, in rows (default: `display.window_days`).
    #[arg(long = "window", value_name = "N")]
    pub window: Option<usize>,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Output directory, created if missing.
    #[arg(long = "out", value_name = "DIR")]
    pub out: PathBuf,

    #[arg(long = "format", value_enum, default_value = "csv")]
    pub format: ExportFormatArg,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormatArg {
    Csv,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
