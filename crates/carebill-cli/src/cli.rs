//! CLI argument definitions for the billing engine.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "carebill",
    version,
    about = "Monthly billing reconciliation for assisted-living facilities",
    long_about = "Reconciles the meal-attendance log, the supply-usage log and each \
                  facility's billing ledger into per-resident invoices, applying \
                  welfare-cap and installment-rollover rules."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the billing computation for one month.
    Run(RunArgs),

    /// List the configured facilities.
    Facilities(FacilitiesArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Target month, as 2026-01 or an era label like R8.1.
    #[arg(value_name = "MONTH")]
    pub month: String,

    /// Path to the JSON configuration file.
    #[arg(long = "config", value_name = "PATH", default_value = "carebill.json")]
    pub config: PathBuf,

    /// Output directory (default: <base_dir>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Invoice issue date as YYYY-MM-DD (default: the 3rd of the following month).
    #[arg(long = "issue-date", value_name = "DATE")]
    pub issue_date: Option<String>,

    /// Seed from the nearest prior ledger sheet when the target month
    /// has none, rolling installments forward and clearing hand-entered
    /// charges.
    #[arg(long = "allow-fallback")]
    pub allow_fallback: bool,

    /// Write only the updated ledger sheets, skipping invoices,
    /// receipts and combined statements.
    #[arg(long = "skip-documents")]
    pub skip_documents: bool,

    /// Compute and report without writing any output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct FacilitiesArgs {
    /// Path to the JSON configuration file.
    #[arg(long = "config", value_name = "PATH", default_value = "carebill.json")]
    pub config: PathBuf,
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
