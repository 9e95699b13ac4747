//! CLI argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "mls",
    version,
    about = "Classify and normalize multi-vendor real-estate listing exports",
    long_about = "Classify and normalize multi-vendor real-estate listing exports.\n\n\
                  Each file is bound to an asset class, its statuses are mapped through a\n\
                  declarative contract and the results are written as canonical records."
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

    /// Allow listing cell values (ML numbers, addresses) in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Classify listing files against a contract and write canonical outputs.
    Classify(ClassifyArgs),

    /// Inspect a contract document.
    #[command(subcommand)]
    Contract(ContractCommand),

    /// List the canonical field schema.
    Fields,
}

#[derive(Parser)]
pub struct ClassifyArgs {
    /// Listing files or folders of listing files (.csv, .xlsx, .xls, .ods).
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Contract document (TOML, or JSON by extension).
    #[arg(long = "contract", value_name = "PATH")]
    pub contract: PathBuf,

    /// As-of date stamped on every record (default: today).
    #[arg(long = "snapshot-date", value_name = "YYYY-MM-DD")]
    pub snapshot_date: Option<NaiveDate>,

    /// Bind every file to this asset class instead of inferring it.
    #[arg(long = "asset-class", value_name = "TAG")]
    pub asset_class: Option<String>,

    /// Output directory for listings.csv and batch_report.json.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// Classify and validate without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Worker threads per file (default: available parallelism).
    #[arg(long = "jobs", short = 'j', value_name = "N")]
    pub jobs: Option<usize>,
}

#[derive(Subcommand)]
pub enum ContractCommand {
    /// Load a contract and report configurations worth a second look.
    Check(ContractCheckArgs),
}

#[derive(Parser)]
pub struct ContractCheckArgs {
    /// Contract document (TOML, or JSON by extension).
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Print the report as JSON.
    #[arg(long = "json")]
    pub json: bool,
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
