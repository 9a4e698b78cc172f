//! CLI argument definitions for the theatre timestamp formatter.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use medicor_ingest::DEFAULT_SETTINGS_FILE;

#[derive(Parser)]
#[command(
    name = "medicor",
    version,
    about = "Clean theatre timestamp sheets",
    long_about = "Clean a sheet of surgical case timestamps.\n\n\
                  Fills blank cells from sibling columns, moves 12-hour readings\n\
                  to the afternoon where the rest of the row demands it, and flags\n\
                  timestamps that precede their reference column."
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

    /// Include cell values in log output.
    ///
    /// Cell values are patient data and are redacted from logs unless this
    /// flag is given.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fill, correct and check a timestamp sheet.
    Format(FormatArgs),

    /// Show how the settings mappings resolve against a sheet's header.
    Mappings(MappingsArgs),
}

#[derive(Parser)]
pub struct FormatArgs {
    /// CSV sheet to format (default: FileRoot + FileName from settings).
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Settings file with the NullColumns and IncorrectTimeColumns mappings.
    #[arg(long = "settings", value_name = "PATH", default_value = DEFAULT_SETTINGS_FILE)]
    pub settings: PathBuf,

    /// Where to save the formatted sheet (default: overwrite INPUT).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Skip writing the cell styling sidecar.
    #[arg(long = "no-annotations")]
    pub no_annotations: bool,

    /// Report changes without writing any file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct MappingsArgs {
    /// CSV sheet whose header the mappings are resolved against.
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Settings file with the NullColumns and IncorrectTimeColumns mappings.
    #[arg(long = "settings", value_name = "PATH", default_value = DEFAULT_SETTINGS_FILE)]
    pub settings: PathBuf,
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
