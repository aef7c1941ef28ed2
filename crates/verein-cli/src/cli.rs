//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "vereinskasse",
    version,
    about = "Generate SEPA direct-debit collections from a club's member table",
    long_about = "Extract members from a Mitglieder table export, validate their\n\
                  bank data, and assemble a pain.008.003.02 direct-debit document.\n\
                  Members without a usable IBAN are excluded and reported."
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
    /// Extract members and generate the collection document.
    Collect(CollectArgs),

    /// Validate the identifiers of a collection profile.
    CheckProfile(CheckProfileArgs),
}

#[derive(Parser)]
pub struct CollectArgs {
    /// Path to the Mitglieder table export (CSV, row 0 is the header).
    #[arg(value_name = "MITGLIEDER_CSV")]
    pub input: PathBuf,

    /// Collection profile with the originator identity and run options.
    #[arg(long = "profile", value_name = "PATH")]
    pub profile: PathBuf,

    /// Output path for the document (default: input path with .xml extension).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Default contribution for members without an individual amount
    /// (overrides the profile).
    #[arg(long = "contribution", value_name = "AMOUNT")]
    pub contribution: Option<String>,

    /// Collect every member with the default amount, ignoring individual
    /// contributions.
    #[arg(long = "uniform")]
    pub uniform: bool,

    /// Prefix the output with a UTF-8 byte-order mark (overrides the profile).
    #[arg(long = "bom", overrides_with = "no_bom")]
    pub bom: bool,

    /// Emit plain UTF-8 without a byte-order mark (overrides the profile).
    #[arg(long = "no-bom", overrides_with = "bom")]
    pub no_bom: bool,

    /// How to treat rows repeating a membership number (overrides the profile).
    #[arg(long = "duplicates", value_enum)]
    pub duplicates: Option<DuplicatesArg>,

    /// Also collect members flagged inactive.
    #[arg(long = "include-inactive")]
    pub include_inactive: bool,

    /// Also collect members flagged contribution-free.
    #[arg(long = "include-contribution-free")]
    pub include_contribution_free: bool,

    /// Validate and report without writing the output file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct CheckProfileArgs {
    /// Collection profile to check.
    #[arg(value_name = "PROFILE")]
    pub profile: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DuplicatesArg {
    /// Fail the extraction on a repeated membership number.
    Reject,
    /// Keep the last row and record the conflict as a warning.
    KeepLast,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
