//! CLI argument definitions for the ADaM metadata resolver.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use adam_library::{CodelistPolicy, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use adam_model::{CtStandard, GuideVersion};

#[derive(Parser)]
#[command(
    name = "adam-metadata",
    version,
    about = "Resolve ADaM variable metadata and controlled terminology from the CDISC Library",
    long_about = "Resolve ADaM variable metadata from the CDISC Library.\n\n\
                  Locates the dataset structure that defines a variable, fetches its\n\
                  attributes, and resolves every referenced codelist against the most\n\
                  recent ADaM CT or SDTM CT package."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub connection: ConnectionArgs,

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

/// Registry connection settings shared by all subcommands.
#[derive(Args)]
pub struct ConnectionArgs {
    /// CDISC Library API key.
    #[arg(
        long = "api-key",
        env = "CDISC_API_KEY",
        hide_env_values = true,
        global = true
    )]
    pub api_key: Option<String>,

    /// CDISC Library API base URL.
    #[arg(
        long = "base-url",
        env = "CDISC_LIBRARY_URL",
        default_value = DEFAULT_BASE_URL,
        global = true
    )]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[arg(
        long = "timeout",
        value_name = "SECS",
        value_parser = clap::value_parser!(u64).range(1..),
        default_value_t = DEFAULT_TIMEOUT.as_secs(),
        global = true
    )]
    pub timeout: u64,
}

impl ConnectionArgs {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve one variable and print its metadata report.
    Variable(VariableArgs),

    /// Print the most recent package date of a terminology standard.
    Terminology(TerminologyArgs),
}

#[derive(Parser)]
pub struct VariableArgs {
    /// ADaM variable name (e.g. TRT01P, DTYPE).
    #[arg(value_name = "NAME")]
    pub name: String,

    /// ADaMIG version (dots or dashes, e.g. 1-3 or 1.3).
    #[arg(long = "ig-version", value_name = "VERSION", default_value = GuideVersion::DEFAULT)]
    pub ig_version: String,

    /// Also write the flat export rows to this CSV file.
    #[arg(long = "output", short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Report format written to stdout.
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: ReportFormatArg,

    /// Fail the run when any referenced codelist cannot be resolved.
    ///
    /// By default a codelist that cannot be resolved is skipped with a
    /// warning and the remaining codelists are still reported.
    #[arg(long = "strict-codelists")]
    pub strict_codelists: bool,
}

impl VariableArgs {
    pub fn policy(&self) -> CodelistPolicy {
        if self.strict_codelists {
            CodelistPolicy::Strict
        } else {
            CodelistPolicy::Lenient
        }
    }
}

#[derive(Parser)]
pub struct TerminologyArgs {
    /// Terminology standard.
    #[arg(value_enum, value_name = "STANDARD")]
    pub standard: StandardArg,
}

/// Terminology standards accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StandardArg {
    Adamct,
    Sdtmct,
}

impl From<StandardArg> for CtStandard {
    fn from(value: StandardArg) -> Self {
        match value {
            StandardArg::Adamct => CtStandard::Adamct,
            StandardArg::Sdtmct => CtStandard::Sdtmct,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormatArg {
    Text,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
