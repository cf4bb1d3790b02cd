//! CLI argument definitions for the survey analyzer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use survey_model::{DocumentKind, SourceFormat, TabularKind};

#[derive(Parser)]
#[command(
    name = "survey-analyzer",
    version,
    about = "Survey Analyzer - Normalize survey exports and report on them",
    long_about = "Read survey responses from CSV, TSV, spreadsheet, text or PDF exports,\n\
                  reconcile them into one schema, and write statistics, CSV/JSON exports\n\
                  and a narrative report with optional AI commentary."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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

    /// Allow respondent values in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Analyze one survey file (or the built-in sample) and write an output bundle.
    Analyze(AnalyzeArgs),

    /// List canonical fields, their accepted column names and the age buckets.
    Fields,
}

#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Survey file to read; the built-in sample is used when omitted.
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Input format (default: detected from the file extension).
    #[arg(long = "format", value_enum)]
    pub format: Option<FormatArg>,

    /// Root directory for run folders (default: ./outputs).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// TOML file with run settings.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Skip AI commentary; placeholder text is written instead.
    #[arg(long = "no-ai")]
    pub no_ai: bool,

    /// Gemini model name.
    #[arg(long = "model", value_name = "NAME")]
    pub model: Option<String>,

    /// Gemini API key.
    #[arg(
        long = "api-key",
        value_name = "KEY",
        env = "GEMINI_API_KEY",
        hide_env_values = true
    )]
    pub api_key: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Csv,
    Tsv,
    Workbook,
    Text,
    Pdf,
}

impl From<FormatArg> for SourceFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Csv => SourceFormat::CSV,
            FormatArg::Tsv => SourceFormat::TSV,
            FormatArg::Workbook => SourceFormat::Tabular(TabularKind::Workbook),
            FormatArg::Text => SourceFormat::Document(DocumentKind::Text),
            FormatArg::Pdf => SourceFormat::Document(DocumentKind::Pdf),
        }
    }
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
