//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "screener")]
#[command(author, version, about = "End-of-day technical signal screener")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level (defaults to the configured level)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Screen the universe and write buy/sell result files
    Run(RunArgs),
    /// Show indicator values and classification for one ticker
    Inspect(InspectArgs),
    /// Validate configuration
    ValidateConfig,
}

#[derive(Clone, Copy, Default, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(clap::Args)]
pub struct RunArgs {
    /// Use the reduced test universe and debug logging
    #[arg(long)]
    pub test: bool,

    /// Directory of per-ticker price CSV files
    #[arg(long)]
    pub prices: Option<PathBuf>,

    /// Universe CSV file (Ticker,Name,Market)
    #[arg(short, long)]
    pub universe: Option<PathBuf>,

    /// Directory for the result files
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Run report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

#[derive(clap::Args)]
pub struct InspectArgs {
    /// Ticker code
    pub ticker: String,

    /// Directory of per-ticker price CSV files
    #[arg(long)]
    pub prices: Option<PathBuf>,
}
