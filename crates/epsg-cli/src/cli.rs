//! CLI argument definitions for the GeoTrans EPSG tool.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use epsg_cli::logging::{LogConfig, LogFormat};
use epsg_cli::script::SessionStep;
use epsg_core::SurfaceSide;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "geotrans-epsg",
    version,
    about = "Resolve EPSG codes to GeoTrans coordinate-system fields",
    long_about = "Load the EPSG-to-GeoTrans field table, search it the way the code \
                  input does, and show the parameters a code applies.\n\n\
                  The table is read from $MSPCCS_DATA/EPSG_codes_TO_GeoTrans_fields.csv \
                  unless --data-file is given."
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

    /// EPSG table to load instead of the one under $MSPCCS_DATA.
    #[arg(long = "data-file", value_name = "PATH", global = true)]
    pub data_file: Option<PathBuf>,
}

impl Cli {
    /// Logging setup for these flags. `--log-level` beats `-v`/`-q`, and
    /// either one disables `RUST_LOG`.
    pub fn log_config(&self) -> LogConfig {
        let explicit = self.log_level.map(LevelFilter::from);
        LogConfig {
            level_filter: explicit.unwrap_or_else(|| self.verbosity.tracing_level_filter()),
            use_env_filter: explicit.is_none() && !self.verbosity.is_present(),
            format: self.log_format.into(),
            log_file: self.log_file.clone(),
            with_ansi: match self.color.color {
                ColorChoice::Always => true,
                ColorChoice::Never => false,
                ColorChoice::Auto => self.log_file.is_none() && io::stderr().is_terminal(),
            },
            ..LogConfig::default()
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Load the EPSG table and report skipped rows.
    Check,

    /// List the candidates the code input offers for a query.
    Search(SearchArgs),

    /// Show the parameters an EPSG code applies.
    Show(ShowArgs),

    /// Replay a scripted editing session against the code input.
    ///
    /// Steps: type:<digits>, paste:<text>, back, pick:<n>, focus, clear,
    /// apply, edit:<field>.
    Session(SessionArgs),
}

#[derive(Parser)]
pub struct SearchArgs {
    /// Text typed into the code input (omit to list the initial options).
    #[arg(value_name = "QUERY")]
    pub query: Option<String>,

    /// Maximum number of candidates to print.
    #[arg(long = "limit", value_name = "N", default_value_t = 15)]
    pub limit: usize,
}

#[derive(Parser)]
pub struct ShowArgs {
    /// EPSG code to look up.
    #[arg(value_name = "CODE")]
    pub code: String,

    /// Print the parameters as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct SessionArgs {
    /// Steps to replay, in order.
    #[arg(value_name = "STEP", required = true)]
    pub steps: Vec<SessionStep>,

    /// Surface the session runs on.
    #[arg(long = "side", value_enum, default_value = "source")]
    pub side: SideArg,

    /// Print the final state as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SideArg {
    Source,
    Target,
}

impl From<SideArg> for SurfaceSide {
    fn from(side: SideArg) -> Self {
        match side {
            SideArg::Source => SurfaceSide::Source,
            SideArg::Target => SurfaceSide::Target,
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

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}
