//! CLI argument definitions for xl2sql.

use std::path::PathBuf;

use clap::builder::TypedValueParser as _;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use xl2sql_cli::config::parse_column_mapping;
use xl2sql_ingest::DEFAULT_PREVIEW_ROWS;

#[derive(Parser)]
#[command(
    name = "xl2sql",
    version,
    about = "Generate SQL scripts from spreadsheet rows",
    long_about = "Validate spreadsheet rows and render one stored-procedure call or \
                  UPDATE statement per usable row.\n\n\
                  Reads CSV, Excel (.xlsx/.xlsm/.xlsb/.xls) and OpenDocument (.ods) files \
                  and writes a GO-separated SQL script."
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
    /// Generate a SQL script from one sheet of a spreadsheet.
    Generate(GenerateArgs),

    /// List the available procedures and their parameters.
    Procedures,

    /// List the sheets of a spreadsheet that contain data.
    Sheets(SheetsArgs),

    /// Show the first rows of a sheet.
    Preview(PreviewArgs),
}

#[derive(Parser)]
pub struct GenerateArgs {
    /// Spreadsheet to read (.csv, .xlsx, .xlsm, .xlsb, .xls, .ods).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Procedure to render (see `xl2sql procedures`).
    #[arg(long = "procedure", short = 'p', value_name = "NAME")]
    pub procedure: Option<String>,

    /// Sheet to read (default: the first sheet with data).
    #[arg(long = "sheet", short = 's', value_name = "NAME")]
    pub sheet: Option<String>,

    /// Output script path (default: <INPUT stem>_<sheet>.sql next to INPUT).
    #[arg(long = "output", short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Assign a column to a parameter, e.g. `--map qty="Dropship Qty"`.
    #[arg(long = "map", short = 'm', value_name = "PARAM=COLUMN", value_parser = parse_column_mapping)]
    pub map: Vec<(String, String)>,

    /// TOML file with procedure, sheet, policies and column assignments.
    #[arg(long = "config", short = 'c', value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Keep rows whose text cells contain Arabic script.
    #[arg(long = "allow-arabic")]
    pub allow_arabic: bool,

    /// Coerce defective values instead of skipping their rows.
    ///
    /// Empty numeric cells become 0 and unparseable numbers are written as
    /// they appear in the sheet.
    #[arg(long = "no-quality-checks")]
    pub no_quality_checks: bool,

    /// Run even when the column assignment looks implausible.
    #[arg(long = "ignore-mapping-warnings")]
    pub ignore_mapping_warnings: bool,

    /// Also write the run statistics as JSON.
    #[arg(long = "summary-json", value_name = "FILE")]
    pub summary_json: Option<PathBuf>,
}

#[derive(Parser)]
pub struct SheetsArgs {
    /// Spreadsheet to inspect.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,
}

#[derive(Parser)]
pub struct PreviewArgs {
    /// Spreadsheet to inspect.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Sheet to show (default: the first sheet with data).
    #[arg(long = "sheet", short = 's', value_name = "NAME")]
    pub sheet: Option<String>,

    /// Number of rows to show (1-100).
    #[arg(
        long = "rows",
        short = 'n',
        value_name = "N",
        default_value_t = DEFAULT_PREVIEW_ROWS,
        value_parser = clap::value_parser!(u16).range(1..=100).map(usize::from)
    )]
    pub rows: usize,
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
