//! CLI argument definitions for heatwatch.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use hw_cli::args::{FilterArg, SortArg, parse_filter, parse_reducer, parse_sort};
use hw_ingest::BuiltinDataset;
use hw_query::{EmptySelectionPolicy, ReduceKind, Reducer, UnknownColumnPolicy};

#[derive(Parser)]
#[command(
    name = "heatwatch",
    version,
    about = "Filter and summarize heatwave impact data",
    long_about = "Filter and summarize heatwave impact data.\n\n\
                  Loads a built-in dataset or a CSV file, applies category filters\n\
                  and prints summary cards, group aggregates, extremes and totals."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub data: DataArgs,

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

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// JSON file with the data source, filter policy and default selections.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

/// Data source, filters and filter policy.
#[derive(Args)]
pub struct DataArgs {
    /// CSV file to load instead of a built-in dataset.
    #[arg(long = "source", value_name = "CSV", global = true, conflicts_with = "builtin")]
    pub source: Option<PathBuf>,

    /// Built-in schema to parse --source with (inferred when omitted).
    #[arg(long = "schema", value_name = "NAME", global = true, requires = "source")]
    pub schema: Option<BuiltinDataset>,

    /// Built-in dataset to load: heatwave, climate-overview or rainfall.
    #[arg(long = "builtin", value_name = "NAME", global = true)]
    pub builtin: Option<BuiltinDataset>,

    /// Restrict COLUMN to the listed values; an empty list selects nothing.
    #[arg(
        long = "filter",
        value_name = "COLUMN=V1,V2",
        value_parser = parse_filter,
        global = true
    )]
    pub filters: Vec<FilterArg>,

    /// Shorthand for --filter City=...
    #[arg(long = "city", value_name = "CITY", value_delimiter = ',', global = true)]
    pub cities: Vec<String>,

    /// Shorthand for --filter Year=...
    #[arg(long = "year", value_name = "YEAR", value_delimiter = ',', global = true)]
    pub years: Vec<String>,

    /// How an empty selection is read.
    #[arg(long = "empty-selection", value_enum, global = true)]
    pub empty_selection: Option<EmptySelectionArg>,

    /// How a filter on a column the dataset lacks is read.
    #[arg(long = "unknown-column", value_enum, global = true)]
    pub unknown_column: Option<UnknownColumnArg>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the built-in datasets.
    Datasets,

    /// List filter dimensions and their values.
    Dimensions,

    /// Show summary cards and deaths per city for the filtered view.
    Summary,

    /// Aggregate numeric columns per group.
    Group(GroupArgs),

    /// Show the row holding the maximum (or minimum) of a column.
    Top(TopArgs),

    /// Reduce one column across the filtered view.
    Total(TotalArgs),

    /// Write the filtered view as CSV.
    Export(ExportArgs),
}

#[derive(Args)]
pub struct GroupArgs {
    /// Grouping columns.
    #[arg(long = "by", value_name = "COLUMN", value_delimiter = ',', required = true)]
    pub by: Vec<String>,

    /// Output column as OUTPUT=SOURCE:KIND (kind: sum, mean, max, min, count).
    #[arg(
        long = "reduce",
        value_name = "OUTPUT=SOURCE:KIND",
        value_parser = parse_reducer,
        required = true
    )]
    pub reducers: Vec<Reducer>,

    /// Sort the result by COLUMN[:asc|desc].
    #[arg(long = "sort", value_name = "COLUMN[:desc]", value_parser = parse_sort)]
    pub sort: Option<SortArg>,
}

#[derive(Args)]
pub struct TopArgs {
    /// Numeric column to rank by.
    #[arg(long = "column", value_name = "COLUMN")]
    pub column: String,

    /// Take the minimum instead of the maximum.
    #[arg(long = "min")]
    pub min: bool,
}

#[derive(Args)]
pub struct TotalArgs {
    /// Column to reduce.
    #[arg(long = "column", value_name = "COLUMN")]
    pub column: String,

    /// Reduction: sum, mean, max, min or count.
    #[arg(long = "kind", value_name = "KIND", default_value = "sum")]
    pub kind: ReduceKind,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Output file (stdout when omitted).
    #[arg(long = "output", short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum EmptySelectionArg {
    MatchNothing,
    Unconstrained,
}

impl From<EmptySelectionArg> for EmptySelectionPolicy {
    fn from(arg: EmptySelectionArg) -> Self {
        match arg {
            EmptySelectionArg::MatchNothing => Self::MatchNothing,
            EmptySelectionArg::Unconstrained => Self::Unconstrained,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum UnknownColumnArg {
    MatchNothing,
    Ignore,
    Reject,
}

impl From<UnknownColumnArg> for UnknownColumnPolicy {
    fn from(arg: UnknownColumnArg) -> Self {
        match arg {
            UnknownColumnArg::MatchNothing => Self::MatchNothing,
            UnknownColumnArg::Ignore => Self::Ignore,
            UnknownColumnArg::Reject => Self::Reject,
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
