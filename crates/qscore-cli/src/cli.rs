//! CLI argument definitions for the questionnaire scorer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use qscore_model::{ItemCountPolicy, ItemLevelPolicy};

#[derive(Parser)]
#[command(
    name = "qscore",
    version,
    about = "Score questionnaire exports into subscale totals",
    long_about = "Recode, reverse-score, aggregate and validate questionnaire item \
                  responses.\n\n\
                  Reads a merged CSV export, appends one set of subscale columns \
                  per instrument and writes the augmented table."
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
    /// Score instruments over a CSV table.
    Score(ScoreArgs),

    /// List the available instruments.
    Instruments(InstrumentsArgs),
}

#[derive(Parser)]
pub struct ScoreArgs {
    /// CSV table of item responses, one row per respondent.
    #[arg(long = "input", short = 'i', value_name = "CSV")]
    pub input: PathBuf,

    /// Where to write the scored table.
    #[arg(long = "output", short = 'o', value_name = "CSV")]
    pub output: PathBuf,

    /// Instrument to score; repeat for several. Scored in the order given.
    #[arg(
        long = "instrument",
        value_name = "ID",
        required_unless_present = "all",
        conflicts_with = "all"
    )]
    pub instruments: Vec<String>,

    /// Score every instrument in the catalogue whose items are present.
    #[arg(long = "all")]
    pub all: bool,

    /// Keep or drop item-level columns after scoring (drop, keep).
    #[arg(long = "item-level", value_name = "POLICY", default_value = "drop")]
    pub item_level: ItemLevelPolicy,

    /// Emit an `_items_count` column per additive subscale (yes, no).
    #[arg(long = "item-count", value_name = "YES_NO", default_value = "no")]
    pub item_count: ItemCountPolicy,

    /// Fail an instrument on any response its recode table does not know.
    ///
    /// By default, unknown responses are treated as missing and counted in
    /// the summary.
    #[arg(long = "strict")]
    pub strict: bool,

    /// Column naming the respondent (e.g. Parent, Child) for instruments whose
    /// item count depends on it.
    #[arg(long = "respondent-column", value_name = "NAME", default_value = "respondent")]
    pub respondent_column: String,

    /// Extra instrument definitions (TOML).
    #[arg(long = "definitions", value_name = "FILE")]
    pub definitions: Option<PathBuf>,

    /// Let loaded definitions replace built-ins with the same id.
    #[arg(long = "replace-definitions", requires = "definitions")]
    pub replace_definitions: bool,

    /// Relabel set to apply before scoring; repeat for several.
    #[arg(long = "relabel", value_name = "SET")]
    pub relabel: Vec<String>,

    /// Do not strip `<source_prefix>_` qualifiers from column names.
    #[arg(long = "keep-prefix")]
    pub keep_prefix: bool,

    /// Write the per-instrument reports as JSON.
    #[arg(long = "report-json", value_name = "FILE")]
    pub report_json: Option<PathBuf>,
}

#[derive(Parser)]
pub struct InstrumentsArgs {
    /// Extra instrument definitions (TOML) to list alongside the built-ins.
    #[arg(long = "definitions", value_name = "FILE")]
    pub definitions: Option<PathBuf>,

    /// Let loaded definitions replace built-ins with the same id.
    #[arg(long = "replace-definitions", requires = "definitions")]
    pub replace_definitions: bool,
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
