//! Command-line interface definitions.
//!
//! Defines the CLI structure for the unimarket application using `clap`.
//! Each pipeline stage is its own subcommand so stages can be re-run from
//! the files the previous stage wrote.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use super::paths;

/// Cross-platform prediction market matching and unification CLI
#[derive(Parser, Debug)]
#[command(name = "unimarket")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands for the unimarket CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Collect, unify and report in one pass
    Run(RunArgs),

    /// Fetch listings from every enabled source
    Collect(CollectArgs),

    /// Group a raw batch into unified products
    Unify(UnifyArgs),

    /// Write CSV tables and the analysis report for a unified batch
    Report(ReportArgs),

    /// Score one pair of titles
    Score(ScoreArgs),

    /// Build the retrieval corpus from exported files
    Corpus(CorpusArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `unimarket config`.
///
/// Provides configuration management utilities including generation,
/// display, and validation of configuration files.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Generate a new configuration file from template.
    Init(ConfigInitArgs),
    /// Display the effective configuration with defaults applied.
    Show(ConfigPathArg),
    /// Validate a configuration file for correctness.
    Validate(ConfigPathArg),
}

/// Path to a configuration file.
#[derive(Args, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,
}

/// Arguments for the `config init` subcommand.
#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output path for the generated configuration file.
    #[arg(default_value_os_t = paths::default_config())]
    pub path: PathBuf,
    /// Overwrite the file if it already exists.
    #[arg(long)]
    pub force: bool,
}

/// Options shared by every pipeline stage.
#[derive(Args, Debug)]
pub struct StageArgs {
    /// Path to the configuration file. Defaults apply when it is missing.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,

    /// Override the output directory.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Override log level (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty-printed logs.
    #[arg(long)]
    pub json_logs: bool,
}

/// Matching overrides for stages that unify.
#[derive(Args, Debug)]
pub struct MatchArgs {
    /// Skip the text model even when an API key is available.
    #[arg(long)]
    pub lexical_only: bool,

    /// Override the acceptance threshold (0.0 - 1.0).
    #[arg(long)]
    pub threshold: Option<f64>,
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub stage: StageArgs,

    #[command(flatten)]
    pub matching: MatchArgs,

    /// Serve bundled demo listings instead of calling the platforms.
    #[arg(long)]
    pub demo: bool,

    /// Products listed in the summary table.
    #[arg(long, default_value_t = 10)]
    pub top: usize,
}

/// Arguments for the `collect` subcommand.
#[derive(Args, Debug)]
pub struct CollectArgs {
    #[command(flatten)]
    pub stage: StageArgs,

    /// Serve bundled demo listings instead of calling the platforms.
    #[arg(long)]
    pub demo: bool,
}

/// Arguments for the `unify` subcommand.
#[derive(Args, Debug)]
pub struct UnifyArgs {
    #[command(flatten)]
    pub stage: StageArgs,

    #[command(flatten)]
    pub matching: MatchArgs,

    /// Raw batch to unify. Defaults to `raw_data.json` in the output directory.
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

/// Arguments for the `report` subcommand.
#[derive(Args, Debug)]
pub struct ReportArgs {
    #[command(flatten)]
    pub stage: StageArgs,

    /// Unified file to report on. Defaults to `unified_data.json` in the output directory.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Products listed in the summary table.
    #[arg(long, default_value_t = 10)]
    pub top: usize,
}

/// Arguments for the `score` subcommand.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// First listing title.
    pub a: String,

    /// Second listing title.
    pub b: String,

    #[command(flatten)]
    pub stage: StageArgs,

    /// Skip the text model even when an API key is available.
    #[arg(long)]
    pub lexical_only: bool,
}

/// Arguments for the `corpus` subcommand.
#[derive(Args, Debug)]
pub struct CorpusArgs {
    #[command(flatten)]
    pub stage: StageArgs,

    /// Directory holding a previous run's files. Defaults to the output directory.
    #[arg(short, long)]
    pub input_dir: Option<PathBuf>,

    /// Maximum characters per chunk.
    #[arg(long, default_value_t = 1000)]
    pub chunk_size: usize,

    /// Characters shared by consecutive chunks.
    #[arg(long, default_value_t = 200)]
    pub chunk_overlap: usize,
}
