//! Routes parsed commands to their handlers.

use std::path::Path;

use crate::adapter::inbound::cli::command::{Cli, Commands, ConfigCommand, ColorChoice};
use crate::adapter::inbound::cli::output::{self, OutputConfig};
use crate::adapter::inbound::cli::{collect, config, corpus, report, run, score, unify};
use crate::error::Result;

/// Apply global output flags.
pub fn configure(cli: &Cli) {
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {}
    }
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));
}

/// Configuration file the command reads, used to render diagnostics.
#[must_use]
pub fn config_path(command: &Commands) -> &Path {
    match command {
        Commands::Run(args) => &args.stage.config,
        Commands::Collect(args) => &args.stage.config,
        Commands::Unify(args) => &args.stage.config,
        Commands::Report(args) => &args.stage.config,
        Commands::Score(args) => &args.stage.config,
        Commands::Corpus(args) => &args.stage.config,
        Commands::Config(ConfigCommand::Init(args)) => &args.path,
        Commands::Config(ConfigCommand::Show(args) | ConfigCommand::Validate(args)) => {
            &args.config
        }
    }
}

/// Execute the parsed command.
pub async fn execute(command: &Commands) -> Result<()> {
    match command {
        Commands::Run(args) => run::execute(args).await,
        Commands::Collect(args) => collect::execute(args).await,
        Commands::Unify(args) => unify::execute(args).await,
        Commands::Report(args) => report::execute(args),
        Commands::Score(args) => score::execute(args).await,
        Commands::Corpus(args) => corpus::execute(args),
        Commands::Config(ConfigCommand::Init(args)) => config::execute_init(&args.path, args.force),
        Commands::Config(ConfigCommand::Show(args)) => config::execute_show(&args.config),
        Commands::Config(ConfigCommand::Validate(args)) => config::execute_validate(&args.config),
    }
}
