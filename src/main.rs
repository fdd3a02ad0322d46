use std::process::ExitCode;

use clap::Parser;
use unimarket::adapter::inbound::cli::command::Cli;
use unimarket::adapter::inbound::cli::{diagnostic, dispatch, operator, output};
use unimarket::infrastructure::operator::entry::Operator;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    dispatch::configure(&cli);
    let _ = operator::install(Box::new(Operator::new()));

    match dispatch::execute(&cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if output::is_json() {
                output::error(&error.to_string());
            } else {
                let config_src =
                    std::fs::read_to_string(dispatch::config_path(&cli.command)).ok();
                eprintln!("{:?}", diagnostic::report(error, config_src.as_deref()));
            }
            ExitCode::FAILURE
        }
    }
}
