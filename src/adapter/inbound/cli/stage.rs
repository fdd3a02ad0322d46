//! Helpers shared by the pipeline stage handlers.

use std::future::Future;

use crate::adapter::inbound::cli::command::StageArgs;
use crate::adapter::inbound::cli::{operator, output};
use crate::error::Result;
use crate::port::inbound::operator::pipeline::StageOptions;

/// Build transport-agnostic stage options from CLI arguments.
///
/// JSON output forces JSON logs so stdout and stderr stay machine-readable.
pub fn options(args: &StageArgs) -> Result<StageOptions> {
    Ok(StageOptions {
        config_toml: operator::read_stage_config(&args.config)?,
        output_dir: args
            .output_dir
            .as_ref()
            .map(|path| path.to_string_lossy().to_string()),
        log_level: args.log_level.clone().or_else(verbosity_level),
        json_logs: args.json_logs || output::is_json(),
    })
}

fn verbosity_level() -> Option<String> {
    let level = match (output::is_quiet(), output::verbosity()) {
        (true, _) => "error",
        (false, 0) => return None,
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    Some(level.to_string())
}

/// Await `work` behind a spinner.
pub async fn spin<T>(
    message: &str,
    done: &str,
    work: impl Future<Output = Result<T>>,
) -> Result<T> {
    let pb = output::spinner(message);
    match work.await {
        Ok(value) => {
            output::spinner_success(&pb, done);
            Ok(value)
        }
        Err(e) => {
            output::spinner_fail(&pb, &format!("{message} failed"));
            Err(e)
        }
    }
}

/// Format an optional probability, `-` when absent.
pub fn price(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.3}"))
}
