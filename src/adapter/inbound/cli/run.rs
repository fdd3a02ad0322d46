//! Handler for the `run` command.

use crate::adapter::inbound::cli::command::RunArgs;
use crate::adapter::inbound::cli::{collect, operator, output, report, stage, unify};
use crate::error::Result;
use crate::port::inbound::operator::pipeline::RunRequest;

/// Execute the run command.
pub async fn execute(args: &RunArgs) -> Result<()> {
    let request = RunRequest {
        options: stage::options(&args.stage)?,
        demo: args.demo,
        lexical_only: args.matching.lexical_only,
        threshold: args.matching.threshold,
        top: args.top,
    };
    let service = operator::operator()?;

    if !output::is_json() {
        output::header(env!("CARGO_PKG_VERSION"));
        if args.demo {
            output::warning("Demo mode enabled - platforms will not be queried");
        }
    }

    let summary = stage::spin(
        "Collecting, unifying and reporting",
        "Run complete",
        service.run(request),
    )
    .await?;

    if output::json_result("run", &summary) {
        return Ok(());
    }
    collect::print_summary(&summary.collect);
    unify::print_summary(&summary.unify);
    report::print_summary(&summary.report);
    output::hint("next: unimarket corpus");
    Ok(())
}
