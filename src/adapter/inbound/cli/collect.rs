//! Handler for the `collect` command.

use crate::adapter::inbound::cli::command::CollectArgs;
use crate::adapter::inbound::cli::{operator, output, stage};
use crate::error::Result;
use crate::port::inbound::operator::pipeline::{CollectRequest, CollectSummary};

/// Execute the collect command.
pub async fn execute(args: &CollectArgs) -> Result<()> {
    let request = CollectRequest {
        options: stage::options(&args.stage)?,
        demo: args.demo,
    };
    let service = operator::operator()?;
    let summary = stage::spin(
        "Collecting listings",
        "Listings collected",
        service.collect(request),
    )
    .await?;

    if output::json_result("collect", &summary) {
        return Ok(());
    }
    print_summary(&summary);
    output::hint("next: unimarket unify");
    Ok(())
}

pub(super) fn print_summary(summary: &CollectSummary) {
    output::section("Collection");
    for source in &summary.sources {
        match (&source.error, source.fallback) {
            (None, _) => output::success(&format!("{}: {} listings", source.source, source.fetched)),
            (Some(error), true) => output::warning(&format!(
                "{}: {error}; using {} demo listings",
                source.source, source.fetched
            )),
            (Some(error), false) => output::warning(&format!("{}: {error}", source.source)),
        }
    }
    output::field("Markets", summary.total_markets);
    output::field("Written", &summary.path);
}
