//! Handler for the `unify` command.

use crate::adapter::inbound::cli::command::UnifyArgs;
use crate::adapter::inbound::cli::{operator, output, stage};
use crate::error::Result;
use crate::port::inbound::operator::pipeline::{UnifyRequest, UnifySummary};

/// Execute the unify command.
pub async fn execute(args: &UnifyArgs) -> Result<()> {
    let request = UnifyRequest {
        options: stage::options(&args.stage)?,
        input: args
            .input
            .as_ref()
            .map(|path| path.to_string_lossy().to_string()),
        lexical_only: args.matching.lexical_only,
        threshold: args.matching.threshold,
    };
    let service = operator::operator()?;
    let summary = stage::spin("Unifying listings", "Listings unified", service.unify(request)).await?;

    if output::json_result("unify", &summary) {
        return Ok(());
    }
    print_summary(&summary);
    output::hint("next: unimarket report");
    Ok(())
}

pub(super) fn print_summary(summary: &UnifySummary) {
    output::section("Unification");
    output::field("Scorer", &summary.scorer);
    output::field("Markets", summary.original_markets);
    if summary.quarantined > 0 {
        output::warning(&format!(
            "{} malformed records quarantined",
            summary.quarantined
        ));
    }
    output::field("Groups", summary.unified_groups);
    output::field(
        "Compression",
        format!("{:.1}%", summary.compression_ratio * 100.0),
    );
    output::field("High conf.", summary.high_confidence_matches);
    output::field("Written", &summary.path);
}
