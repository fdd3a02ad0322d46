//! Handler for the `score` command.

use crate::adapter::inbound::cli::command::ScoreArgs;
use crate::adapter::inbound::cli::{operator, output, stage};
use crate::error::Result;
use crate::port::inbound::operator::pipeline::ScoreRequest;

/// Execute the score command.
pub async fn execute(args: &ScoreArgs) -> Result<()> {
    let request = ScoreRequest {
        options: stage::options(&args.stage)?,
        a: args.a.clone(),
        b: args.b.clone(),
        lexical_only: args.lexical_only,
    };
    let view = operator::operator()?.score(request).await?;

    if output::json_result("score", &view) {
        return Ok(());
    }

    output::section("Normalized");
    output::field("A", &view.normalized_a);
    output::field("B", &view.normalized_b);

    output::section("Lexical");
    output::field("Keywords", format!("{:.3}", view.keyword_similarity));
    output::field("Sequence", format!("{:.3}", view.sequence_similarity));

    output::section("Verdict");
    output::field("Scorer", &view.scorer);
    output::field("Same event", view.verdict.same_event);
    output::field("Confidence", format!("{:.3}", view.verdict.confidence));
    output::field("Name", &view.verdict.canonical_name);
    output::field("Reasoning", &view.verdict.rationale);
    if view.accepted {
        output::success(&format!("Merged (confidence > {})", view.threshold));
    } else {
        output::note(&format!("Not merged (needs same event and confidence > {})", view.threshold));
    }
    Ok(())
}
