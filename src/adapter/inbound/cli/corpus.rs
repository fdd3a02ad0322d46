//! Handler for the `corpus` command.

use crate::adapter::inbound::cli::command::CorpusArgs;
use crate::adapter::inbound::cli::{operator, output, stage};
use crate::error::Result;
use crate::port::inbound::operator::pipeline::CorpusRequest;

/// Execute the corpus command.
pub fn execute(args: &CorpusArgs) -> Result<()> {
    let request = CorpusRequest {
        options: stage::options(&args.stage)?,
        input_dir: args
            .input_dir
            .as_ref()
            .map(|path| path.to_string_lossy().to_string()),
        chunk_size: args.chunk_size,
        chunk_overlap: args.chunk_overlap,
    };
    let summary = operator::operator()?.corpus(request)?;

    if output::json_result("corpus", &summary) {
        return Ok(());
    }

    output::section("Corpus");
    output::field("Documents", summary.documents);
    output::field("Chunks", summary.chunks);
    output::field("Written", &summary.path);
    Ok(())
}
