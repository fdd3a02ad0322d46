//! Similarity scorer factory.

use std::sync::Arc;
use std::time::Duration;

use crate::application::scoring::fallback::Fallback;
use crate::application::scoring::lexical::LexicalScorer;
use crate::application::scoring::semantic::SemanticScorer;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::llm::Llm;

/// Wrap `llm` in the semantic scorer, falling back to lexical scoring.
///
/// Without a client the result scores lexically only.
pub fn build_scorer(config: &Config, llm: Option<Arc<dyn Llm>>) -> Fallback {
    let matching = &config.matching;
    let lexical = LexicalScorer::new(
        matching.keyword_weight,
        matching.sequence_weight,
        matching.threshold,
    );
    match llm {
        Some(llm) => {
            let timeout = Duration::from_secs(config.llm.timeout_secs);
            Fallback::new(Arc::new(SemanticScorer::new(llm, timeout)), lexical)
        }
        None => Fallback::lexical(lexical),
    }
}
