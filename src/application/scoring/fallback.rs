//! Degrade-to-lexical scoring combinator.

use std::sync::Arc;

use tracing::warn;

use super::lexical::LexicalScorer;
use crate::domain::SimilarityVerdict;
use crate::port::outbound::scorer::SimilarityScorer;

/// Wraps a primary scorer and answers with the lexical verdict whenever
/// the primary fails.
///
/// [`verdict`](Self::verdict) is infallible, which is what lets the
/// unification engine run without an error path.
#[derive(Clone)]
pub struct Fallback {
    primary: Option<Arc<dyn SimilarityScorer>>,
    lexical: LexicalScorer,
}

impl Fallback {
    pub fn new(primary: Arc<dyn SimilarityScorer>, lexical: LexicalScorer) -> Self {
        Self {
            primary: Some(primary),
            lexical,
        }
    }

    /// Lexical scoring only.
    #[must_use]
    pub fn lexical(lexical: LexicalScorer) -> Self {
        Self {
            primary: None,
            lexical,
        }
    }

    /// Name of the scorer consulted first.
    #[must_use]
    pub fn primary_name(&self) -> &'static str {
        self.primary.as_ref().map_or("lexical", |p| p.name())
    }

    pub async fn verdict(&self, a: &str, b: &str) -> SimilarityVerdict {
        let Some(primary) = &self.primary else {
            return self.lexical.verdict(a, b);
        };
        match primary.score(a, b).await {
            Ok(verdict) => verdict,
            Err(e) => {
                warn!(
                    scorer = primary.name(),
                    error = %e,
                    "similarity scoring failed, using lexical fallback"
                );
                self.lexical.verdict(a, b)
            }
        }
    }
}

impl std::fmt::Debug for Fallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fallback")
            .field("primary", &self.primary_name())
            .field("lexical", &self.lexical)
            .finish()
    }
}
