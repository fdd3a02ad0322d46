//! Pairwise similarity scoring port.

use async_trait::async_trait;

use crate::domain::SimilarityVerdict;
use crate::error::Result;

/// Decides whether two listing titles describe the same real-world event.
///
/// Scorers are called concurrently by the unification engine and must be
/// `Send + Sync`. A scorer may fail; the engine only ever consumes scorers
/// through [`Fallback`](crate::application::scoring::fallback::Fallback), which turns
/// failures into a lexical verdict.
#[async_trait]
pub trait SimilarityScorer: Send + Sync {
    /// Scorer name for logs.
    fn name(&self) -> &'static str;

    /// Score the raw titles `a` and `b`.
    ///
    /// The returned confidence is already clamped to `[0, 1]`.
    async fn score(&self, a: &str, b: &str) -> Result<SimilarityVerdict>;
}
