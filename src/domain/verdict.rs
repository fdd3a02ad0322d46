//! Pairwise same-event verdicts.

use serde::{Deserialize, Serialize};

/// A scorer's judgement on whether two titles describe the same event.
///
/// Verdicts are transient: the engine consumes each one immediately and
/// keeps only the accepted ones as [`MatchRecord`]s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityVerdict {
    /// Categorical same-event label.
    pub same_event: bool,
    /// Probability-like score in `[0, 1]`.
    pub confidence: f64,
    /// Proposed name for the merged event.
    pub canonical_name: String,
    /// Short human-readable explanation.
    pub rationale: String,
}

impl SimilarityVerdict {
    /// Create a verdict, clamping confidence into `[0, 1]`.
    ///
    /// A non-finite confidence is treated as zero.
    pub fn new(
        same_event: bool,
        confidence: f64,
        canonical_name: impl Into<String>,
        rationale: impl Into<String>,
    ) -> Self {
        let confidence = if confidence.is_finite() {
            confidence.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            same_event,
            confidence,
            canonical_name: canonical_name.into(),
            rationale: rationale.into(),
        }
    }
}

/// An accepted pairwise verdict, retained as match provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Title of the listing that anchored the group.
    pub anchor: String,
    /// Title of the listing that joined.
    pub candidate: String,
    /// Platform of the listing that joined.
    pub platform: String,
    pub confidence: f64,
    pub rationale: String,
}
