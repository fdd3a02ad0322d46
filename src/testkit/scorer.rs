//! Deterministic [`SimilarityScorer`] doubles.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::domain::SimilarityVerdict;
use crate::error::{Error, Result};
use crate::port::outbound::scorer::SimilarityScorer;

use super::listing::{BITCOIN, REPUBLICAN, TRUMP};

/// Answers from a table of title pairs.
///
/// Pairs are symmetric. Unlisted pairs get a "different event" verdict
/// with zero confidence.
#[derive(Default)]
pub struct ScriptedScorer {
    verdicts: HashMap<(String, String), SimilarityVerdict>,
    calls: AtomicUsize,
}

impl ScriptedScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the verdict for `a` vs `b`.
    #[must_use]
    pub fn with(mut self, a: &str, b: &str, verdict: SimilarityVerdict) -> Self {
        self.verdicts
            .insert((a.to_string(), b.to_string()), verdict.clone());
        self.verdicts.insert((b.to_string(), a.to_string()), verdict);
        self
    }

    /// Script a same-event verdict that names the group after `a`.
    #[must_use]
    pub fn same(self, a: &str, b: &str, confidence: f64) -> Self {
        let verdict = SimilarityVerdict::new(true, confidence, a, format!("scripted {confidence}"));
        self.with(a, b, verdict)
    }

    /// [`TRUMP`] matches [`REPUBLICAN`]; [`BITCOIN`] matches neither.
    pub fn order_sensitive() -> Self {
        Self::new()
            .same(TRUMP, REPUBLICAN, 0.82)
            .with(TRUMP, BITCOIN, SimilarityVerdict::new(false, 0.1, TRUMP, "unrelated"))
            .with(
                REPUBLICAN,
                BITCOIN,
                SimilarityVerdict::new(false, 0.05, REPUBLICAN, "unrelated"),
            )
    }

    /// Number of pairs scored so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SimilarityScorer for ScriptedScorer {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn score(&self, a: &str, b: &str) -> Result<SimilarityVerdict> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .verdicts
            .get(&(a.to_string(), b.to_string()))
            .cloned()
            .unwrap_or_else(|| SimilarityVerdict::new(false, 0.0, a, "scripted: no match")))
    }
}

/// Fails every pair.
pub struct FailingScorer;

#[async_trait]
impl SimilarityScorer for FailingScorer {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn score(&self, _a: &str, _b: &str) -> Result<SimilarityVerdict> {
        Err(Error::Connection("scorer unavailable".into()))
    }
}
