//! Greedy, order-anchored unification of listings into groups.
//!
//! # Algorithm
//!
//! ```text
//! for each unowned listing i (input order):
//!     open group {i}
//!     for each unowned j > i (fixed when i is opened), in j order:
//!         verdict = scorer(title[i], title[j])
//!         if verdict.same_event && verdict.confidence > threshold:
//!             add j, mark j owned
//!     close group
//! ```
//!
//! Candidates are compared against the anchor only, so matching is not
//! transitive: with A~B, B~C and A≁C the result is {A, B}, {C}. Scoring of
//! one anchor's candidates may run concurrently, but verdicts are applied
//! in `j` order so the output equals the sequential result.

use std::collections::BTreeMap;

use futures_util::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::application::scoring::fallback::Fallback;
use crate::domain::{
    GroupId, Listing, MatchRecord, PlatformPayload, SimilarityVerdict, UnifiedBatch, UnifiedGroup,
};

/// Rationale carried by a group until its first merge.
pub const PRIMARY_RATIONALE: &str = "Primary listing";

/// Partitions a batch of listings into [`UnifiedGroup`]s.
#[derive(Debug, Clone)]
pub struct Unifier {
    scorer: Fallback,
    threshold: f64,
    max_concurrency: usize,
}

impl Unifier {
    /// Engine with the default threshold (0.65) and concurrency (4).
    pub fn new(scorer: Fallback) -> Self {
        Self {
            scorer,
            threshold: 0.65,
            max_concurrency: 4,
        }
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Cap on in-flight scorer calls per anchor (at least one).
    #[must_use]
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    #[must_use]
    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Acceptance policy: the scorer must say "same" and be strictly more
    /// confident than the threshold.
    #[must_use]
    pub fn accepts(&self, verdict: &SimilarityVerdict) -> bool {
        verdict.same_event && verdict.confidence > self.threshold
    }

    /// Partition `listings` into groups.
    ///
    /// Every listing lands in exactly one group. An empty slice yields an
    /// empty batch without consulting the scorer.
    pub async fn unify(&self, listings: &[Listing]) -> UnifiedBatch {
        let mut owned = vec![false; listings.len()];
        let mut batch = UnifiedBatch::new();
        let mut seq = 0;
        let mut merges = 0;

        info!(
            listings = listings.len(),
            scorer = self.scorer.primary_name(),
            threshold = self.threshold,
            "unification started"
        );

        for (i, anchor) in listings.iter().enumerate() {
            if owned[i] {
                continue;
            }
            owned[i] = true;

            let candidates: Vec<usize> = (i + 1..listings.len()).filter(|&j| !owned[j]).collect();
            let mut group = GroupBuilder::new(anchor);

            let mut verdicts = stream::iter(candidates.into_iter().map(|j| {
                let scorer = &self.scorer;
                let a = anchor.title.as_str();
                let b = listings[j].title.as_str();
                async move { (j, scorer.verdict(a, b).await) }
            }))
            .buffered(self.max_concurrency);

            while let Some((j, verdict)) = verdicts.next().await {
                if !self.accepts(&verdict) {
                    continue;
                }
                debug!(
                    anchor = %anchor.title,
                    candidate = %listings[j].title,
                    confidence = verdict.confidence,
                    "match accepted"
                );
                owned[j] = true;
                merges += 1;
                group.merge(anchor, &listings[j], verdict);
            }

            seq += 1;
            let group = group.finish(GroupId::new(seq));
            let (id, name) = (group.id, group.canonical_name.clone());
            if let Some(shadowed) = batch.push(group) {
                warn!(
                    canonical_name = %name,
                    group = %id,
                    shadowed = %shadowed,
                    "canonical name collision, keeping both groups"
                );
            }
        }

        info!(
            listings = listings.len(),
            groups = batch.len(),
            merges,
            "unification complete"
        );
        batch
    }
}

/// A group while its anchor is still scanning candidates.
struct GroupBuilder<'a> {
    canonical_name: String,
    confidence: f64,
    rationale: String,
    matches: Vec<MatchRecord>,
    members: Vec<&'a Listing>,
}

impl<'a> GroupBuilder<'a> {
    fn new(anchor: &'a Listing) -> Self {
        Self {
            canonical_name: anchor.title.clone(),
            confidence: 1.0,
            rationale: PRIMARY_RATIONALE.to_string(),
            matches: Vec::new(),
            members: vec![anchor],
        }
    }

    fn merge(&mut self, anchor: &Listing, candidate: &'a Listing, verdict: SimilarityVerdict) {
        self.canonical_name = verdict.canonical_name;
        self.confidence = self.confidence.min(verdict.confidence);
        self.rationale = verdict.rationale.clone();
        self.matches.push(MatchRecord {
            anchor: anchor.title.clone(),
            candidate: candidate.title.clone(),
            platform: candidate.platform.clone(),
            confidence: verdict.confidence,
            rationale: verdict.rationale,
        });
        self.members.push(candidate);
    }

    fn finish(self, id: GroupId) -> UnifiedGroup {
        let mut platforms: BTreeMap<String, Vec<PlatformPayload>> = BTreeMap::new();
        for member in &self.members {
            platforms
                .entry(member.platform.clone())
                .or_default()
                .push(member.payload());
        }

        UnifiedGroup {
            id,
            canonical_name: self.canonical_name,
            confidence: self.confidence,
            rationale: self.rationale,
            matches: self.matches,
            member_count: self.members.len(),
            platforms,
        }
    }
}
