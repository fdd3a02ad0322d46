//! Deterministic keyword + character-sequence scorer.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;

use crate::application::normalize::keywords;
use crate::domain::SimilarityVerdict;
use crate::error::Result;
use crate::port::outbound::scorer::SimilarityScorer;

/// Rule-based scorer blending keyword overlap with sequence similarity.
///
/// `combined = keyword_weight * jaccard + sequence_weight * sequence`, and
/// the pair is the same event when `combined` strictly exceeds the
/// threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LexicalScorer {
    keyword_weight: f64,
    sequence_weight: f64,
    threshold: f64,
}

impl Default for LexicalScorer {
    fn default() -> Self {
        Self::new(0.7, 0.3, 0.65)
    }
}

impl LexicalScorer {
    #[must_use]
    pub const fn new(keyword_weight: f64, sequence_weight: f64, threshold: f64) -> Self {
        Self {
            keyword_weight,
            sequence_weight,
            threshold,
        }
    }

    /// Score two raw titles. Never fails.
    #[must_use]
    pub fn verdict(&self, a: &str, b: &str) -> SimilarityVerdict {
        let keyword = jaccard(&keywords(a), &keywords(b));
        let sequence = sequence_ratio(a, b);
        let combined = self.keyword_weight * keyword + self.sequence_weight * sequence;

        SimilarityVerdict::new(
            combined > self.threshold,
            combined,
            shorter(a, b),
            format!("Rule-based matching: {keyword:.2} keyword + {sequence:.2} sequence similarity"),
        )
    }
}

#[async_trait]
impl SimilarityScorer for LexicalScorer {
    fn name(&self) -> &'static str {
        "lexical"
    }

    async fn score(&self, a: &str, b: &str) -> Result<SimilarityVerdict> {
        Ok(self.verdict(a, b))
    }
}

/// Shorter title by character count; `a` wins ties.
fn shorter<'a>(a: &'a str, b: &'a str) -> &'a str {
    if a.chars().count() <= b.chars().count() {
        a
    } else {
        b
    }
}

/// Intersection over union; zero when both sets are empty.
#[must_use]
pub fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

/// Ratcliff/Obershelp similarity `2 * M / T` over lowercased characters.
///
/// `M` counts characters in the matching blocks found by recursively taking
/// the longest common substring; `T` is the combined length. Two empty
/// strings are identical. No characters are treated as junk, whatever the
/// input length.
#[must_use]
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_chars(&a, &b) as f64 / total as f64
}

fn matching_chars(a: &[char], b: &[char]) -> usize {
    let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, c) in b.iter().enumerate() {
        b2j.entry(*c).or_default().push(j);
    }

    let mut matched = 0;
    let mut queue = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, k) = longest_match(a, &b2j, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        matched += k;
        if alo < i && blo < j {
            queue.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            queue.push((i + k, ahi, j + k, bhi));
        }
    }
    matched
}

/// Longest block `a[i..i+k] == b[j..j+k]` within the given bounds.
///
/// Ties resolve to the earliest `i`, then the earliest `j`.
fn longest_match(
    a: &[char],
    b2j: &HashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_k) = (alo, blo, 0);
    let mut run: HashMap<usize, usize> = HashMap::new();

    for (i, c) in a.iter().enumerate().take(ahi).skip(alo) {
        let mut next: HashMap<usize, usize> = HashMap::new();
        if let Some(positions) = b2j.get(c) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let k = j
                    .checked_sub(1)
                    .and_then(|prev| run.get(&prev))
                    .copied()
                    .unwrap_or(0)
                    + 1;
                next.insert(j, k);
                if k > best_k {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_k = k;
                }
            }
        }
        run = next;
    }
    (best_i, best_j, best_k)
}
