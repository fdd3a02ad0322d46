//! Flattened rows and corpus-level report types.
//!
//! These are the stable output schema consumed by exporters and by the
//! retrieval corpus builder.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::id::GroupId;
use super::metrics::GroupMetrics;

/// Price and volume a platform quotes for one group (first payload only).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlatformQuote {
    pub price: Option<f64>,
    pub volume: Option<f64>,
}

/// One comprehensive row per unified group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRow {
    pub group_id: GroupId,
    pub product_name: String,
    pub confidence_score: f64,
    pub product_count: usize,
    pub match_reasoning: String,
    pub quotes: BTreeMap<String, PlatformQuote>,
    pub primary_category: String,
    pub metrics: GroupMetrics,
    /// `platform:market_id` pairs joined with ` | `.
    pub market_ids: String,
    /// Every payload count per platform, including secondary payloads.
    pub listings_per_platform: BTreeMap<String, usize>,
    /// Summed valid volume per platform over every payload.
    pub volume_per_platform: BTreeMap<String, f64>,
}

impl ProductRow {
    /// Total volume used for ordering rows (zero when unknown).
    #[must_use]
    pub fn total_volume(&self) -> f64 {
        self.metrics
            .volume_stats
            .map_or(0.0, |v| v.total_volume)
    }
}

/// Condensed row for quick comparison tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleRow {
    pub product: String,
    pub prices: BTreeMap<String, Option<f64>>,
    pub best_price: Option<f64>,
    pub price_spread: Option<f64>,
    pub confidence: f64,
    pub category: String,
    pub platforms: usize,
}

/// Confidence bands used by the corpus report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConfidenceBucket {
    /// `[0.8, 1.0]`
    High,
    /// `[0.6, 0.8)`
    Medium,
    /// `[0.0, 0.6)`
    Low,
}

impl ConfidenceBucket {
    #[must_use]
    pub fn of(confidence: f64) -> Self {
        if confidence >= 0.8 {
            Self::High
        } else if confidence >= 0.6 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High (0.8-1.0)",
            Self::Medium => "Medium (0.6-0.8)",
            Self::Low => "Low (0.0-0.6)",
        }
    }
}

impl fmt::Display for ConfidenceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidenceDistribution {
    #[serde(rename = "High (0.8-1.0)")]
    pub high: usize,
    #[serde(rename = "Medium (0.6-0.8)")]
    pub medium: usize,
    #[serde(rename = "Low (0.0-0.6)")]
    pub low: usize,
}

impl ConfidenceDistribution {
    pub fn record(&mut self, confidence: f64) {
        match ConfidenceBucket::of(confidence) {
            ConfidenceBucket::High => self.high += 1,
            ConfidenceBucket::Medium => self.medium += 1,
            ConfidenceBucket::Low => self.low += 1,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlatformTotals {
    pub count: usize,
    pub total_volume: f64,
}

/// Corpus-level statistics over a whole batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorpusReport {
    pub platform_coverage: BTreeMap<String, PlatformTotals>,
    pub category_breakdown: BTreeMap<String, usize>,
    pub confidence_distribution: ConfidenceDistribution,
    pub total_products: usize,
    pub arbitrage_opportunities: usize,
}

/// One line of the flattened summary statistics table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    #[serde(rename = "Metric_Category")]
    pub metric_category: String,
    #[serde(rename = "Metric_Name")]
    pub metric_name: String,
    #[serde(rename = "Value")]
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_bounds_are_half_open() {
        assert_eq!(ConfidenceBucket::of(1.0), ConfidenceBucket::High);
        assert_eq!(ConfidenceBucket::of(0.8), ConfidenceBucket::High);
        assert_eq!(ConfidenceBucket::of(0.7999), ConfidenceBucket::Medium);
        assert_eq!(ConfidenceBucket::of(0.6), ConfidenceBucket::Medium);
        assert_eq!(ConfidenceBucket::of(0.5999), ConfidenceBucket::Low);
        assert_eq!(ConfidenceBucket::of(0.0), ConfidenceBucket::Low);
    }

    #[test]
    fn distribution_serializes_with_band_labels() {
        let mut dist = ConfidenceDistribution::default();
        dist.record(0.95);
        dist.record(0.7);
        dist.record(0.7);

        let json = serde_json::to_value(dist).unwrap();
        assert_eq!(json["High (0.8-1.0)"], 1);
        assert_eq!(json["Medium (0.6-0.8)"], 2);
        assert_eq!(json["Low (0.0-0.6)"], 0);
        assert_eq!(dist.total(), 3);
    }
}
