//! Per-group price and volume statistics.

use serde::{Deserialize, Serialize};

/// Price statistics across the platforms of one group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceStats {
    pub min_price: f64,
    pub max_price: f64,
    pub avg_price: f64,
    pub price_spread: f64,
    /// Population variance (divides by the sample count).
    pub price_variance: f64,
}

/// Volume statistics across the platforms of one group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeStats {
    pub total_volume: f64,
    pub avg_volume: f64,
    pub max_volume: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlatformCoverage {
    pub platforms_count: usize,
    pub platforms_list: Vec<String>,
}

/// The platform quoting the highest probability, and whether the spread
/// between platforms is wide enough to flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestOpportunity {
    pub highest_probability_platform: String,
    pub highest_probability_price: f64,
    pub arbitrage_opportunity: bool,
}

/// Everything derived from one unified group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupMetrics {
    pub price_stats: Option<PriceStats>,
    pub volume_stats: Option<VolumeStats>,
    pub platform_coverage: PlatformCoverage,
    pub best_opportunities: Option<BestOpportunity>,
}

impl GroupMetrics {
    /// True when a cross-platform spread exceeded the arbitrage margin.
    #[must_use]
    pub fn has_arbitrage(&self) -> bool {
        self.best_opportunities
            .as_ref()
            .is_some_and(|b| b.arbitrage_opportunity)
    }
}
