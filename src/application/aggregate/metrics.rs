//! Per-group metrics.
//!
//! Everything here is pure: no I/O and no failure path. Missing or
//! non-positive prices and volumes are simply left out of the statistics.

use super::row::product_row;
use crate::domain::metrics::{
    BestOpportunity, GroupMetrics, PlatformCoverage, PriceStats, VolumeStats,
};
use crate::domain::{ProductRow, UnifiedBatch, UnifiedGroup};

/// Default spread above which a group is flagged as an arbitrage candidate.
pub const DEFAULT_ARBITRAGE_MARGIN: f64 = 0.05;

/// Derives metrics and rows from unified groups.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregator {
    arbitrage_margin: f64,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(DEFAULT_ARBITRAGE_MARGIN)
    }
}

impl Aggregator {
    #[must_use]
    pub const fn new(arbitrage_margin: f64) -> Self {
        Self { arbitrage_margin }
    }

    /// Metrics over the first payload of each platform.
    #[must_use]
    pub fn group_metrics(&self, group: &UnifiedGroup) -> GroupMetrics {
        let mut prices: Vec<(&str, f64)> = Vec::new();
        let mut volumes: Vec<f64> = Vec::new();
        for (platform, payload) in group.primary_payloads() {
            if let Some(price) = payload.price.filter(|p| *p > 0.0) {
                prices.push((platform, price));
            }
            if let Some(volume) = payload.volume.filter(|v| *v > 0.0) {
                volumes.push(volume);
            }
        }

        let price_stats = price_stats(&prices);
        let best_opportunities = price_stats.and_then(|stats| {
            best_price(&prices).map(|(platform, price)| BestOpportunity {
                highest_probability_platform: platform.to_string(),
                highest_probability_price: price,
                arbitrage_opportunity: stats.max_price - stats.min_price > self.arbitrage_margin,
            })
        });

        GroupMetrics {
            price_stats,
            volume_stats: volume_stats(&volumes),
            platform_coverage: PlatformCoverage {
                platforms_count: group.platforms.len(),
                platforms_list: group.platforms.keys().cloned().collect(),
            },
            best_opportunities,
        }
    }

    /// One row per group, ordered by confidence then total volume, both
    /// descending.
    #[must_use]
    pub fn product_rows(&self, batch: &UnifiedBatch) -> Vec<ProductRow> {
        let mut rows: Vec<ProductRow> = batch
            .iter()
            .map(|group| product_row(group, self.group_metrics(group)))
            .collect();
        rows.sort_by(|a, b| {
            b.confidence_score
                .total_cmp(&a.confidence_score)
                .then_with(|| b.total_volume().total_cmp(&a.total_volume()))
        });
        rows
    }
}

/// [`Aggregator::group_metrics`] with the default arbitrage margin.
#[must_use]
pub fn group_metrics(group: &UnifiedGroup) -> GroupMetrics {
    Aggregator::default().group_metrics(group)
}

/// [`Aggregator::product_rows`] with the default arbitrage margin.
#[must_use]
pub fn product_rows(batch: &UnifiedBatch) -> Vec<ProductRow> {
    Aggregator::default().product_rows(batch)
}

fn price_stats(prices: &[(&str, f64)]) -> Option<PriceStats> {
    if prices.is_empty() {
        return None;
    }
    let count = prices.len() as f64;
    let min = prices.iter().map(|(_, p)| *p).fold(f64::INFINITY, f64::min);
    let max = prices.iter().map(|(_, p)| *p).fold(f64::NEG_INFINITY, f64::max);
    let avg = prices.iter().map(|(_, p)| p).sum::<f64>() / count;
    let variance = prices.iter().map(|(_, p)| (p - avg).powi(2)).sum::<f64>() / count;

    Some(PriceStats {
        min_price: min,
        max_price: max,
        avg_price: avg,
        price_spread: if prices.len() > 1 { max - min } else { 0.0 },
        price_variance: variance,
    })
}

/// Highest price; the first platform wins ties.
fn best_price<'a>(prices: &[(&'a str, f64)]) -> Option<(&'a str, f64)> {
    prices.iter().copied().fold(None, |best, (platform, price)| match best {
        Some((_, top)) if top >= price => best,
        _ => Some((platform, price)),
    })
}

fn volume_stats(volumes: &[f64]) -> Option<VolumeStats> {
    if volumes.is_empty() {
        return None;
    }
    let total: f64 = volumes.iter().sum();
    Some(VolumeStats {
        total_volume: total,
        avg_volume: total / volumes.len() as f64,
        max_volume: volumes.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    })
}
