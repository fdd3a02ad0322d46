//! Flattening groups into table rows.

use std::collections::BTreeMap;

use crate::domain::listing::DEFAULT_CATEGORY;
use crate::domain::metrics::GroupMetrics;
use crate::domain::report::PlatformQuote;
use crate::domain::{ProductRow, SimpleRow, UnifiedGroup};

pub(super) fn product_row(group: &UnifiedGroup, metrics: GroupMetrics) -> ProductRow {
    let mut quotes = BTreeMap::new();
    let mut market_ids = Vec::new();
    let mut categories: BTreeMap<&str, usize> = BTreeMap::new();

    for (platform, payload) in group.primary_payloads() {
        quotes.insert(
            platform.to_string(),
            PlatformQuote {
                price: payload.price,
                volume: payload.volume,
            },
        );
        if !payload.market_id.is_empty() {
            market_ids.push(format!("{platform}:{}", payload.market_id.as_str()));
        }
        *categories.entry(payload.category.as_str()).or_default() += 1;
    }

    let mut listings_per_platform = BTreeMap::new();
    let mut volume_per_platform = BTreeMap::new();
    for (platform, payloads) in &group.platforms {
        listings_per_platform.insert(platform.clone(), payloads.len());
        let volume: f64 = payloads
            .iter()
            .filter_map(|p| p.volume.filter(|v| *v > 0.0))
            .sum();
        volume_per_platform.insert(platform.clone(), volume);
    }

    ProductRow {
        group_id: group.id,
        product_name: group.canonical_name.clone(),
        confidence_score: group.confidence,
        product_count: group.member_count,
        match_reasoning: group.rationale.clone(),
        quotes,
        primary_category: primary_category(&categories),
        metrics,
        market_ids: market_ids.join(" | "),
        listings_per_platform,
        volume_per_platform,
    }
}

/// Most frequent category; ties go to the lexicographically smallest.
fn primary_category(counts: &BTreeMap<&str, usize>) -> String {
    counts
        .iter()
        .fold(None, |best: Option<(&str, usize)>, (&category, &count)| match best {
            Some((_, top)) if top >= count => best,
            _ => Some((category, count)),
        })
        .map_or_else(|| DEFAULT_CATEGORY.to_string(), |(c, _)| c.to_string())
}

/// Condensed rows, ordered by confidence descending.
#[must_use]
pub fn simple_rows(rows: &[ProductRow]) -> Vec<SimpleRow> {
    let mut simple: Vec<SimpleRow> = rows
        .iter()
        .map(|row| SimpleRow {
            product: row.product_name.clone(),
            prices: row
                .quotes
                .iter()
                .map(|(platform, quote)| (platform.clone(), quote.price))
                .collect(),
            best_price: row
                .metrics
                .best_opportunities
                .as_ref()
                .map(|b| b.highest_probability_price),
            price_spread: row.metrics.price_stats.map(|p| p.price_spread),
            confidence: row.confidence_score,
            category: row.primary_category.clone(),
            platforms: row.metrics.platform_coverage.platforms_count,
        })
        .collect();
    simple.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    simple
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_majority_then_alphabetical() {
        let counts = BTreeMap::from([("Politics", 2), ("Crypto", 1)]);
        assert_eq!(primary_category(&counts), "Politics");

        let tied = BTreeMap::from([("Politics", 1), ("Economics", 1)]);
        assert_eq!(primary_category(&tied), "Economics");

        assert_eq!(primary_category(&BTreeMap::new()), DEFAULT_CATEGORY);
    }
}
