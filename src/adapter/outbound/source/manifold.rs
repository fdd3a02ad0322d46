//! Manifold Markets public API source.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use super::http::JsonFetcher;
use crate::domain::RawListing;
use crate::error::Result;
use crate::port::outbound::source::ListingSource;

pub const PLATFORM: &str = "Manifold";

/// Lists recent Manifold markets; only binary markets carry a probability.
pub struct ManifoldSource {
    fetcher: JsonFetcher,
    base_url: String,
    limit: usize,
}

impl ManifoldSource {
    #[must_use]
    pub fn new(base_url: impl Into<String>, limit: usize, timeout: Duration) -> Self {
        Self {
            fetcher: JsonFetcher::new(timeout),
            base_url: base_url.into(),
            limit,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ManifoldMarket {
    #[serde(default)]
    id: String,
    #[serde(default)]
    question: String,
    #[serde(default)]
    probability: Value,
    #[serde(default)]
    volume: Value,
    #[serde(default)]
    is_resolved: bool,
}

fn into_raw(markets: Vec<ManifoldMarket>, limit: usize) -> Vec<RawListing> {
    markets
        .into_iter()
        .filter(|m| !m.is_resolved)
        .take(limit)
        .map(|market| RawListing {
            platform: PLATFORM.to_string(),
            title: market.question,
            price: market.probability,
            volume: market.volume,
            category: None,
            market_id: Value::String(market.id),
            description: String::new(),
        })
        .collect()
}

#[async_trait]
impl ListingSource for ManifoldSource {
    fn name(&self) -> &'static str {
        PLATFORM
    }

    async fn fetch(&self) -> Result<Vec<RawListing>> {
        let url = format!("{}/v0/markets", self.base_url.trim_end_matches('/'));
        // Resolved markets are dropped locally, so over-fetch.
        let markets: Vec<ManifoldMarket> = self
            .fetcher
            .get(&url, &[("limit", (self.limit * 4).to_string())])
            .await?;

        let listings = into_raw(markets, self.limit);
        info!(source = PLATFORM, count = listings.len(), "listings fetched");
        Ok(listings)
    }
}
