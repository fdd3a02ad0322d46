//! Kalshi trade API source.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use super::http::JsonFetcher;
use super::http::truncate_description;
use crate::domain::listing::coerce_number;
use crate::domain::RawListing;
use crate::error::Result;
use crate::port::outbound::source::ListingSource;

pub const PLATFORM: &str = "Kalshi";

/// Lists open Kalshi markets. Prices are quoted in cents and converted to
/// probabilities.
pub struct KalshiSource {
    fetcher: JsonFetcher,
    base_url: String,
    limit: usize,
}

impl KalshiSource {
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
struct MarketsResponse {
    #[serde(default)]
    markets: Vec<KalshiMarket>,
}

#[derive(Debug, Deserialize)]
struct KalshiMarket {
    #[serde(default)]
    ticker: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    subtitle: Option<String>,
    #[serde(default)]
    yes_bid: Value,
    #[serde(default)]
    volume: Value,
    #[serde(default)]
    category: Option<String>,
}

fn into_raw(response: MarketsResponse, limit: usize) -> Vec<RawListing> {
    response
        .markets
        .into_iter()
        .take(limit)
        .map(|market| RawListing {
            platform: PLATFORM.to_string(),
            title: market
                .title
                .unwrap_or_else(|| "Unknown Market".to_string()),
            price: coerce_number(&market.yes_bid).map_or(Value::Null, |cents| {
                Value::from(cents / 100.0)
            }),
            volume: market.volume,
            category: market.category,
            market_id: Value::String(market.ticker),
            description: truncate_description(market.subtitle.as_deref().unwrap_or("")),
        })
        .collect()
}

#[async_trait]
impl ListingSource for KalshiSource {
    fn name(&self) -> &'static str {
        PLATFORM
    }

    async fn fetch(&self) -> Result<Vec<RawListing>> {
        let url = format!(
            "{}/trade-api/v2/markets",
            self.base_url.trim_end_matches('/')
        );
        let response: MarketsResponse = self
            .fetcher
            .get(
                &url,
                &[
                    ("limit", self.limit.to_string()),
                    ("status", "open".into()),
                ],
            )
            .await?;

        let listings = into_raw(response, self.limit);
        info!(source = PLATFORM, count = listings.len(), "listings fetched");
        Ok(listings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cents_become_probabilities() {
        let response: MarketsResponse = serde_json::from_str(
            r#"{
                "cursor": "abc",
                "markets": [
                    {"ticker": "FED-25MAR", "title": "Fed cuts rates in March?", "subtitle": "FOMC", "yes_bid": 58, "volume": 1200, "category": "Economics"},
                    {"ticker": "NOBID", "title": "Illiquid", "yes_bid": null}
                ]
            }"#,
        )
        .unwrap();

        let raw = into_raw(response, 15);
        assert_eq!(raw[0].price, 0.58);
        assert_eq!(raw[0].market_id, "FED-25MAR");
        assert_eq!(raw[0].description, "FOMC");
        assert!(raw[1].price.is_null());
        assert!(raw[1].category.is_none());
    }

    #[test]
    fn missing_markets_key_is_empty() {
        let response: MarketsResponse = serde_json::from_str("{}").unwrap();
        assert!(into_raw(response, 15).is_empty());
    }
}
