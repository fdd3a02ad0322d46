//! Polymarket Gamma API source.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use super::http::JsonFetcher;
use super::http::truncate_description;
use crate::domain::RawListing;
use crate::error::Result;
use crate::port::outbound::source::ListingSource;

pub const PLATFORM: &str = "Polymarket";

/// Markets kept per event.
const MARKETS_PER_EVENT: usize = 2;

/// Lists active Gamma events; each event contributes up to two markets
/// titled after the event.
pub struct PolymarketSource {
    fetcher: JsonFetcher,
    base_url: String,
    limit: usize,
}

impl PolymarketSource {
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
struct GammaEvent {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    markets: Vec<GammaMarket>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GammaMarket {
    #[serde(default)]
    id: Value,
    #[serde(default)]
    last_trade_price: Value,
    #[serde(default)]
    last_price: Value,
    #[serde(default)]
    volume: Value,
}

fn into_raw(events: Vec<GammaEvent>, limit: usize) -> Vec<RawListing> {
    events
        .into_iter()
        .take(limit)
        .flat_map(|event| {
            let title = event
                .title
                .unwrap_or_else(|| "Unknown Event".to_string());
            let description = truncate_description(event.description.as_deref().unwrap_or(""));
            let category = event.category;
            event
                .markets
                .into_iter()
                .take(MARKETS_PER_EVENT)
                .map(move |market| RawListing {
                    platform: PLATFORM.to_string(),
                    title: title.clone(),
                    price: if market.last_trade_price.is_null() {
                        market.last_price
                    } else {
                        market.last_trade_price
                    },
                    volume: market.volume,
                    category: category.clone(),
                    market_id: market.id,
                    description: description.clone(),
                })
        })
        .collect()
}

#[async_trait]
impl ListingSource for PolymarketSource {
    fn name(&self) -> &'static str {
        PLATFORM
    }

    async fn fetch(&self) -> Result<Vec<RawListing>> {
        let url = format!("{}/events", self.base_url.trim_end_matches('/'));
        let events: Vec<GammaEvent> = self
            .fetcher
            .get(
                &url,
                &[
                    ("limit", self.limit.to_string()),
                    ("active", "true".into()),
                    ("closed", "false".into()),
                ],
            )
            .await?;

        let listings = into_raw(events, self.limit);
        info!(source = PLATFORM, count = listings.len(), "listings fetched");
        Ok(listings)
    }
}
