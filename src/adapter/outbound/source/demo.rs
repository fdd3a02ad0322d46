//! Bundled demo listings, used offline and as a fallback for failed sources.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::domain::RawListing;
use crate::error::{Result, SourceError};
use crate::port::outbound::source::ListingSource;

/// Platforms with a bundled fixture, in collection order.
pub const DEMO_PLATFORMS: [&str; 4] = ["Polymarket", "Kalshi", "Prediction-Market", "Manifold"];

fn fixture_values(platform: &str) -> Value {
    match platform {
        "Polymarket" => json!([
            {"site": "Polymarket", "product": "Will Trump win 2024 presidential election?", "price": 0.62, "volume": 1_500_000, "category": "Politics", "market_id": "mock_poly_1", "description": "Prediction market for 2024 US Presidential election outcome"},
            {"site": "Polymarket", "product": "Will Democrats control Senate after 2024?", "price": 0.48, "volume": 800_000, "category": "Politics", "market_id": "mock_poly_2", "description": "Senate control prediction for 2024 elections"},
            {"site": "Polymarket", "product": "Bitcoin above $100k by end of 2025?", "price": 0.35, "volume": 2_100_000, "category": "Crypto", "market_id": "mock_poly_3", "description": "Bitcoin price prediction market"}
        ]),
        "Kalshi" => json!([
            {"site": "Kalshi", "product": "Republican to win 2024 presidential election", "price": 0.58, "volume": 1_200_000, "category": "Politics", "market_id": "PRES-24", "description": "2024 Presidential election Republican victory"},
            {"site": "Kalshi", "product": "Democrats to control US Senate in 2025", "price": 0.46, "volume": 600_000, "category": "Politics", "market_id": "SEN-24", "description": "Democratic Senate control prediction"},
            {"site": "Kalshi", "product": "S&P 500 above 6000 by Dec 2025", "price": 0.72, "volume": 900_000, "category": "Economics", "market_id": "SPX-25", "description": "Stock market prediction for S&P 500"}
        ]),
        "Prediction-Market" => json!([
            {"site": "Prediction-Market", "product": "Trump elected president 2024?", "price": 0.59, "volume": 950_000, "category": "Politics", "market_id": "pm_trump_24", "description": "Donald Trump 2024 presidential election prediction"},
            {"site": "Prediction-Market", "product": "Democratic Senate majority 2024", "price": 0.44, "volume": 450_000, "category": "Politics", "market_id": "pm_sen_24", "description": "Senate majority prediction for Democrats"},
            {"site": "Prediction-Market", "product": "AI reaches AGI by 2030", "price": 0.25, "volume": 1_800_000, "category": "Technology", "market_id": "pm_agi_30", "description": "Artificial General Intelligence timeline prediction"},
            {"site": "Prediction-Market", "product": "Ethereum above $5000 by 2025", "price": 0.41, "volume": 750_000, "category": "Crypto", "market_id": "pm_eth_25", "description": "Ethereum price prediction market"}
        ]),
        "Manifold" => json!([
            {"site": "Manifold", "product": "Will there be a US recession in 2025?", "price": 0.32, "volume": 680_000, "category": "Economics", "market_id": "mf_recession_25", "description": "US economic recession prediction for 2025"},
            {"site": "Manifold", "product": "Republican wins 2024 election", "price": 0.61, "volume": 1_100_000, "category": "Politics", "market_id": "mf_gop_24", "description": "GOP victory in 2024 presidential race"}
        ]),
        _ => json!([]),
    }
}

/// Demo listings for `platform`; empty when none are bundled.
#[must_use]
pub fn fixture(platform: &str) -> Vec<RawListing> {
    serde_json::from_value(fixture_values(platform)).unwrap_or_default()
}

/// Every bundled listing, in [`DEMO_PLATFORMS`] order.
#[must_use]
pub fn all_fixtures() -> Vec<RawListing> {
    DEMO_PLATFORMS.iter().flat_map(|p| fixture(p)).collect()
}

/// Serves the bundled listings of one platform.
#[derive(Debug, Clone, Copy)]
pub struct DemoSource {
    platform: &'static str,
}

impl DemoSource {
    #[must_use]
    pub const fn new(platform: &'static str) -> Self {
        Self { platform }
    }
}

#[async_trait]
impl ListingSource for DemoSource {
    fn name(&self) -> &'static str {
        self.platform
    }

    async fn fetch(&self) -> Result<Vec<RawListing>> {
        let listings = fixture(self.platform);
        if listings.is_empty() {
            return Err(SourceError::Empty {
                source_name: self.platform,
            }
            .into());
        }
        Ok(listings)
    }
}
