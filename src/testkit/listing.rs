//! Listing builders and sample titles.

use serde_json::Value;

use crate::domain::{Listing, RawListing};

pub const TRUMP: &str = "Trump wins 2024 election";
pub const REPUBLICAN: &str = "Republican victory in 2024 presidential race";
pub const BITCOIN: &str = "Bitcoin above $100k by 2025";

/// A listing with a price and volume.
pub fn priced(platform: &str, title: &str, price: f64, volume: f64) -> Listing {
    Listing::new(platform, title)
        .with_price(price)
        .with_volume(volume)
}

/// The three-title batch used for order-sensitivity checks.
pub fn order_sensitive() -> Vec<Listing> {
    vec![
        Listing::new("Polymarket", TRUMP),
        Listing::new("Kalshi", REPUBLICAN),
        Listing::new("Manifold", BITCOIN),
    ]
}

/// A raw record with loosely typed price and volume.
pub fn raw(platform: &str, title: &str, price: Value, volume: Value) -> RawListing {
    RawListing {
        platform: platform.to_string(),
        title: title.to_string(),
        price,
        volume,
        ..RawListing::default()
    }
}
