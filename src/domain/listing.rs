//! Market listings: one platform's view of one market.
//!
//! Sources produce loosely typed [`RawListing`] records (the shape stored in
//! `raw_data.json`). They are validated into [`Listing`] at the boundary
//! before anything reaches the unification engine.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::error::DomainError;
use super::id::MarketId;

/// Category assigned when a source does not supply one.
pub const DEFAULT_CATEGORY: &str = "General";

/// A listing exactly as a source delivered it.
///
/// Price and volume stay as raw JSON values because platforms disagree on
/// their encoding (numbers, numeric strings, `"N/A"`, `null`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawListing {
    #[serde(rename = "site", alias = "platform", default)]
    pub platform: String,

    #[serde(rename = "product", alias = "title", alias = "market_name", default)]
    pub title: String,

    #[serde(default)]
    pub price: Value,

    #[serde(default)]
    pub volume: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default)]
    pub market_id: Value,

    #[serde(default)]
    pub description: String,
}

/// A validated listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub platform: String,
    pub title: String,
    /// Implied probability in `[0, 1]`, or `None` when unknown.
    pub price: Option<f64>,
    /// Traded volume, or `None` when unknown.
    pub volume: Option<f64>,
    pub category: String,
    pub market_id: MarketId,
    pub description: String,
}

impl Listing {
    /// Create a listing with unknown price/volume and default category.
    pub fn new(platform: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            title: title.into(),
            price: None,
            volume: None,
            category: DEFAULT_CATEGORY.to_string(),
            market_id: MarketId::default(),
            description: String::new(),
        }
    }

    /// Set the price, dropping values outside `[0, 1]`.
    #[must_use]
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = valid_price(price);
        self
    }

    /// Set the volume, dropping negative or non-finite values.
    #[must_use]
    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = valid_volume(volume);
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    #[must_use]
    pub fn with_market_id(mut self, market_id: impl Into<MarketId>) -> Self {
        self.market_id = market_id.into();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Platform-specific attributes carried into a unified group.
    #[must_use]
    pub fn payload(&self) -> PlatformPayload {
        PlatformPayload {
            title: self.title.clone(),
            price: self.price,
            volume: self.volume,
            category: self.category.clone(),
            market_id: self.market_id.clone(),
            description: self.description.clone(),
        }
    }
}

impl TryFrom<RawListing> for Listing {
    type Error = DomainError;

    fn try_from(raw: RawListing) -> Result<Self, Self::Error> {
        let market_id = value_to_string(&raw.market_id);
        let platform = raw.platform.trim().to_string();
        if platform.is_empty() {
            return Err(DomainError::EmptyPlatform { market_id });
        }
        let title = raw.title.trim().to_string();
        if title.is_empty() {
            return Err(DomainError::EmptyTitle {
                platform,
                market_id,
            });
        }

        let category = raw
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

        Ok(Self {
            platform,
            title,
            price: coerce_number(&raw.price).and_then(valid_price),
            volume: coerce_number(&raw.volume).and_then(valid_volume),
            category,
            market_id: MarketId::new(market_id),
            description: raw.description,
        })
    }
}

impl From<&Listing> for RawListing {
    fn from(listing: &Listing) -> Self {
        Self {
            platform: listing.platform.clone(),
            title: listing.title.clone(),
            price: listing.price.map_or(Value::Null, Value::from),
            volume: listing.volume.map_or(Value::Null, Value::from),
            category: Some(listing.category.clone()),
            market_id: Value::String(listing.market_id.to_string()),
            description: listing.description.clone(),
        }
    }
}

/// One member's platform-specific attributes inside a unified group.
///
/// Price and volume are read as loosely as in [`RawListing`] so a unified
/// file written by another tool still loads; unusable values become `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformPayload {
    #[serde(rename = "original_product")]
    pub title: String,
    #[serde(default, deserialize_with = "loose_price")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "loose_volume")]
    pub volume: Option<f64>,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default, deserialize_with = "loose_market_id")]
    pub market_id: MarketId,
    #[serde(default)]
    pub description: String,
}

fn loose_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_number(&value).and_then(valid_price))
}

fn loose_volume<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_number(&value).and_then(valid_volume))
}

fn loose_market_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<MarketId, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(MarketId::new(value_to_string(&value)))
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// Coerce a loosely typed JSON value to a finite number.
///
/// Numbers and numeric strings parse; everything else is `None`.
#[must_use]
pub fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

fn valid_price(price: f64) -> Option<f64> {
    (price.is_finite() && (0.0..=1.0).contains(&price)).then_some(price)
}

fn valid_volume(volume: f64) -> Option<f64> {
    (volume.is_finite() && volume >= 0.0).then_some(volume)
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
