//! Listing source configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Which sources to query and how politely.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SourcesConfig {
    #[serde(default = "enabled")]
    pub polymarket: bool,

    #[serde(default = "enabled")]
    pub kalshi: bool,

    #[serde(default = "enabled")]
    pub manifold: bool,

    /// Use the bundled fixtures for every platform instead of the network.
    #[serde(default)]
    pub demo: bool,

    /// Replace a failed or empty source with its bundled fixture.
    #[serde(default = "enabled")]
    pub demo_fallback: bool,

    /// Listings kept per platform. Defaults to 15.
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Pause between sources, in milliseconds. Defaults to 2000.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// HTTP request timeout, in milliseconds. Defaults to 15000.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Local JSON batch files read in addition to the platforms.
    #[serde(default)]
    pub files: Vec<PathBuf>,

    #[serde(default = "default_polymarket_url")]
    pub polymarket_url: String,

    #[serde(default = "default_kalshi_url")]
    pub kalshi_url: String,

    #[serde(default = "default_manifold_url")]
    pub manifold_url: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            polymarket: true,
            kalshi: true,
            manifold: true,
            demo: false,
            demo_fallback: true,
            limit: default_limit(),
            delay_ms: default_delay_ms(),
            timeout_ms: default_timeout_ms(),
            files: Vec::new(),
            polymarket_url: default_polymarket_url(),
            kalshi_url: default_kalshi_url(),
            manifold_url: default_manifold_url(),
        }
    }
}

impl SourcesConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "sources.limit",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "sources.timeout_ms",
                reason: "must be greater than 0".to_string(),
            });
        }
        for (field, url) in [
            ("sources.polymarket_url", &self.polymarket_url),
            ("sources.kalshi_url", &self.kalshi_url),
            ("sources.manifold_url", &self.manifold_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("{url:?} is not an http(s) URL"),
                });
            }
        }
        Ok(())
    }
}

const fn enabled() -> bool {
    true
}

const fn default_limit() -> usize {
    15
}

const fn default_delay_ms() -> u64 {
    2000
}

const fn default_timeout_ms() -> u64 {
    15_000
}

fn default_polymarket_url() -> String {
    "https://gamma-api.polymarket.com".into()
}

fn default_kalshi_url() -> String {
    "https://api.elections.kalshi.com".into()
}

fn default_manifold_url() -> String {
    "https://api.manifold.markets".into()
}
