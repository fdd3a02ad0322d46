//! Matching and aggregation tunables.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Weights and limits for pairwise matching.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MatchingConfig {
    /// Verdicts must be strictly more confident than this. Defaults to 0.65.
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Weight of keyword Jaccard in the lexical score. Defaults to 0.7.
    #[serde(default = "default_keyword_weight")]
    pub keyword_weight: f64,

    /// Weight of sequence similarity in the lexical score. Defaults to 0.3.
    #[serde(default = "default_sequence_weight")]
    pub sequence_weight: f64,

    /// In-flight scorer calls per anchor. Defaults to 4.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Consult the text model when an API key is available.
    #[serde(default = "default_semantic")]
    pub semantic: bool,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            keyword_weight: default_keyword_weight(),
            sequence_weight: default_sequence_weight(),
            max_concurrency: default_max_concurrency(),
            semantic: default_semantic(),
        }
    }
}

impl MatchingConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ConfigError::InvalidValue {
                field: "matching.threshold",
                reason: "must be between 0 and 1".to_string(),
            });
        }
        if self.keyword_weight < 0.0 || self.sequence_weight < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "matching.keyword_weight",
                reason: "weights must be 0 or greater".to_string(),
            });
        }
        if (self.keyword_weight + self.sequence_weight - 1.0).abs() > 1e-9 {
            return Err(ConfigError::InvalidValue {
                field: "matching.keyword_weight",
                reason: "keyword_weight + sequence_weight must equal 1".to_string(),
            });
        }
        if self.max_concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "matching.max_concurrency",
                reason: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

/// Settings for per-group metrics.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AggregationConfig {
    /// Price spread that flags an arbitrage candidate. Defaults to 0.05.
    #[serde(default = "default_arbitrage_margin")]
    pub arbitrage_margin: f64,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            arbitrage_margin: default_arbitrage_margin(),
        }
    }
}

impl AggregationConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.arbitrage_margin) {
            return Err(ConfigError::InvalidValue {
                field: "aggregation.arbitrage_margin",
                reason: "must be between 0 and 1".to_string(),
            });
        }
        Ok(())
    }
}

fn default_threshold() -> f64 {
    0.65
}

fn default_keyword_weight() -> f64 {
    0.7
}

fn default_sequence_weight() -> f64 {
    0.3
}

const fn default_max_concurrency() -> usize {
    4
}

const fn default_semantic() -> bool {
    true
}

fn default_arbitrage_margin() -> f64 {
    0.05
}
