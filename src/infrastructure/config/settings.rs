//! Application configuration loading and validation.
//!
//! # Example
//!
//! ```no_run
//! use unimarket::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::llm::LlmConfig;
use super::logging::LoggingConfig;
use super::matching::{AggregationConfig, MatchingConfig};
use super::source::SourcesConfig;
use crate::error::{ConfigError, Result};

/// Main application configuration.
///
/// Every section is optional; an empty file yields the defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub matching: MatchingConfig,

    #[serde(default)]
    pub aggregation: AggregationConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub sources: SourcesConfig,

    /// Directory receiving exported files. Defaults to `outputs`.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            matching: MatchingConfig::default(),
            aggregation: AggregationConfig::default(),
            llm: LlmConfig::default(),
            sources: SourcesConfig::default(),
            output_dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("outputs")
}

impl Config {
    /// Parse and validate configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or a value is out of range.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails to parse or
    /// validate.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Check every section's invariants.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError::InvalidValue`] encountered.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        self.matching.validate()?;
        self.aggregation.validate()?;
        self.sources.validate()?;
        if self.llm.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "llm.timeout_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("expected \"pretty\" or \"json\", got {:?}", self.logging.format),
            }
            .into());
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::MissingField {
                field: "output_dir",
            }
            .into());
        }
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::infrastructure::config::llm::LlmProvider;

    #[test]
    fn empty_file_yields_defaults() {
        let config = Config::parse_toml("").unwrap();
        assert_eq!(config.matching.threshold, 0.65);
        assert_eq!(config.matching.keyword_weight, 0.7);
        assert_eq!(config.matching.sequence_weight, 0.3);
        assert_eq!(config.matching.max_concurrency, 4);
        assert_eq!(config.aggregation.arbitrage_margin, 0.05);
        assert_eq!(config.llm.provider, LlmProvider::Gemini);
        assert_eq!(config.llm.timeout_secs, 30);
        assert_eq!(config.llm.active().model, "gemini-2.0-flash");
        assert_eq!(config.output_dir, PathBuf::from("outputs"));
        assert!(config.sources.demo_fallback);
    }

    #[test]
    fn sections_override_defaults() {
        let config = Config::parse_toml(
            r#"
            output_dir = "out"

            [matching]
            threshold = 0.8
            keyword_weight = 0.5
            sequence_weight = 0.5
            semantic = false

            [llm]
            provider = "anthropic"

            [llm.anthropic]
            model = "claude-x"

            [sources]
            kalshi = false
            files = ["a.json", "b.json"]
            "#,
        )
        .unwrap();

        assert_eq!(config.matching.threshold, 0.8);
        assert!(!config.matching.semantic);
        assert_eq!(config.llm.active().model, "claude-x");
        assert_eq!(config.llm.active().max_tokens, 500);
        assert!(!config.sources.kalshi);
        assert_eq!(config.sources.files.len(), 2);
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn weights_must_sum_to_one() {
        let err = Config::parse_toml("[matching]\nkeyword_weight = 0.9\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "matching.keyword_weight",
                ..
            })
        ));
    }

    #[test]
    fn threshold_out_of_range_is_rejected() {
        assert!(Config::parse_toml("[matching]\nthreshold = 1.5\n").is_err());
    }

    #[test]
    fn zero_concurrency_is_rejected() {
        assert!(Config::parse_toml("[matching]\nmax_concurrency = 0\n").is_err());
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        assert!(Config::parse_toml("[logging]\nformat = \"xml\"\n").is_err());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = Config::parse_toml("[matching\n").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
    }

    #[test]
    fn non_http_source_url_is_rejected() {
        assert!(Config::parse_toml("[sources]\nkalshi_url = \"ftp://x\"\n").is_err());
    }
}
