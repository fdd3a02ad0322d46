//! Configuration projections for operator-facing adapters.

use serde::Serialize;

use crate::error::Result;

/// Matching section of a configuration view.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigMatching {
    pub threshold: f64,
    pub keyword_weight: f64,
    pub sequence_weight: f64,
    pub max_concurrency: usize,
    pub semantic: bool,
}

/// Text-model section of a configuration view.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigLlm {
    pub provider: String,
    pub model: String,
    pub timeout_secs: u64,
    /// Name of the environment variable holding the key.
    pub api_key_env: String,
    pub api_key_loaded: bool,
}

/// Sources section of a configuration view.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigSources {
    pub enabled: Vec<String>,
    pub demo: bool,
    pub demo_fallback: bool,
    pub limit: usize,
    pub delay_ms: u64,
    pub timeout_ms: u64,
    pub files: Vec<String>,
}

/// Full configuration projection for operator-facing output.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigView {
    pub log_level: String,
    pub log_format: String,
    pub output_dir: String,
    pub arbitrage_margin: f64,
    pub matching: ConfigMatching,
    pub llm: ConfigLlm,
    pub sources: ConfigSources,
}

/// Validation output for `config validate`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigValidationReport {
    pub warnings: Vec<String>,
}

/// Configuration use-cases for operator-facing adapters.
pub trait ConfigurationOperator: Send + Sync {
    /// Build a projection for `config show`.
    fn show_config(&self, config_toml: &str) -> Result<ConfigView>;

    /// Validate config and return non-fatal warnings.
    fn validate_config(&self, config_toml: &str) -> Result<ConfigValidationReport>;
}
