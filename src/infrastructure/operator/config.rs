//! Configuration operator implementation.

use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::inbound::operator::config::{
    ConfigLlm, ConfigMatching, ConfigSources, ConfigValidationReport, ConfigView,
    ConfigurationOperator,
};

use super::entry::Operator;

impl ConfigurationOperator for Operator {
    fn show_config(&self, config_toml: &str) -> Result<ConfigView> {
        let config = Config::parse_toml(config_toml)?;
        let provider = config.llm.provider;
        let active = config.llm.active();

        Ok(ConfigView {
            log_level: config.logging.level.clone(),
            log_format: config.logging.format.clone(),
            output_dir: config.output_dir.display().to_string(),
            arbitrage_margin: config.aggregation.arbitrage_margin,
            matching: ConfigMatching {
                threshold: config.matching.threshold,
                keyword_weight: config.matching.keyword_weight,
                sequence_weight: config.matching.sequence_weight,
                max_concurrency: config.matching.max_concurrency,
                semantic: config.matching.semantic,
            },
            llm: ConfigLlm {
                provider: provider.as_str().to_string(),
                model: active.model.clone(),
                timeout_secs: config.llm.timeout_secs,
                api_key_env: provider.env_key().to_string(),
                api_key_loaded: std::env::var(provider.env_key()).is_ok(),
            },
            sources: ConfigSources {
                enabled: enabled_platforms(&config),
                demo: config.sources.demo,
                demo_fallback: config.sources.demo_fallback,
                limit: config.sources.limit,
                delay_ms: config.sources.delay_ms,
                timeout_ms: config.sources.timeout_ms,
                files: config
                    .sources
                    .files
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect(),
            },
        })
    }

    fn validate_config(&self, config_toml: &str) -> Result<ConfigValidationReport> {
        let config = Config::parse_toml(config_toml)?;
        let mut warnings = Vec::new();

        if !config.sources.demo
            && enabled_platforms(&config).is_empty()
            && config.sources.files.is_empty()
        {
            warnings.push("No listing sources enabled".to_string());
        }

        if config.sources.demo {
            warnings.push("Demo mode enabled; platforms will not be queried".to_string());
        }

        for file in &config.sources.files {
            if !file.exists() {
                warnings.push(format!("Source file {} does not exist", file.display()));
            }
        }

        if config.matching.semantic {
            let env_key = config.llm.provider.env_key();
            if std::env::var(env_key).is_err() {
                warnings.push(format!(
                    "Semantic matching enabled but {env_key} not set; matching will be lexical only"
                ));
            }
        }

        Ok(ConfigValidationReport { warnings })
    }
}

fn enabled_platforms(config: &Config) -> Vec<String> {
    [
        ("polymarket", config.sources.polymarket),
        ("kalshi", config.sources.kalshi),
        ("manifold", config.sources.manifold),
    ]
    .into_iter()
    .filter(|(_, enabled)| *enabled)
    .map(|(name, _)| name.to_string())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_projects_matching_and_sources() {
        let view = Operator
            .show_config(
                r#"
                output_dir = "out"

                [matching]
                threshold = 0.7
                semantic = false

                [sources]
                kalshi = false
                "#,
            )
            .unwrap();

        assert_eq!(view.output_dir, "out");
        assert_eq!(view.matching.threshold, 0.7);
        assert!(!view.matching.semantic);
        assert_eq!(view.sources.enabled, vec!["polymarket", "manifold"]);
        assert_eq!(view.llm.provider, "gemini");
        assert_eq!(view.llm.api_key_env, "GEMINI_API_KEY");
    }

    #[test]
    fn validate_warns_when_nothing_is_enabled() {
        let report = Operator
            .validate_config(
                r#"
                [matching]
                semantic = false

                [sources]
                polymarket = false
                kalshi = false
                manifold = false
                "#,
            )
            .unwrap();

        assert_eq!(report.warnings, vec!["No listing sources enabled".to_string()]);
    }

    #[test]
    fn validate_warns_about_missing_source_file() {
        let report = Operator
            .validate_config(
                r#"
                [matching]
                semantic = false

                [sources]
                files = ["/definitely/not/here.json"]
                "#,
            )
            .unwrap();

        assert!(report
            .warnings
            .iter()
            .any(|w| w.contains("/definitely/not/here.json")));
    }

    #[test]
    fn validate_rejects_invalid_values() {
        assert!(Operator
            .validate_config("[matching]\nthreshold = 2.0\n")
            .is_err());
    }
}
