//! Handler for the `config` command group.

use std::fs;
use std::path::Path;

use crate::adapter::inbound::cli::{operator, output};
use crate::error::{ConfigError, Result};

/// Default config template with documentation.
const CONFIG_TEMPLATE: &str = include_str!("../../../../config.toml.example");

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, CONFIG_TEMPLATE)?;
    output::section("Config Initialized");
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::section("Next Steps");
    output::note(&format!("1. Edit {} with your settings", path.display()));
    output::note("2. Set GEMINI_API_KEY (or the key of your provider) for semantic matching");
    output::note(&format!(
        "3. Run: unimarket config validate -c {}",
        path.display()
    ));
    output::note(&format!("4. Run: unimarket run -c {}", path.display()));
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(path: &Path) -> Result<()> {
    let config_toml = operator::read_config_toml(path)?;
    let config = operator::operator()?.show_config(&config_toml)?;

    if output::json_result("config", &config) {
        return Ok(());
    }

    output::section("Effective Configuration");
    output::field("Output dir", &config.output_dir);
    output::field(
        "Logging",
        format!("{} ({})", config.log_level, config.log_format),
    );

    output::section("Matching");
    output::field("Threshold", config.matching.threshold);
    output::field(
        "Weights",
        format!(
            "{} keyword / {} sequence",
            config.matching.keyword_weight, config.matching.sequence_weight
        ),
    );
    output::field("Concurrency", config.matching.max_concurrency);
    output::field(
        "Semantic",
        if config.matching.semantic { "yes" } else { "no" },
    );
    output::field(
        "Arbitrage",
        format!("{:.1}% spread", config.arbitrage_margin * 100.0),
    );

    output::section("LLM");
    output::field("Provider", &config.llm.provider);
    output::field("Model", &config.llm.model);
    output::field("Timeout", format!("{}s", config.llm.timeout_secs));
    if config.llm.api_key_loaded {
        output::success(&format!("API key loaded from {}", config.llm.api_key_env));
    } else {
        output::warning(&format!("{} not set", config.llm.api_key_env));
    }

    output::section("Sources");
    if config.sources.demo {
        output::field("Mode", "demo");
    } else if config.sources.enabled.is_empty() {
        output::note("(no platforms enabled)");
    } else {
        output::field("Platforms", config.sources.enabled.join(", "));
    }
    output::field("Limit", config.sources.limit);
    output::field("Delay", format!("{}ms", config.sources.delay_ms));
    output::field("Timeout", format!("{}ms", config.sources.timeout_ms));
    output::field(
        "Fallback",
        if config.sources.demo_fallback {
            "demo fixtures"
        } else {
            "none"
        },
    );
    for file in &config.sources.files {
        output::field("File", file);
    }

    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(path: &Path) -> Result<()> {
    let config_toml = operator::read_config_toml(path)?;
    let validation = operator::operator()?.validate_config(&config_toml)?;

    if output::json_result("validation", &validation) {
        return Ok(());
    }

    output::section("Config Validation");
    output::field("Path", path.display());
    output::success("Config file is valid");

    if !validation.warnings.is_empty() {
        output::section("Warnings");
        for warning in &validation.warnings {
            output::warning(warning);
        }
    }

    output::field(
        "Next",
        format!("unimarket config show -c {}", path.display()),
    );

    Ok(())
}
