use std::fs;

use unimarket::error::{ConfigError, Error};
use unimarket::infrastructure::config::settings::Config;

const TEMPLATE: &str = include_str!("../config.toml.example");

fn load(contents: &str) -> unimarket::error::Result<Config> {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).expect("write temp config");
    Config::load(&path)
}

fn rejected_field(contents: &str) -> &'static str {
    match load(contents) {
        Err(Error::Config(ConfigError::InvalidValue { field, .. })) => field,
        Err(err) => panic!("Expected an invalid value error, got {err}"),
        Ok(_) => panic!("Expected config to be rejected:\n{contents}"),
    }
}

#[test]
fn template_parses_to_defaults() {
    let config = Config::parse_toml(TEMPLATE).expect("template should validate");
    let defaults = Config::default();

    assert_eq!(config.matching, defaults.matching);
    assert_eq!(config.aggregation, defaults.aggregation);
    assert_eq!(config.sources, defaults.sources);
    assert_eq!(config.output_dir, defaults.output_dir);
}

#[test]
fn empty_file_means_defaults() {
    let config = load("").expect("empty config is valid");

    assert!((config.matching.threshold - 0.65).abs() < f64::EPSILON);
    assert_eq!(config.matching.max_concurrency, 4);
    assert!(!config.sources.demo);
}

#[test]
fn config_rejects_threshold_above_one() {
    assert_eq!(
        rejected_field("[matching]\nthreshold = 1.5\n"),
        "matching.threshold"
    );
}

#[test]
fn config_rejects_weights_not_summing_to_one() {
    let toml = "[matching]\nkeyword_weight = 0.5\nsequence_weight = 0.2\n";
    assert_eq!(rejected_field(toml), "matching.keyword_weight");
}

#[test]
fn config_rejects_zero_concurrency() {
    assert_eq!(
        rejected_field("[matching]\nmax_concurrency = 0\n"),
        "matching.max_concurrency"
    );
}

#[test]
fn config_rejects_zero_llm_timeout() {
    assert_eq!(
        rejected_field("[llm]\ntimeout_secs = 0\n"),
        "llm.timeout_secs"
    );
}

#[test]
fn config_rejects_unknown_log_format() {
    assert_eq!(
        rejected_field("[logging]\nformat = \"xml\"\n"),
        "logging.format"
    );
}

#[test]
fn malformed_toml_is_a_parse_error() {
    match load("[matching\nthreshold = 0.5\n") {
        Err(Error::Config(ConfigError::Parse(_))) => {}
        Err(err) => panic!("Expected parse error, got {err}"),
        Ok(_) => panic!("Expected malformed TOML to be rejected"),
    }
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    match Config::load(dir.path().join("absent.toml")) {
        Err(Error::Config(ConfigError::ReadFile(_))) => {}
        Err(err) => panic!("Expected read error, got {err}"),
        Ok(_) => panic!("Expected missing file to be rejected"),
    }
}

#[test]
fn provider_selects_api_key_env() {
    let config = load("[llm]\nprovider = \"anthropic\"\n").expect("valid config");
    assert_eq!(config.llm.provider.env_key(), "ANTHROPIC_API_KEY");
    assert_eq!(config.llm.provider.as_str(), "anthropic");
}
