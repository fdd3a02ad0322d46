use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

/// Errors raised while talking to an external text model.
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("{provider} request timed out after {seconds}s")]
    Timeout { provider: &'static str, seconds: u64 },

    #[error("{provider} returned an empty completion")]
    EmptyCompletion { provider: &'static str },

    #[error("no JSON object found in model response")]
    NoJson,

    #[error("model response is not a valid verdict: {0}")]
    InvalidVerdict(String),
}

/// Errors raised while acquiring listings from a source.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("{source_name} returned no listings")]
    Empty { source_name: &'static str },

    #[error("unexpected payload from {source_name}: {reason}")]
    Payload {
        source_name: &'static str,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, Error>;
