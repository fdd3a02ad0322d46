//! Miette-based error diagnostics for CLI error presentation.
//!
//! Converts crate errors into rich reports with source code context, labels,
//! and help suggestions.

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::error::{self, Error};

/// Configuration error with source location context.
///
/// Displays the configuration file content with a labeled span pointing
/// to the problematic location, along with an optional help message.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(unimarket::config))]
pub struct ConfigError {
    /// Human-readable error message.
    pub message: String,

    /// Source content (typically the configuration file).
    #[source_code]
    pub src: String,

    /// Byte offset and length of the problematic region.
    #[label("here")]
    pub span: SourceSpan,

    /// Optional help text with suggestions for fixing the error.
    #[help]
    pub help: Option<String>,
}

impl ConfigError {
    /// Create a new configuration error with source location.
    #[must_use]
    pub fn new(
        message: impl Into<String>,
        src: impl Into<String>,
        offset: usize,
        len: usize,
    ) -> Self {
        Self {
            message: message.into(),
            src: src.into(),
            span: (offset, len).into(),
            help: None,
        }
    }

    /// Add a help suggestion to the error.
    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Network or upstream API error.
#[derive(Debug, Error, Diagnostic)]
#[error("connection failed: {message}")]
#[diagnostic(
    code(unimarket::connection),
    help("check your network connection and the platform's status")
)]
pub struct ConnectionError {
    /// Detailed error message from the connection failure.
    pub message: String,
}

/// Missing or unreadable input file.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(unimarket::input))]
pub struct InputError {
    pub message: String,

    #[help]
    pub help: Option<String>,
}

/// Any other failure.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(unimarket::error))]
pub struct GenericError {
    pub message: String,
}

/// Build a report for `err`; `config_src` lets parse errors point into the file.
#[must_use]
pub fn report(err: Error, config_src: Option<&str>) -> miette::Report {
    match err {
        Error::Config(error::ConfigError::Parse(parse)) => {
            let message = format!("invalid configuration: {}", parse.message());
            match (config_src, parse.span()) {
                (Some(src), Some(span)) => ConfigError::new(
                    message,
                    src,
                    span.start,
                    span.end.saturating_sub(span.start),
                )
                .with_help("see config.toml.example for every supported key")
                .into(),
                _ => GenericError { message }.into(),
            }
        }
        Error::Config(error::ConfigError::InvalidValue { field, reason }) => {
            let message = format!("invalid value for {field}: {reason}");
            match config_src.and_then(|src| locate(src, field).map(|span| (src, span))) {
                Some((src, (offset, len))) => ConfigError::new(message, src, offset, len).into(),
                None => GenericError { message }.into(),
            }
        }
        Error::Io(io) if io.kind() == std::io::ErrorKind::NotFound => InputError {
            message: format!("file not found: {io}"),
            help: Some(
                "run `unimarket collect` or `unimarket run` first, or pass --input".to_string(),
            ),
        }
        .into(),
        Error::Http(http) => ConnectionError {
            message: http.to_string(),
        }
        .into(),
        Error::Connection(message) => ConnectionError { message }.into(),
        other => GenericError {
            message: other.to_string(),
        }
        .into(),
    }
}

/// Byte span of the last segment of a dotted `field` key in `src`.
fn locate(src: &str, field: &str) -> Option<(usize, usize)> {
    let key = field.rsplit('.').next()?;
    let mut offset = 0;
    for line in src.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if trimmed.starts_with(key) && trimmed[key.len()..].trim_start().starts_with('=') {
            let start = offset + (line.len() - trimmed.len());
            let end = line.trim_end().len() + offset;
            return Some((start, end - start));
        }
        offset += line.len();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_error(src: &str) -> Error {
        let err = toml::from_str::<toml::Table>(src).unwrap_err();
        error::ConfigError::Parse(err).into()
    }

    #[test]
    fn parse_error_points_into_source() {
        let src = "[matching\nthreshold = 0.5\n";
        let report = report(parse_error(src), Some(src));

        assert!(report.to_string().starts_with("invalid configuration"));
        assert!(report.downcast_ref::<ConfigError>().is_some());
    }

    #[test]
    fn invalid_value_is_located_by_key() {
        let src = "[matching]\nthreshold = 1.5\n";
        let err = Error::Config(error::ConfigError::InvalidValue {
            field: "matching.threshold",
            reason: "must be between 0.0 and 1.0".to_string(),
        });

        let report = report(err, Some(src));
        let diagnostic = report.downcast_ref::<ConfigError>().unwrap();

        assert_eq!(diagnostic.span.offset(), 11);
        assert_eq!(diagnostic.span.len(), "threshold = 1.5".len());
    }

    #[test]
    fn missing_file_suggests_running_a_stage() {
        let err = Error::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "raw_data.json"));

        let report = report(err, None);

        assert!(report.downcast_ref::<InputError>().is_some());
    }

    #[test]
    fn locate_skips_keys_with_shared_prefix() {
        let src = "thresholds = 1\nthreshold = 2\n";
        assert_eq!(locate(src, "matching.threshold"), Some((15, 13)));
    }
}
