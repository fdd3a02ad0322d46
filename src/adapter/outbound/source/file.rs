//! Local JSON batch files as a listing source.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use crate::domain::RawListing;
use crate::error::{Result, SourceError};
use crate::port::outbound::source::ListingSource;

/// Reads listings from a JSON file.
///
/// Accepts a bare array of listings or an object wrapping the array under
/// `data`, which is the shape of an exported `raw_data.json`.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Decode a listing batch from JSON text.
///
/// # Errors
///
/// Fails on invalid JSON or when neither shape matches.
pub fn parse_batch(content: &str) -> Result<Vec<RawListing>> {
    let value: Value = serde_json::from_str(content)?;
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(SourceError::Payload {
                    source_name: "file",
                    reason: "expected an array or an object with a `data` array".into(),
                }
                .into())
            }
        },
        _ => {
            return Err(SourceError::Payload {
                source_name: "file",
                reason: "expected an array or an object with a `data` array".into(),
            }
            .into())
        }
    };

    Ok(items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

#[async_trait]
impl ListingSource for FileSource {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn fetch(&self) -> Result<Vec<RawListing>> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let listings = parse_batch(&content)?;
        info!(path = %self.path.display(), count = listings.len(), "listings read");
        Ok(listings)
    }
}
