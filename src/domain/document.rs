//! Plain-text documents for downstream retrieval.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A text document with flat string metadata.
///
/// Metadata values are always strings so any vector store can index them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub content: String,
    pub metadata: BTreeMap<String, String>,
}

impl Document {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_meta(mut self, key: &str, value: impl ToString) -> Self {
        self.metadata.insert(key.to_string(), value.to_string());
        self
    }

    /// Value of the `type` metadata key.
    #[must_use]
    pub fn kind(&self) -> Option<&str> {
        self.metadata.get("type").map(String::as_str)
    }
}
