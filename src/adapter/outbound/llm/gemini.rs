//! Google Gemini LLM client.
//!
//! Implements the [`Llm`] trait for the Gemini `generateContent` REST
//! endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Error, LlmError, Result};
use crate::infrastructure::config::llm::ProviderConfig;
use crate::port::outbound::llm::Llm;

/// Gemini REST API root.
const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini API client.
#[derive(Debug)]
pub struct Gemini {
    client: Client,
    api_key: String,
    /// Model identifier (e.g., "gemini-2.0-flash").
    model: String,
    max_tokens: usize,
    temperature: f64,
}

impl Gemini {
    #[must_use]
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        max_tokens: usize,
        temperature: f64,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            max_tokens,
            temperature,
        }
    }

    /// Client configured from `settings`, keyed by `GEMINI_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set.
    pub fn from_env(settings: &ProviderConfig) -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| {
            Error::Config(ConfigError::MissingField {
                field: "GEMINI_API_KEY",
            })
        })?;
        Ok(Self::new(
            api_key,
            settings.model.clone(),
            settings.max_tokens,
            settings.temperature,
        ))
    }

    fn endpoint(&self) -> String {
        format!("{API_BASE}/models/{}:generateContent", self.model)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Request<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    max_output_tokens: usize,
}

#[derive(Deserialize)]
struct Response {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl Response {
    fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().map(|p| p.text).collect();
        (!text.is_empty()).then_some(text)
    }
}

#[async_trait]
impl Llm for Gemini {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = Request {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_tokens,
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::Connection(e.to_string()))?
            .json::<Response>()
            .await?;

        response
            .text()
            .ok_or_else(|| LlmError::EmptyCompletion { provider: "gemini" }.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_camel_case_generation_config() {
        let request = Request {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: "Hello" }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.1,
                max_output_tokens: 500,
            },
        };
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["contents"][0]["parts"][0]["text"], "Hello");
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 500);
        assert_eq!(json["generationConfig"]["temperature"], 0.1);
    }

    #[test]
    fn response_text_joins_parts_of_first_candidate() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "{\"same_event\": "}, {"text": "true}"}], "role": "model"}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ],
            "usageMetadata": {"promptTokenCount": 10}
        }"#;
        let response: Response = serde_json::from_str(json).unwrap();
        assert_eq!(response.text().unwrap(), r#"{"same_event": true}"#);
    }

    #[test]
    fn blocked_response_has_no_text() {
        let json = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        let response: Response = serde_json::from_str(json).unwrap();
        assert!(response.text().is_none());

        let no_content = r#"{"candidates": [{"finishReason": "SAFETY"}]}"#;
        let response: Response = serde_json::from_str(no_content).unwrap();
        assert!(response.text().is_none());
    }

    #[test]
    fn endpoint_names_the_model() {
        let client = Gemini::new("key", "gemini-2.0-flash", 500, 0.1);
        assert_eq!(
            client.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
        assert_eq!(client.name(), "gemini");
    }
}
