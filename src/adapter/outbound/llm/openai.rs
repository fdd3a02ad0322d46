//! OpenAI LLM client.
//!
//! Provides an implementation of the [`Llm`] trait for the OpenAI
//! Chat Completions API.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Error, LlmError, Result};
use crate::infrastructure::config::llm::ProviderConfig;
use crate::port::outbound::llm::Llm;

/// OpenAI Chat Completions API endpoint.
const API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// OpenAI API client.
#[derive(Debug)]
pub struct OpenAi {
    client: Client,
    api_key: String,
    /// Model identifier (e.g., "gpt-4o-mini").
    model: String,
    max_tokens: usize,
    /// Sampling temperature (0.0 to 2.0).
    temperature: f64,
}

impl OpenAi {
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

    /// Client configured from `settings`, keyed by `OPENAI_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set.
    pub fn from_env(settings: &ProviderConfig) -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            Error::Config(ConfigError::MissingField {
                field: "OPENAI_API_KEY",
            })
        })?;
        Ok(Self::new(
            api_key,
            settings.model.clone(),
            settings.max_tokens,
            settings.temperature,
        ))
    }
}

#[derive(Serialize)]
struct Request<'a> {
    model: &'a str,
    max_tokens: usize,
    temperature: f64,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct Response {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl Llm for OpenAi {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = Request {
            model: &self.model,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(API_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::Connection(e.to_string()))?
            .json::<Response>()
            .await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| LlmError::EmptyCompletion { provider: "openai" }.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serialization() {
        let request = Request {
            model: "gpt-4o-mini",
            max_tokens: 500,
            temperature: 0.1,
            messages: vec![Message {
                role: "user",
                content: "Compare these markets",
            }],
        };
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["max_tokens"], 500);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "Compare these markets");
    }

    #[test]
    fn response_deserialization() {
        let json = r#"{
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "{\"same_event\": false}"}, "finish_reason": "stop"}
            ]
        }"#;
        let response: Response = serde_json::from_str(json).unwrap();
        assert_eq!(
            response.choices[0].message.content.as_deref(),
            Some(r#"{"same_event": false}"#)
        );
    }

    #[test]
    fn refusal_has_null_content() {
        let json = r#"{"choices": [{"message": {"role": "assistant", "content": null, "refusal": "no"}}]}"#;
        let response: Response = serde_json::from_str(json).unwrap();
        assert!(response.choices[0].message.content.is_none());
    }

    #[test]
    fn client_construction() {
        let settings = ProviderConfig {
            model: "gpt-4o-mini".into(),
            temperature: 0.3,
            max_tokens: 200,
        };
        let client = OpenAi::new("k", settings.model.clone(), settings.max_tokens, settings.temperature);
        assert_eq!(client.model, "gpt-4o-mini");
        assert_eq!(client.max_tokens, 200);
        assert_eq!(client.name(), "openai");
    }
}

/// Run with: `cargo test --features integration-tests -- --ignored`
#[cfg(all(test, feature = "integration-tests"))]
mod integration_tests {
    use super::*;
    use crate::infrastructure::config::llm::LlmConfig;

    #[tokio::test]
    #[ignore = "requires OPENAI_API_KEY and network access"]
    async fn simple_completion() {
        let Ok(client) = OpenAi::from_env(&LlmConfig::default().openai) else {
            eprintln!("Skipping OpenAI integration test: OPENAI_API_KEY not set");
            return;
        };
        let reply = client.complete("Say 'hello' and nothing else.").await.unwrap();
        assert!(reply.to_lowercase().contains("hello"));
    }
}
