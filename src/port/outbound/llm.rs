//! Text-model completion port used by the semantic scorer.

use async_trait::async_trait;

use crate::error::Result;

/// Client for large language model text completion.
///
/// Implementations wrap one provider (Gemini, OpenAI, Anthropic) and own
/// authentication and response decoding. They do not enforce timeouts; the
/// caller wraps each call.
///
/// # Errors
///
/// [`complete`](Self::complete) fails on transport errors, non-success
/// status codes or responses without text.
#[async_trait]
pub trait Llm: Send + Sync {
    /// Provider name for logs.
    fn name(&self) -> &'static str;

    /// Send a single-turn prompt and return the generated text.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
