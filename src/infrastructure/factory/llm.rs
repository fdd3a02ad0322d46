//! LLM client factory.

use std::sync::Arc;

use tracing::{info, warn};

use crate::adapter::outbound::llm::anthropic::Anthropic;
use crate::adapter::outbound::llm::gemini::Gemini;
use crate::adapter::outbound::llm::openai::OpenAi;
use crate::infrastructure::config::llm::LlmProvider;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::llm::Llm;

/// Build LLM client from configuration.
///
/// Returns `None` if semantic matching is disabled or the provider's API
/// key is missing.
pub fn build_llm_client(config: &Config) -> Option<Arc<dyn Llm>> {
    if !config.matching.semantic {
        return None;
    }

    let provider = config.llm.provider;
    let settings = config.llm.active();
    let client: crate::error::Result<Arc<dyn Llm>> = match provider {
        LlmProvider::Gemini => Gemini::from_env(settings).map(|c| Arc::new(c) as Arc<dyn Llm>),
        LlmProvider::OpenAi => OpenAi::from_env(settings).map(|c| Arc::new(c) as Arc<dyn Llm>),
        LlmProvider::Anthropic => {
            Anthropic::from_env(settings).map(|c| Arc::new(c) as Arc<dyn Llm>)
        }
    };

    match client {
        Ok(client) => {
            info!(provider = client.name(), model = %settings.model, "LLM client initialized");
            Some(client)
        }
        Err(_) => {
            warn!(
                env = provider.env_key(),
                "API key not set, using lexical matching only"
            );
            None
        }
    }
}
