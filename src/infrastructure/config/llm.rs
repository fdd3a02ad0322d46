//! Text-model provider configuration for the semantic scorer.

use serde::{Deserialize, Serialize};

/// LLM provider configuration.
///
/// API keys are never read from the config file. They come from
/// `GEMINI_API_KEY`, `OPENAI_API_KEY` or `ANTHROPIC_API_KEY` at runtime.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmConfig {
    /// Defaults to Gemini.
    #[serde(default)]
    pub provider: LlmProvider,

    /// Upper bound on one completion call, in seconds. Defaults to 30.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "ProviderConfig::gemini")]
    pub gemini: ProviderConfig,

    #[serde(default = "ProviderConfig::openai")]
    pub openai: ProviderConfig,

    #[serde(default = "ProviderConfig::anthropic")]
    pub anthropic: ProviderConfig,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::default(),
            timeout_secs: default_timeout_secs(),
            gemini: ProviderConfig::gemini(),
            openai: ProviderConfig::openai(),
            anthropic: ProviderConfig::anthropic(),
        }
    }
}

impl LlmConfig {
    /// Settings of the selected provider.
    #[must_use]
    pub fn active(&self) -> &ProviderConfig {
        match self.provider {
            LlmProvider::Gemini => &self.gemini,
            LlmProvider::OpenAi => &self.openai,
            LlmProvider::Anthropic => &self.anthropic,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// Google Gemini models.
    #[default]
    Gemini,
    /// OpenAI GPT models.
    OpenAi,
    /// Anthropic Claude models.
    Anthropic,
}

impl LlmProvider {
    /// Environment variable holding the provider's API key.
    #[must_use]
    pub const fn env_key(self) -> &'static str {
        match self {
            Self::Gemini => "GEMINI_API_KEY",
            Self::OpenAi => "OPENAI_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
        }
    }
}

/// Per-provider model settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProviderConfig {
    pub model: String,

    /// Sampling temperature. Defaults to 0.1.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Response length cap. Defaults to 500.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
}

impl ProviderConfig {
    fn with_model(model: &str) -> Self {
        Self {
            model: model.to_string(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }

    fn gemini() -> Self {
        Self::with_model("gemini-2.0-flash")
    }

    fn openai() -> Self {
        Self::with_model("gpt-4o-mini")
    }

    fn anthropic() -> Self {
        Self::with_model("claude-3-5-haiku-latest")
    }
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_temperature() -> f64 {
    0.1
}

const fn default_max_tokens() -> usize {
    500
}
