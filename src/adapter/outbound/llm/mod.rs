//! LLM adapter modules.
//!
//! Implementations of the [`Llm`](crate::port::outbound::llm::Llm) trait for
//! Google Gemini, OpenAI and Anthropic Claude.

pub mod anthropic;
pub mod gemini;
pub mod openai;
