//! Outbound adapters (driven side).

pub mod export;
pub mod llm;
pub mod source;
