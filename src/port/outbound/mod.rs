//! Outbound ports (driven side): interfaces implemented by outbound adapters.

pub mod llm;
pub mod scorer;
pub mod source;
