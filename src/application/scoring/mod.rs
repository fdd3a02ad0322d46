//! Similarity scorers.
//!
//! - [`lexical`]: keyword Jaccard blended with sequence similarity
//! - [`semantic`]: text-model judgement through the [`Llm`](crate::port::outbound::llm::Llm) port
//! - [`fallback`]: the combinator the engine scores through

pub mod fallback;
pub mod lexical;
pub mod semantic;
