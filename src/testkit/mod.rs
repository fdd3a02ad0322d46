//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`listing`] - Listing builders and the canonical sample titles.
//! - [`llm`] - In-process [`Llm`](crate::port::outbound::llm::Llm) doubles:
//!   `MockLlm`, `FailingLlm`, `SlowLlm`.
//! - [`scorer`] - `ScriptedScorer` with per-pair verdicts, `FailingScorer`.
//! - [`source`] - `StaticSource` and `FailingSource` listing sources.

pub mod listing;
pub mod llm;
pub mod scorer;
pub mod source;
