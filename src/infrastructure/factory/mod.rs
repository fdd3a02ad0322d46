//! Factory modules for building infrastructure components.
//!
//! Provides factory functions that construct fully-configured components
//! from application configuration. These factories handle dependency
//! injection and wiring.
//!
//! # Submodules
//!
//! - [`llm`] - LLM client construction
//! - [`scorer`] - Similarity scorer construction
//! - [`pipeline`] - Collector, unifier and pipeline construction

pub mod llm;
pub mod pipeline;
pub mod scorer;
