//! Unimarket - cross-platform prediction market matching and unification.
//!
//! Listings for the same real-world event are published on several
//! platforms under different titles. This crate collects them, decides which
//! ones describe the same event, merges each group into one unified product
//! and derives cross-platform price and volume comparisons.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - [`domain`] - Typed records: listings, verdicts, groups, metrics, rows
//! - [`port`] - Traits at the seams (sources, scorers, text models, operator)
//! - [`application`] - Normalization, scoring, unification, aggregation, corpus
//! - [`adapter`] - Platform sources, LLM clients, exporters and the CLI
//! - [`infrastructure`] - Configuration, wiring and the operator implementation
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use unimarket::application::scoring::fallback::Fallback;
//! use unimarket::application::scoring::lexical::LexicalScorer;
//! use unimarket::application::unify::Unifier;
//! use unimarket::domain::Listing;
//!
//! # async fn demo() {
//! let unifier = Unifier::new(Fallback::lexical(LexicalScorer::default()));
//! let listings = vec![
//!     Listing::new("Polymarket", "Bitcoin above $100k by 2025?"),
//!     Listing::new("Kalshi", "Bitcoin above $100k by 2025"),
//! ];
//! let batch = unifier.unify(&listings).await;
//! assert_eq!(batch.len(), 1);
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
