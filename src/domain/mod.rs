//! Platform-agnostic domain types.
//!
//! - [`listing`] - raw and validated market listings
//! - [`verdict`] - pairwise same-event verdicts and match provenance
//! - [`group`] - unified groups and the batch that holds them
//! - [`metrics`] - per-group price and volume statistics
//! - [`report`] - flattened rows and corpus-level report
//! - [`document`] - plain-text documents for retrieval consumers

pub mod document;
pub mod error;
pub mod group;
pub mod id;
pub mod listing;
pub mod metrics;
pub mod report;
pub mod verdict;

pub use document::Document;
pub use error::DomainError;
pub use group::{UnifiedBatch, UnifiedGroup};
pub use id::{GroupId, MarketId};
pub use listing::{Listing, PlatformPayload, RawListing};
pub use metrics::GroupMetrics;
pub use report::{CorpusReport, ProductRow, SimpleRow};
pub use verdict::{MatchRecord, SimilarityVerdict};
