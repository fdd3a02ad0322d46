//! Boundary validation and the unify-then-aggregate use case.
//!
//! Raw records are validated into [`Listing`]s before anything reaches the
//! engine; rejected records are quarantined with their reason instead of
//! aborting the batch.

use tracing::{info, warn};

use crate::application::aggregate::metrics::Aggregator;
use crate::application::aggregate::report::{corpus_report, summary_statistics};
use crate::application::aggregate::row::simple_rows;
use crate::application::unify::Unifier;
use crate::domain::error::DomainError;
use crate::domain::report::SummaryRecord;
use crate::domain::{CorpusReport, Listing, ProductRow, RawListing, SimpleRow, UnifiedBatch};

/// A raw record rejected at the boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Quarantined {
    pub record: RawListing,
    pub reason: DomainError,
}

/// Outcome of boundary validation.
#[derive(Debug, Clone, Default)]
pub struct Validated {
    pub listings: Vec<Listing>,
    pub quarantined: Vec<Quarantined>,
}

/// Validate raw records, keeping input order among the accepted ones.
#[must_use]
pub fn validate(raw: Vec<RawListing>) -> Validated {
    let mut validated = Validated::default();
    for record in raw {
        match Listing::try_from(record.clone()) {
            Ok(listing) => validated.listings.push(listing),
            Err(reason) => {
                warn!(platform = %record.platform, reason = %reason, "listing quarantined");
                validated.quarantined.push(Quarantined { record, reason });
            }
        }
    }
    validated
}

/// Everything derived from a unified batch.
#[derive(Debug, Clone, Default)]
pub struct Aggregated {
    pub rows: Vec<ProductRow>,
    pub simple: Vec<SimpleRow>,
    pub report: CorpusReport,
    pub summary: Vec<SummaryRecord>,
}

/// Result of one full pass over a raw batch.
#[derive(Debug, Clone, Default)]
pub struct Processed {
    pub validated: Validated,
    pub batch: UnifiedBatch,
    pub aggregated: Aggregated,
}

/// Validate, unify and aggregate.
#[derive(Debug, Clone)]
pub struct Pipeline {
    unifier: Unifier,
    aggregator: Aggregator,
}

impl Pipeline {
    pub fn new(unifier: Unifier, aggregator: Aggregator) -> Self {
        Self {
            unifier,
            aggregator,
        }
    }

    #[must_use]
    pub fn unifier(&self) -> &Unifier {
        &self.unifier
    }

    pub async fn process(&self, raw: Vec<RawListing>) -> Processed {
        let validated = validate(raw);
        let batch = self.unifier.unify(&validated.listings).await;
        let aggregated = self.aggregate(&batch);

        info!(
            listings = validated.listings.len(),
            quarantined = validated.quarantined.len(),
            groups = batch.len(),
            arbitrage = aggregated.report.arbitrage_opportunities,
            "batch processed"
        );

        Processed {
            validated,
            batch,
            aggregated,
        }
    }

    #[must_use]
    pub fn aggregate(&self, batch: &UnifiedBatch) -> Aggregated {
        aggregate(&self.aggregator, batch)
    }
}

/// Rows, report and summary for an already unified batch.
#[must_use]
pub fn aggregate(aggregator: &Aggregator, batch: &UnifiedBatch) -> Aggregated {
    let rows = aggregator.product_rows(batch);
    let report = corpus_report(&rows);
    Aggregated {
        simple: simple_rows(&rows),
        summary: summary_statistics(&report),
        report,
        rows,
    }
}
