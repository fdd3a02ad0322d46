//! Runs the configured sources one after another.
//!
//! Each source failure is logged and contributes nothing (or its demo
//! fixture when fallback is enabled); a run never aborts because one
//! platform is down.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{error, info, warn};

use crate::domain::RawListing;
use crate::error::SourceError;
use crate::infrastructure::config::source::SourcesConfig;
use crate::port::outbound::source::ListingSource;

use super::demo::{self, DemoSource};
use super::file::FileSource;
use super::kalshi::KalshiSource;
use super::manifold::ManifoldSource;
use super::polymarket::PolymarketSource;

/// How one source contributed to a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceOutcome {
    pub source: String,
    pub fetched: usize,
    /// True when the demo fixture replaced a failed or empty fetch.
    pub fallback: bool,
    pub error: Option<String>,
}

/// Raw listings of one collection run.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    pub listings: Vec<RawListing>,
    pub outcomes: Vec<SourceOutcome>,
}

/// Runs sources one after another with a politeness delay between them.
pub struct Collector {
    sources: Vec<Arc<dyn ListingSource>>,
    delay: Duration,
    demo_fallback: bool,
}

impl Collector {
    pub fn new(sources: Vec<Arc<dyn ListingSource>>, delay: Duration, demo_fallback: bool) -> Self {
        Self {
            sources,
            delay,
            demo_fallback,
        }
    }

    /// Sources enabled in `config`, files last.
    #[must_use]
    pub fn from_config(config: &SourcesConfig) -> Self {
        let timeout = Duration::from_millis(config.timeout_ms);
        let mut sources: Vec<Arc<dyn ListingSource>> = Vec::new();

        if config.demo {
            sources.extend(
                demo::DEMO_PLATFORMS
                    .into_iter()
                    .map(|p| Arc::new(DemoSource::new(p)) as Arc<dyn ListingSource>),
            );
        } else {
            if config.polymarket {
                sources.push(Arc::new(PolymarketSource::new(
                    config.polymarket_url.clone(),
                    config.limit,
                    timeout,
                )));
            }
            if config.kalshi {
                sources.push(Arc::new(KalshiSource::new(
                    config.kalshi_url.clone(),
                    config.limit,
                    timeout,
                )));
            }
            if config.manifold {
                sources.push(Arc::new(ManifoldSource::new(
                    config.manifold_url.clone(),
                    config.limit,
                    timeout,
                )));
            }
        }
        sources.extend(
            config
                .files
                .iter()
                .map(|path| Arc::new(FileSource::new(path)) as Arc<dyn ListingSource>),
        );

        let delay = if config.demo {
            Duration::ZERO
        } else {
            Duration::from_millis(config.delay_ms)
        };
        Self::new(sources, delay, config.demo_fallback)
    }

    #[must_use]
    pub fn source_names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    pub async fn collect(&self) -> Collection {
        let mut collection = Collection::default();

        for (index, source) in self.sources.iter().enumerate() {
            if index > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            let name = source.name();
            let result = match source.fetch().await {
                Ok(listings) if listings.is_empty() => Err(SourceError::Empty { source_name: name }.into()),
                other => other,
            };

            let outcome = match result {
                Ok(listings) => {
                    let fetched = listings.len();
                    collection.listings.extend(listings);
                    SourceOutcome {
                        source: name.to_string(),
                        fetched,
                        fallback: false,
                        error: None,
                    }
                }
                Err(e) => {
                    error!(source = name, error = %e, "source failed");
                    let fixture = if self.demo_fallback {
                        demo::fixture(name)
                    } else {
                        Vec::new()
                    };
                    if !fixture.is_empty() {
                        warn!(source = name, count = fixture.len(), "using demo listings");
                    }
                    let fetched = fixture.len();
                    let fallback = fetched > 0;
                    collection.listings.extend(fixture);
                    SourceOutcome {
                        source: name.to_string(),
                        fetched,
                        fallback,
                        error: Some(e.to_string()),
                    }
                }
            };
            collection.outcomes.push(outcome);
        }

        info!(
            sources = self.sources.len(),
            listings = collection.listings.len(),
            "collection complete"
        );
        collection
    }
}
