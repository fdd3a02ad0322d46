//! Collection and processing pipeline factory.

use crate::adapter::outbound::source::collector::Collector;
use crate::application::aggregate::metrics::Aggregator;
use crate::application::pipeline::Pipeline;
use crate::application::scoring::fallback::Fallback;
use crate::application::unify::Unifier;
use crate::infrastructure::config::settings::Config;

/// Build the collector for the configured sources.
pub fn build_collector(config: &Config) -> Collector {
    Collector::from_config(&config.sources)
}

/// Build the unification engine around `scorer`.
pub fn build_unifier(config: &Config, scorer: Fallback) -> Unifier {
    Unifier::new(scorer)
        .with_threshold(config.matching.threshold)
        .with_max_concurrency(config.matching.max_concurrency)
}

/// Build the unify-then-aggregate pipeline.
pub fn build_pipeline(config: &Config, scorer: Fallback) -> Pipeline {
    Pipeline::new(
        build_unifier(config, scorer),
        Aggregator::new(config.aggregation.arbitrage_margin),
    )
}
