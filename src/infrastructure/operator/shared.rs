//! Shared helper routines for operator implementations.

use std::path::PathBuf;

use crate::adapter::outbound::source::collector::SourceOutcome;
use crate::domain::ProductRow;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::inbound::operator::pipeline::{ProductLine, SourceLine, StageOptions};

/// Parse config, apply request overrides, re-validate and start logging.
pub(super) fn load_config(
    options: &StageOptions,
    apply: impl FnOnce(&mut Config),
) -> Result<Config> {
    let mut config = Config::parse_toml(&options.config_toml)?;

    if let Some(ref log_level) = options.log_level {
        config.logging.level = log_level.clone();
    }
    if options.json_logs {
        config.logging.format = "json".to_string();
    }
    if let Some(ref output_dir) = options.output_dir {
        config.output_dir = PathBuf::from(output_dir);
    }
    apply(&mut config);

    config.validate()?;
    config.init_logging();
    Ok(config)
}

pub(super) fn display(path: &std::path::Path) -> String {
    path.display().to_string()
}

pub(super) fn source_line(outcome: SourceOutcome) -> SourceLine {
    SourceLine {
        source: outcome.source,
        fetched: outcome.fetched,
        fallback: outcome.fallback,
        error: outcome.error,
    }
}

pub(super) fn product_line(row: &ProductRow) -> ProductLine {
    let best = row.metrics.best_opportunities.as_ref();
    ProductLine {
        name: row.product_name.clone(),
        confidence: row.confidence_score,
        platforms: row.metrics.platform_coverage.platforms_count,
        best_platform: best.map(|b| b.highest_probability_platform.clone()),
        best_price: best.map(|b| b.highest_probability_price),
        price_spread: row.metrics.price_stats.map(|p| p.price_spread),
        arbitrage: row.metrics.has_arbitrage(),
    }
}
