//! Pipeline operator implementation.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{info, warn};

use crate::adapter::outbound::export::csv::CsvExporter;
use crate::adapter::outbound::export::file::{RAW_DATA_FILE, UNIFIED_DATA_FILE};
use crate::adapter::outbound::export::json::{
    load_unified, JsonExporter, RawDataFile, UnifiedDataFile,
};
use crate::adapter::outbound::source::collector::Collection;
use crate::adapter::outbound::source::file::parse_batch;
use crate::application::aggregate::metrics::Aggregator;
use crate::application::corpus;
use crate::application::normalize::{keywords, normalize};
use crate::application::pipeline::{aggregate, validate, Aggregated, Processed};
use crate::application::scoring::lexical::{jaccard, sequence_ratio};
use crate::domain::RawListing;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::factory;
use crate::port::inbound::operator::pipeline::{
    CollectRequest, CollectSummary, CorpusRequest, CorpusSummary, PipelineOperator,
    ReportRequest, ReportSummary, RunRequest, RunSummary, ScoreRequest, ScoreView,
    UnifyRequest, UnifySummary,
};

use super::{entry::Operator, shared};

#[async_trait]
impl PipelineOperator for Operator {
    async fn collect(&self, request: CollectRequest) -> Result<CollectSummary> {
        let config = shared::load_config(&request.options, |config| {
            config.sources.demo |= request.demo;
        })?;
        let (summary, _) = collect_stage(&config).await?;
        Ok(summary)
    }

    async fn unify(&self, request: UnifyRequest) -> Result<UnifySummary> {
        let config = shared::load_config(&request.options, |config| {
            apply_matching(config, request.lexical_only, request.threshold);
        })?;
        let input = request
            .input
            .map_or_else(|| config.output_dir.join(RAW_DATA_FILE), PathBuf::from);
        let raw = read_raw(&input)?;
        let (summary, _) = unify_stage(&config, raw).await?;
        Ok(summary)
    }

    fn report(&self, request: ReportRequest) -> Result<ReportSummary> {
        let config = shared::load_config(&request.options, |_| {})?;
        let input = request
            .input
            .map_or_else(|| config.output_dir.join(UNIFIED_DATA_FILE), PathBuf::from);
        let batch = load_unified(&input)?.into_batch();
        info!(path = %input.display(), groups = batch.len(), "loaded unified data");

        let aggregated = aggregate(&aggregator(&config), &batch);
        report_stage(&config, &aggregated, request.top)
    }

    async fn run(&self, request: RunRequest) -> Result<RunSummary> {
        let config = shared::load_config(&request.options, |config| {
            config.sources.demo |= request.demo;
            apply_matching(config, request.lexical_only, request.threshold);
        })?;
        info!(output_dir = %config.output_dir.display(), "unimarket run starting");

        let (collect, raw) = collect_stage(&config).await?;
        let (unify, processed) = unify_stage(&config, raw).await?;
        let report = report_stage(&config, &processed.aggregated, request.top)?;

        info!(
            markets = collect.total_markets,
            groups = unify.unified_groups,
            arbitrage = report.arbitrage_opportunities,
            "unimarket run complete"
        );
        Ok(RunSummary {
            collect,
            unify,
            report,
        })
    }

    async fn score(&self, request: ScoreRequest) -> Result<ScoreView> {
        let config = shared::load_config(&request.options, |config| {
            apply_matching(config, request.lexical_only, None);
        })?;
        let scorer = factory::scorer::build_scorer(
            &config,
            factory::llm::build_llm_client(&config),
        );
        let unifier = factory::pipeline::build_unifier(&config, scorer.clone());

        let verdict = scorer.verdict(&request.a, &request.b).await;
        Ok(ScoreView {
            normalized_a: normalize(&request.a),
            normalized_b: normalize(&request.b),
            keyword_similarity: jaccard(&keywords(&request.a), &keywords(&request.b)),
            sequence_similarity: sequence_ratio(&request.a, &request.b),
            threshold: unifier.threshold(),
            scorer: scorer.primary_name().to_string(),
            accepted: unifier.accepts(&verdict),
            verdict,
        })
    }

    fn corpus(&self, request: CorpusRequest) -> Result<CorpusSummary> {
        if request.chunk_size == 0 || request.chunk_overlap >= request.chunk_size {
            return Err(ConfigError::InvalidValue {
                field: "chunk_overlap",
                reason: "must be smaller than a non-zero chunk size".to_string(),
            }
            .into());
        }

        let config = shared::load_config(&request.options, |_| {})?;
        let input_dir = request
            .input_dir
            .map_or_else(|| config.output_dir.clone(), PathBuf::from);

        let batch = load_unified(&input_dir.join(UNIFIED_DATA_FILE))?.into_batch();
        let raw_path = input_dir.join(RAW_DATA_FILE);
        let listings = if raw_path.exists() {
            validate(read_raw(&raw_path)?).listings
        } else {
            warn!(path = %raw_path.display(), "raw data not found, corpus has no listing documents");
            Vec::new()
        };

        let aggregated = aggregate(&aggregator(&config), &batch);
        let docs = corpus::documents(&batch, &listings, &aggregated.report);
        let chunks = corpus::chunk_documents(&docs, request.chunk_size, request.chunk_overlap);
        let path = JsonExporter::new(&config.output_dir).write_corpus(&chunks)?;

        Ok(CorpusSummary {
            documents: docs.len(),
            chunks: chunks.len(),
            path: shared::display(&path),
        })
    }
}

fn apply_matching(config: &mut Config, lexical_only: bool, threshold: Option<f64>) {
    if lexical_only {
        config.matching.semantic = false;
    }
    if let Some(threshold) = threshold {
        config.matching.threshold = threshold;
    }
}

fn aggregator(config: &Config) -> Aggregator {
    Aggregator::new(config.aggregation.arbitrage_margin)
}

fn read_raw(path: &Path) -> Result<Vec<RawListing>> {
    let content = std::fs::read_to_string(path)?;
    let raw = parse_batch(&content)?;
    info!(path = %path.display(), records = raw.len(), "loaded raw data");
    Ok(raw)
}

async fn collect_stage(config: &Config) -> Result<(CollectSummary, Vec<RawListing>)> {
    let collector = factory::pipeline::build_collector(config);
    info!(sources = ?collector.source_names(), "collecting listings");

    let Collection { listings, outcomes } = collector.collect().await;
    let raw = RawDataFile::new(listings);
    let path = JsonExporter::new(&config.output_dir).write_raw(&raw)?;

    let summary = CollectSummary {
        total_markets: raw.total_markets,
        sources: outcomes.into_iter().map(shared::source_line).collect(),
        path: shared::display(&path),
    };
    Ok((summary, raw.data))
}

async fn unify_stage(config: &Config, raw: Vec<RawListing>) -> Result<(UnifySummary, Processed)> {
    let scorer = factory::scorer::build_scorer(config, factory::llm::build_llm_client(config));
    let scorer_name = scorer.primary_name();
    let pipeline = factory::pipeline::build_pipeline(config, scorer);

    let processed = pipeline.process(raw).await;
    let unified = UnifiedDataFile::from_batch(&processed.batch, processed.validated.listings.len());
    let path = JsonExporter::new(&config.output_dir).write_unified(&unified)?;

    let summary = UnifySummary {
        original_markets: unified.original_markets,
        quarantined: processed.validated.quarantined.len(),
        unified_groups: unified.unified_groups,
        compression_ratio: unified.compression_ratio,
        high_confidence_matches: unified.high_confidence_matches,
        scorer: scorer_name.to_string(),
        path: shared::display(&path),
    };
    Ok((summary, processed))
}

fn report_stage(config: &Config, aggregated: &Aggregated, top: usize) -> Result<ReportSummary> {
    let csv = CsvExporter::new(&config.output_dir);
    let json = JsonExporter::new(&config.output_dir);
    let files = [
        csv.write_comprehensive(&aggregated.rows)?,
        csv.write_simple(&aggregated.simple)?,
        csv.write_summary(&aggregated.summary)?,
        json.write_analysis(&aggregated.report)?,
    ];

    Ok(ReportSummary {
        total_products: aggregated.report.total_products,
        arbitrage_opportunities: aggregated.report.arbitrage_opportunities,
        top: aggregated
            .rows
            .iter()
            .take(top)
            .map(shared::product_line)
            .collect(),
        files: files.iter().map(|p| shared::display(p)).collect(),
    })
}
