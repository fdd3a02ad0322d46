//! Collection, unification and reporting use cases.
//!
//! Requests carry raw TOML and plain strings so that adapters never need
//! infrastructure types. An absent `output_dir` means the configured one.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::SimilarityVerdict;
use crate::error::Result;

/// Settings shared by every pipeline request.
#[derive(Debug, Clone, Default)]
pub struct StageOptions {
    /// Raw TOML configuration content.
    pub config_toml: String,
    /// Override for the output directory.
    pub output_dir: Option<String>,
    /// Override for the log level.
    pub log_level: Option<String>,
    /// Whether to output logs as JSON.
    pub json_logs: bool,
}

#[derive(Debug, Clone, Default)]
pub struct CollectRequest {
    pub options: StageOptions,
    /// Serve bundled fixtures instead of calling the platforms.
    pub demo: bool,
}

#[derive(Debug, Clone, Default)]
pub struct UnifyRequest {
    pub options: StageOptions,
    /// Raw batch file; defaults to `raw_data.json` in the output directory.
    pub input: Option<String>,
    /// Skip the text model even when a key is available.
    pub lexical_only: bool,
    /// Override for the acceptance threshold.
    pub threshold: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct ReportRequest {
    pub options: StageOptions,
    /// Unified file; defaults to `unified_data.json` in the output directory.
    pub input: Option<String>,
    /// Rows echoed back in the summary.
    pub top: usize,
}

#[derive(Debug, Clone, Default)]
pub struct RunRequest {
    pub options: StageOptions,
    pub demo: bool,
    pub lexical_only: bool,
    pub threshold: Option<f64>,
    pub top: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ScoreRequest {
    pub options: StageOptions,
    pub a: String,
    pub b: String,
    pub lexical_only: bool,
}

#[derive(Debug, Clone, Default)]
pub struct CorpusRequest {
    pub options: StageOptions,
    /// Directory holding `unified_data.json` and `raw_data.json`.
    pub input_dir: Option<String>,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

/// How one source contributed to a collection.
#[derive(Debug, Clone, Serialize)]
pub struct SourceLine {
    pub source: String,
    pub fetched: usize,
    pub fallback: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CollectSummary {
    pub total_markets: usize,
    pub sources: Vec<SourceLine>,
    pub path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnifySummary {
    pub original_markets: usize,
    pub quarantined: usize,
    pub unified_groups: usize,
    pub compression_ratio: f64,
    pub high_confidence_matches: usize,
    pub scorer: String,
    pub path: String,
}

/// One product as echoed back to the operator.
#[derive(Debug, Clone, Serialize)]
pub struct ProductLine {
    pub name: String,
    pub confidence: f64,
    pub platforms: usize,
    pub best_platform: Option<String>,
    pub best_price: Option<f64>,
    pub price_spread: Option<f64>,
    pub arbitrage: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub total_products: usize,
    pub arbitrage_opportunities: usize,
    pub top: Vec<ProductLine>,
    pub files: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub collect: CollectSummary,
    pub unify: UnifySummary,
    pub report: ReportSummary,
}

/// Pairwise scoring breakdown for `score`.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreView {
    pub normalized_a: String,
    pub normalized_b: String,
    pub keyword_similarity: f64,
    pub sequence_similarity: f64,
    pub threshold: f64,
    /// Scorer that produced `verdict`.
    pub scorer: String,
    pub verdict: SimilarityVerdict,
    pub accepted: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CorpusSummary {
    pub documents: usize,
    pub chunks: usize,
    pub path: String,
}

/// Pipeline use-cases for operator-facing adapters.
#[async_trait]
pub trait PipelineOperator: Send + Sync {
    /// Fetch listings and write `raw_data.json`.
    async fn collect(&self, request: CollectRequest) -> Result<CollectSummary>;

    /// Unify a raw batch and write `unified_data.json`.
    async fn unify(&self, request: UnifyRequest) -> Result<UnifySummary>;

    /// Aggregate a unified file into CSV tables and the analysis report.
    fn report(&self, request: ReportRequest) -> Result<ReportSummary>;

    /// Collect, unify and report in one pass.
    async fn run(&self, request: RunRequest) -> Result<RunSummary>;

    /// Score one pair of titles.
    async fn score(&self, request: ScoreRequest) -> Result<ScoreView>;

    /// Build the retrieval corpus from exported files.
    fn corpus(&self, request: CorpusRequest) -> Result<CorpusSummary>;
}
