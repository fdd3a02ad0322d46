//! JSON artifacts: raw collection, unified groups and the corpus report.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::file::{
    round3, write_atomic, ANALYSIS_REPORTS_FILE, CORPUS_FILE, RAW_DATA_FILE, UNIFIED_DATA_FILE,
};
use crate::domain::listing::DEFAULT_CATEGORY;
use crate::domain::{
    CorpusReport, Document, GroupId, MatchRecord, PlatformPayload, RawListing, UnifiedBatch,
    UnifiedGroup,
};
use crate::error::Result;

/// Groups above this confidence count as high-confidence matches.
pub const HIGH_CONFIDENCE: f64 = 0.8;

/// Contents of `raw_data.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDataFile {
    pub collection_timestamp: DateTime<Utc>,
    pub total_markets: usize,
    pub sources: Vec<String>,
    pub categories: Vec<String>,
    pub data: Vec<RawListing>,
}

impl RawDataFile {
    #[must_use]
    pub fn new(data: Vec<RawListing>) -> Self {
        let sources: BTreeSet<String> = data.iter().map(|r| r.platform.clone()).collect();
        let categories: BTreeSet<String> = data
            .iter()
            .map(|r| {
                r.category
                    .clone()
                    .unwrap_or_else(|| DEFAULT_CATEGORY.to_string())
            })
            .collect();
        Self {
            collection_timestamp: Utc::now(),
            total_markets: data.len(),
            sources: sources.into_iter().collect(),
            categories: categories.into_iter().collect(),
            data,
        }
    }
}

/// One entry of `unified_products`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnifiedProduct {
    /// Absent in files written by other tools; assigned on load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<GroupId>,
    /// Absent when the map key is the canonical name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_name: Option<String>,
    pub confidence: f64,
    pub product_count: usize,
    #[serde(default)]
    pub match_reasoning: String,
    #[serde(default)]
    pub matches: Vec<MatchRecord>,
    pub platforms: BTreeMap<String, Vec<PlatformPayload>>,
}

/// Contents of `unified_data.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnifiedDataFile {
    pub processing_timestamp: DateTime<Utc>,
    pub original_markets: usize,
    pub unified_groups: usize,
    pub compression_ratio: f64,
    pub high_confidence_matches: usize,
    pub unified_products: BTreeMap<String, UnifiedProduct>,
}

impl UnifiedDataFile {
    /// Key groups by canonical name; a colliding name gets its group id
    /// appended so no group is lost.
    #[must_use]
    pub fn from_batch(batch: &UnifiedBatch, original_markets: usize) -> Self {
        let mut unified_products = BTreeMap::new();
        for group in batch {
            let mut key = group.canonical_name.clone();
            if unified_products.contains_key(&key) {
                key = format!("{} (#{})", group.canonical_name, group.id);
            }
            unified_products.insert(
                key,
                UnifiedProduct {
                    group_id: Some(group.id),
                    canonical_name: Some(group.canonical_name.clone()),
                    confidence: round3(group.confidence),
                    product_count: group.member_count,
                    match_reasoning: group.rationale.clone(),
                    matches: group.matches.clone(),
                    platforms: group.platforms.clone(),
                },
            );
        }

        let compression_ratio = if original_markets == 0 {
            0.0
        } else {
            round3(batch.len() as f64 / original_markets as f64)
        };

        Self {
            processing_timestamp: Utc::now(),
            original_markets,
            unified_groups: batch.len(),
            compression_ratio,
            high_confidence_matches: batch
                .iter()
                .filter(|g| g.confidence > HIGH_CONFIDENCE)
                .count(),
            unified_products,
        }
    }

    /// Rebuild the batch, ordered by group id.
    ///
    /// Entries without an id are numbered after the highest id present,
    /// in key order.
    #[must_use]
    pub fn into_batch(self) -> UnifiedBatch {
        let mut next = self
            .unified_products
            .values()
            .filter_map(|p| p.group_id)
            .map(GroupId::seq)
            .max()
            .unwrap_or(0);

        let mut groups: Vec<UnifiedGroup> = self
            .unified_products
            .into_iter()
            .map(|(key, product)| {
                let id = product.group_id.unwrap_or_else(|| {
                    next += 1;
                    GroupId::new(next)
                });
                UnifiedGroup {
                    id,
                    canonical_name: product.canonical_name.unwrap_or(key),
                    confidence: product.confidence,
                    rationale: product.match_reasoning,
                    matches: product.matches,
                    member_count: product.product_count,
                    platforms: product.platforms,
                }
            })
            .collect();
        groups.sort_by_key(|g| g.id);
        UnifiedBatch::from(groups)
    }
}

/// Reads a `unified_data.json` file.
pub fn load_unified(path: &Path) -> Result<UnifiedDataFile> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Writes the JSON artifacts into one output directory.
#[derive(Debug, Clone)]
pub struct JsonExporter {
    dir: PathBuf,
}

impl JsonExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn write_raw(&self, raw: &RawDataFile) -> Result<PathBuf> {
        let path = self.write(RAW_DATA_FILE, raw)?;
        info!(path = %path.display(), markets = raw.total_markets, "wrote raw data");
        Ok(path)
    }

    pub fn write_unified(&self, unified: &UnifiedDataFile) -> Result<PathBuf> {
        let path = self.write(UNIFIED_DATA_FILE, unified)?;
        info!(
            path = %path.display(),
            groups = unified.unified_groups,
            compression_ratio = unified.compression_ratio,
            "wrote unified data"
        );
        Ok(path)
    }

    pub fn write_analysis(&self, report: &CorpusReport) -> Result<PathBuf> {
        let path = self.write(ANALYSIS_REPORTS_FILE, report)?;
        info!(path = %path.display(), products = report.total_products, "wrote analysis reports");
        Ok(path)
    }

    /// One document per line.
    pub fn write_corpus(&self, docs: &[Document]) -> Result<PathBuf> {
        let mut lines = Vec::new();
        for doc in docs {
            serde_json::to_writer(&mut lines, doc)?;
            lines.push(b'\n');
        }
        let path = write_atomic(&self.dir.join(CORPUS_FILE), &lines)?;
        info!(path = %path.display(), documents = docs.len(), "wrote corpus");
        Ok(path)
    }

    fn write<T: Serialize>(&self, name: &str, value: &T) -> Result<PathBuf> {
        let json = serde_json::to_string_pretty(value)?;
        write_atomic(&self.dir.join(name), json.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Listing;

    fn group(seq: u32, name: &str, confidence: f64) -> UnifiedGroup {
        UnifiedGroup {
            id: GroupId::new(seq),
            canonical_name: name.to_string(),
            confidence,
            rationale: "Primary listing".to_string(),
            matches: vec![],
            member_count: 1,
            platforms: BTreeMap::from([(
                "Kalshi".to_string(),
                vec![Listing::new("Kalshi", name).with_price(0.4).payload()],
            )]),
        }
    }

    #[test]
    fn unified_file_carries_processing_metadata() {
        let batch = UnifiedBatch::from(vec![group(1, "A", 0.91234), group(2, "B", 0.7)]);
        let file = UnifiedDataFile::from_batch(&batch, 3);

        assert_eq!(file.original_markets, 3);
        assert_eq!(file.unified_groups, 2);
        assert_eq!(file.compression_ratio, 0.667);
        assert_eq!(file.high_confidence_matches, 1);
        assert_eq!(file.unified_products["A"].confidence, 0.912);
    }

    #[test]
    fn empty_batch_has_zero_compression() {
        let file = UnifiedDataFile::from_batch(&UnifiedBatch::new(), 0);
        assert_eq!(file.compression_ratio, 0.0);
        assert!(file.unified_products.is_empty());
    }

    #[test]
    fn colliding_names_get_distinct_keys() {
        let batch = UnifiedBatch::from(vec![group(1, "Same", 1.0), group(2, "Same", 1.0)]);
        let file = UnifiedDataFile::from_batch(&batch, 2);

        assert_eq!(file.unified_products.len(), 2);
        assert!(file.unified_products.contains_key("Same (#g0002)"));

        let back = file.into_batch();
        assert_eq!(back.len(), 2);
        assert_eq!(back.groups()[1].canonical_name, "Same");
    }

    #[test]
    fn entries_without_ids_are_numbered_after_existing() {
        let json = r#"{
            "processing_timestamp": "2025-01-01T00:00:00Z",
            "original_markets": 2,
            "unified_groups": 2,
            "compression_ratio": 1.0,
            "high_confidence_matches": 0,
            "unified_products": {
                "Alpha": {"confidence": 1.0, "product_count": 1, "platforms": {}},
                "Beta": {"group_id": 4, "confidence": 0.7, "product_count": 2, "platforms": {}}
            }
        }"#;
        let file: UnifiedDataFile = serde_json::from_str(json).unwrap();
        let batch = file.into_batch();

        assert_eq!(batch.groups()[0].canonical_name, "Beta");
        assert_eq!(batch.get("Alpha").unwrap().id, GroupId::new(5));
    }

    #[test]
    fn raw_file_lists_sources_and_categories() {
        let data = vec![
            RawListing::from(&Listing::new("Kalshi", "x").with_category("Politics")),
            RawListing::from(&Listing::new("Manifold", "y")),
        ];
        let raw = RawDataFile::new(data);

        assert_eq!(raw.total_markets, 2);
        assert_eq!(raw.sources, vec!["Kalshi", "Manifold"]);
        assert_eq!(raw.categories, vec!["General", "Politics"]);
    }

    #[test]
    fn exporter_writes_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = JsonExporter::new(dir.path());

        let path = exporter.write_analysis(&CorpusReport::default()).unwrap();

        assert_eq!(path, dir.path().join(ANALYSIS_REPORTS_FILE));
        let back: CorpusReport =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(back, CorpusReport::default());
    }

    #[test]
    fn corpus_is_one_document_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = JsonExporter::new(dir.path());
        let docs = vec![
            Document::new("first").with_meta("type", "a"),
            Document::new("second\nline").with_meta("type", "b"),
        ];

        let path = exporter.write_corpus(&docs).unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        let back: Vec<Document> = content
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(back, docs);
    }
}
