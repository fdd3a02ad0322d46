//! CSV tables: comprehensive rows, simple comparison rows and summary
//! statistics.
//!
//! Platform columns are the union of platforms seen in the rows, in
//! lexicographic order.

use std::collections::BTreeSet;
use std::path::PathBuf;

use tracing::info;

use super::file::{write_atomic, COMPREHENSIVE_CSV_FILE, SIMPLE_CSV_FILE, SUMMARY_CSV_FILE};
use crate::domain::report::SummaryRecord;
use crate::domain::{ProductRow, SimpleRow};
use crate::error::Result;

/// Placeholder for a missing value in the simple table.
const MISSING: &str = "-";

/// Column-safe form of a platform name (`Prediction-Market` -> `Prediction_Market`).
#[must_use]
pub fn column_name(platform: &str) -> String {
    platform.replace(['-', ' '], "_")
}

fn number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn number_or_dash(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| v.to_string())
}

fn into_bytes(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>> {
    Ok(writer.into_inner().map_err(|e| e.into_error())?)
}

/// Comprehensive table, one line per row in the given order.
pub fn comprehensive_table(rows: &[ProductRow]) -> Result<Vec<u8>> {
    let platforms: BTreeSet<&str> = rows
        .iter()
        .flat_map(|r| r.quotes.keys().map(String::as_str))
        .collect();

    let mut header = vec![
        "Group_ID".to_string(),
        "Product_Name".to_string(),
        "Confidence_Score".to_string(),
        "Product_Count".to_string(),
        "Match_Reasoning".to_string(),
    ];
    header.extend(platforms.iter().map(|p| format!("{}_Price", column_name(p))));
    header.extend(platforms.iter().map(|p| format!("{}_Volume", column_name(p))));
    header.extend(
        [
            "Primary_Category",
            "Min_Price",
            "Max_Price",
            "Avg_Price",
            "Price_Spread",
            "Price_Variance",
            "Total_Volume",
            "Avg_Volume",
            "Max_Volume",
            "Platform_Count",
            "Available_Platforms",
            "Best_Price_Platform",
            "Best_Price_Value",
            "Arbitrage_Opportunity",
            "Market_IDs",
        ]
        .map(String::from),
    );

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&header)?;

    for row in rows {
        let metrics = &row.metrics;
        let prices = metrics.price_stats;
        let volumes = metrics.volume_stats;
        let best = metrics.best_opportunities.as_ref();

        let mut record = vec![
            row.group_id.to_string(),
            row.product_name.clone(),
            row.confidence_score.to_string(),
            row.product_count.to_string(),
            row.match_reasoning.clone(),
        ];
        record.extend(
            platforms
                .iter()
                .map(|p| number(row.quotes.get(*p).and_then(|q| q.price))),
        );
        record.extend(
            platforms
                .iter()
                .map(|p| number(row.quotes.get(*p).and_then(|q| q.volume))),
        );
        record.extend([
            row.primary_category.clone(),
            number(prices.map(|p| p.min_price)),
            number(prices.map(|p| p.max_price)),
            number(prices.map(|p| p.avg_price)),
            number(prices.map(|p| p.price_spread)),
            number(prices.map(|p| p.price_variance)),
            row.total_volume().to_string(),
            number(volumes.map(|v| v.avg_volume)),
            number(volumes.map(|v| v.max_volume)),
            metrics.platform_coverage.platforms_count.to_string(),
            metrics.platform_coverage.platforms_list.join(", "),
            best.map(|b| b.highest_probability_platform.clone())
                .unwrap_or_default(),
            number(best.map(|b| b.highest_probability_price)),
            metrics.has_arbitrage().to_string(),
            row.market_ids.clone(),
        ]);
        writer.write_record(&record)?;
    }

    into_bytes(writer)
}

/// Simple comparison table; missing values are written as `-`.
pub fn simple_table(rows: &[SimpleRow]) -> Result<Vec<u8>> {
    let platforms: BTreeSet<&str> = rows
        .iter()
        .flat_map(|r| r.prices.keys().map(String::as_str))
        .collect();

    let mut header = vec!["Product".to_string()];
    header.extend(platforms.iter().map(|p| column_name(p)));
    header.extend(
        ["Best_Price", "Price_Spread", "Confidence", "Category", "Platforms"].map(String::from),
    );

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&header)?;

    for row in rows {
        let mut record = vec![row.product.clone()];
        record.extend(
            platforms
                .iter()
                .map(|p| number_or_dash(row.prices.get(*p).copied().flatten())),
        );
        record.extend([
            number_or_dash(row.best_price),
            number_or_dash(row.price_spread),
            row.confidence.to_string(),
            row.category.clone(),
            row.platforms.to_string(),
        ]);
        writer.write_record(&record)?;
    }

    into_bytes(writer)
}

/// Summary statistics table.
pub fn summary_table(records: &[SummaryRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(record)?;
    }
    if records.is_empty() {
        writer.write_record(["Metric_Category", "Metric_Name", "Value"])?;
    }
    into_bytes(writer)
}

/// Writes the CSV tables into one output directory.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    dir: PathBuf,
}

impl CsvExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn write_comprehensive(&self, rows: &[ProductRow]) -> Result<PathBuf> {
        let path = write_atomic(
            &self.dir.join(COMPREHENSIVE_CSV_FILE),
            &comprehensive_table(rows)?,
        )?;
        info!(path = %path.display(), rows = rows.len(), "wrote comprehensive table");
        Ok(path)
    }

    pub fn write_simple(&self, rows: &[SimpleRow]) -> Result<PathBuf> {
        let path = write_atomic(&self.dir.join(SIMPLE_CSV_FILE), &simple_table(rows)?)?;
        info!(path = %path.display(), rows = rows.len(), "wrote simple table");
        Ok(path)
    }

    pub fn write_summary(&self, records: &[SummaryRecord]) -> Result<PathBuf> {
        let path = write_atomic(&self.dir.join(SUMMARY_CSV_FILE), &summary_table(records)?)?;
        info!(path = %path.display(), rows = records.len(), "wrote summary statistics");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn simple(product: &str, prices: &[(&str, Option<f64>)]) -> SimpleRow {
        SimpleRow {
            product: product.to_string(),
            prices: prices
                .iter()
                .map(|(p, v)| ((*p).to_string(), *v))
                .collect::<BTreeMap<_, _>>(),
            best_price: prices.iter().filter_map(|(_, v)| *v).reduce(f64::max),
            price_spread: None,
            confidence: 1.0,
            category: "Politics".to_string(),
            platforms: prices.len(),
        }
    }

    #[test]
    fn column_names_replace_hyphens() {
        assert_eq!(column_name("Prediction-Market"), "Prediction_Market");
        assert_eq!(column_name("Kalshi"), "Kalshi");
    }

    #[test]
    fn simple_table_uses_platform_union_and_dashes() {
        let rows = vec![
            simple("A", &[("Kalshi", Some(0.5))]),
            simple("B", &[("Prediction-Market", None)]),
        ];
        let text = String::from_utf8(simple_table(&rows).unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "Product,Kalshi,Prediction_Market,Best_Price,Price_Spread,Confidence,Category,Platforms"
        );
        assert_eq!(lines[1], "A,0.5,-,0.5,-,1,Politics,1");
        assert_eq!(lines[2], "B,-,-,-,-,1,Politics,1");
    }

    #[test]
    fn summary_table_has_header_when_empty() {
        let text = String::from_utf8(summary_table(&[]).unwrap()).unwrap();
        assert_eq!(text.trim(), "Metric_Category,Metric_Name,Value");
    }

    #[test]
    fn summary_table_serializes_records() {
        let records = vec![SummaryRecord {
            metric_category: "General".to_string(),
            metric_name: "total_products".to_string(),
            value: "3".to_string(),
        }];
        let text = String::from_utf8(summary_table(&records).unwrap()).unwrap();
        assert_eq!(
            text,
            "Metric_Category,Metric_Name,Value\nGeneral,total_products,3\n"
        );
    }

    #[test]
    fn comprehensive_header_is_stable_for_empty_input() {
        let text = String::from_utf8(comprehensive_table(&[]).unwrap()).unwrap();
        assert!(text.starts_with("Group_ID,Product_Name,Confidence_Score"));
        assert!(text.trim_end().ends_with("Market_IDs"));
    }
}
