//! Corpus-level report and its flattened summary table.

use crate::domain::report::{CorpusReport, PlatformTotals, SummaryRecord};
use crate::domain::ProductRow;

/// Statistics over every row of a batch.
///
/// Platform totals count every payload of every group, not only the first
/// payload per platform.
#[must_use]
pub fn corpus_report(rows: &[ProductRow]) -> CorpusReport {
    let mut report = CorpusReport {
        total_products: rows.len(),
        ..CorpusReport::default()
    };

    for row in rows {
        for (platform, count) in &row.listings_per_platform {
            let totals = report
                .platform_coverage
                .entry(platform.clone())
                .or_insert_with(PlatformTotals::default);
            totals.count += count;
            totals.total_volume += row.volume_per_platform.get(platform).copied().unwrap_or(0.0);
        }
        *report
            .category_breakdown
            .entry(row.primary_category.clone())
            .or_default() += 1;
        report.confidence_distribution.record(row.confidence_score);
        if row.metrics.has_arbitrage() {
            report.arbitrage_opportunities += 1;
        }
    }
    report
}

/// The report as `(category, name, value)` lines.
#[must_use]
pub fn summary_statistics(report: &CorpusReport) -> Vec<SummaryRecord> {
    let mut records = Vec::new();
    let mut push = |category: &str, name: String, value: String| {
        records.push(SummaryRecord {
            metric_category: category.to_string(),
            metric_name: name,
            value,
        });
    };

    for (platform, totals) in &report.platform_coverage {
        push("platform_coverage", format!("{platform}.count"), totals.count.to_string());
        push(
            "platform_coverage",
            format!("{platform}.total_volume"),
            totals.total_volume.to_string(),
        );
    }
    for (category, count) in &report.category_breakdown {
        push("category_breakdown", category.clone(), count.to_string());
    }
    let dist = &report.confidence_distribution;
    for (label, count) in [
        ("High (0.8-1.0)", dist.high),
        ("Medium (0.6-0.8)", dist.medium),
        ("Low (0.0-0.6)", dist.low),
    ] {
        push("confidence_distribution", label.to_string(), count.to_string());
    }
    push("General", "total_products".into(), report.total_products.to_string());
    push(
        "General",
        "arbitrage_opportunities".into(),
        report.arbitrage_opportunities.to_string(),
    );
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::ConfidenceDistribution;

    #[test]
    fn empty_rows_give_zeroed_report() {
        let report = corpus_report(&[]);
        assert_eq!(report.total_products, 0);
        assert!(report.platform_coverage.is_empty());
        assert!(report.category_breakdown.is_empty());
        assert_eq!(report.confidence_distribution, ConfidenceDistribution::default());
    }

    #[test]
    fn summary_always_has_general_lines() {
        let records = summary_statistics(&CorpusReport::default());
        let general: Vec<_> = records
            .iter()
            .filter(|r| r.metric_category == "General")
            .map(|r| (r.metric_name.as_str(), r.value.as_str()))
            .collect();
        assert_eq!(
            general,
            vec![("total_products", "0"), ("arbitrage_opportunities", "0")]
        );
        assert_eq!(
            records
                .iter()
                .filter(|r| r.metric_category == "confidence_distribution")
                .count(),
            3
        );
    }
}
