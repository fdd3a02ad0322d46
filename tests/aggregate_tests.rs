//! Validation, unification and aggregation as one pass.

use std::sync::Arc;

use serde_json::{json, Value};
use unimarket::adapter::outbound::export::json::load_unified;
use unimarket::application::aggregate::metrics::Aggregator;
use unimarket::application::pipeline::{aggregate, Pipeline};
use unimarket::application::scoring::fallback::Fallback;
use unimarket::application::scoring::lexical::LexicalScorer;
use unimarket::application::unify::Unifier;
use unimarket::domain::RawListing;
use unimarket::testkit::listing::{raw, BITCOIN, REPUBLICAN, TRUMP};
use unimarket::testkit::scorer::ScriptedScorer;

fn pipeline(scorer: ScriptedScorer) -> Pipeline {
    let unifier = Unifier::new(Fallback::new(Arc::new(scorer), LexicalScorer::default()));
    Pipeline::new(unifier, Aggregator::new(0.05))
}

fn election_batch() -> Vec<RawListing> {
    vec![
        raw("Polymarket", TRUMP, json!(0.55), json!(1000)),
        raw("Kalshi", REPUBLICAN, json!("N/A"), json!("2500")),
        raw("Manifold", BITCOIN, json!("0.30"), Value::Null),
        raw("Manifold", "   ", json!(0.5), json!(10)),
    ]
}

#[tokio::test]
async fn blank_titles_are_quarantined_not_fatal() {
    let processed = pipeline(ScriptedScorer::order_sensitive())
        .process(election_batch())
        .await;

    assert_eq!(processed.validated.listings.len(), 3);
    assert_eq!(processed.validated.quarantined.len(), 1);
    assert_eq!(processed.batch.listing_count(), 3);
}

#[tokio::test]
async fn unparseable_price_is_left_out_of_statistics() {
    let processed = pipeline(ScriptedScorer::order_sensitive())
        .process(election_batch())
        .await;

    let row = processed
        .aggregated
        .rows
        .iter()
        .find(|r| r.product_name == TRUMP)
        .expect("merged row");
    let prices = row.metrics.price_stats.expect("one valid price");
    assert_eq!(prices.min_price, 0.55);
    assert_eq!(prices.max_price, 0.55);
    assert_eq!(prices.price_spread, 0.0);

    let best = row.metrics.best_opportunities.as_ref().expect("best price");
    assert_eq!(best.highest_probability_platform, "Polymarket");
    assert!(!best.arbitrage_opportunity);

    assert_eq!(row.quotes["Kalshi"].price, None);
    assert_eq!(row.quotes["Kalshi"].volume, Some(2500.0));
    assert_eq!(row.total_volume(), 3500.0);
    assert_eq!(row.metrics.platform_coverage.platforms_count, 2);
}

#[tokio::test]
async fn numeric_strings_are_coerced() {
    let processed = pipeline(ScriptedScorer::order_sensitive())
        .process(election_batch())
        .await;

    let bitcoin = processed
        .aggregated
        .rows
        .iter()
        .find(|r| r.product_name == BITCOIN)
        .expect("bitcoin row");
    assert_eq!(bitcoin.quotes["Manifold"].price, Some(0.30));
    assert!(bitcoin.metrics.volume_stats.is_none());
}

#[tokio::test]
async fn spread_above_margin_is_flagged() {
    let scorer = ScriptedScorer::new().same("Fed cuts in March", "March rate cut", 0.9);
    let batch = vec![
        raw("Polymarket", "Fed cuts in March", json!(0.62), json!(500)),
        raw("Kalshi", "March rate cut", json!(0.48), json!(700)),
    ];

    let processed = pipeline(scorer).process(batch).await;

    let report = &processed.aggregated.report;
    assert_eq!(report.total_products, 1);
    assert_eq!(report.arbitrage_opportunities, 1);
    assert_eq!(report.confidence_distribution.high, 1);

    let row = &processed.aggregated.rows[0];
    let best = row.metrics.best_opportunities.as_ref().expect("best price");
    assert_eq!(best.highest_probability_platform, "Polymarket");
    assert!(best.arbitrage_opportunity);
    assert!((row.metrics.price_stats.expect("prices").price_spread - 0.14).abs() < 1e-9);

    let simple = &processed.aggregated.simple[0];
    assert_eq!(simple.best_price, Some(0.62));
    assert_eq!(simple.platforms, 2);
}

#[tokio::test]
async fn rows_are_ordered_by_confidence() {
    let processed = pipeline(ScriptedScorer::order_sensitive())
        .process(election_batch())
        .await;

    let confidences: Vec<f64> = processed
        .aggregated
        .rows
        .iter()
        .map(|r| r.confidence_score)
        .collect();
    assert_eq!(confidences, vec![1.0, 0.82]);
}

#[tokio::test]
async fn report_counts_every_platform_payload() {
    let processed = pipeline(ScriptedScorer::order_sensitive())
        .process(election_batch())
        .await;

    let coverage = &processed.aggregated.report.platform_coverage;
    assert_eq!(coverage["Polymarket"].count, 1);
    assert_eq!(coverage["Kalshi"].count, 1);
    assert_eq!(coverage["Manifold"].count, 1);
    assert_eq!(coverage["Kalshi"].total_volume, 2500.0);
    assert_eq!(processed.aggregated.report.confidence_distribution.total(), 2);
}

#[tokio::test]
async fn empty_input_gives_an_empty_report() {
    let scorer = Arc::new(ScriptedScorer::new());
    let unifier = Unifier::new(Fallback::new(scorer.clone(), LexicalScorer::default()));
    let processed = Pipeline::new(unifier, Aggregator::default())
        .process(Vec::new())
        .await;

    assert!(processed.batch.is_empty());
    assert!(processed.aggregated.rows.is_empty());
    assert_eq!(processed.aggregated.report.total_products, 0);
    assert_eq!(processed.aggregated.report.arbitrage_opportunities, 0);
    assert_eq!(scorer.calls(), 0);
}

#[test]
fn unified_file_with_loose_numbers_still_aggregates() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("unified_data.json");
    let json = json!({
        "processing_timestamp": "2025-01-01T00:00:00Z",
        "original_markets": 2,
        "unified_groups": 1,
        "compression_ratio": 0.5,
        "high_confidence_matches": 1,
        "unified_products": {
            TRUMP: {
                "confidence": 0.82,
                "product_count": 2,
                "match_reasoning": "same race",
                "platforms": {
                    "Polymarket": [{
                        "original_product": TRUMP,
                        "price": 0.55,
                        "volume": 1000,
                        "category": "Politics",
                        "market_id": "poly-1",
                        "description": ""
                    }],
                    "Kalshi": [{
                        "original_product": REPUBLICAN,
                        "price": "N/A",
                        "volume": "2500",
                        "category": "Politics",
                        "market_id": "PRES-24",
                        "description": ""
                    }]
                }
            }
        }
    });
    std::fs::write(&path, json.to_string()).expect("write unified file");

    let batch = load_unified(&path).expect("loose numbers load").into_batch();
    let aggregated = aggregate(&Aggregator::default(), &batch);

    let row = &aggregated.rows[0];
    assert_eq!(row.quotes["Kalshi"].price, None);
    assert_eq!(row.quotes["Kalshi"].volume, Some(2500.0));
    let best = row.metrics.best_opportunities.as_ref().expect("best price");
    assert_eq!(best.highest_probability_platform, "Polymarket");
    assert_eq!(row.total_volume(), 3500.0);
}
