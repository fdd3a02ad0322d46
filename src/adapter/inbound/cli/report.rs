//! Handler for the `report` command.

use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::ReportArgs;
use crate::adapter::inbound::cli::{operator, output, stage};
use crate::error::Result;
use crate::port::inbound::operator::pipeline::{ProductLine, ReportRequest, ReportSummary};

#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "Product")]
    name: String,
    #[tabled(rename = "Conf.")]
    confidence: String,
    #[tabled(rename = "Platforms")]
    platforms: usize,
    #[tabled(rename = "Best")]
    best: String,
    #[tabled(rename = "Spread")]
    spread: String,
    #[tabled(rename = "Arb")]
    arbitrage: &'static str,
}

impl From<&ProductLine> for ProductRow {
    fn from(line: &ProductLine) -> Self {
        Self {
            name: truncate(&line.name, 48),
            confidence: format!("{:.3}", line.confidence),
            platforms: line.platforms,
            best: match (&line.best_platform, line.best_price) {
                (Some(platform), Some(price)) => format!("{platform} {price:.3}"),
                _ => "-".to_string(),
            },
            spread: stage::price(line.price_spread),
            arbitrage: if line.arbitrage { "yes" } else { "" },
        }
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Execute the report command.
pub fn execute(args: &ReportArgs) -> Result<()> {
    let request = ReportRequest {
        options: stage::options(&args.stage)?,
        input: args
            .input
            .as_ref()
            .map(|path| path.to_string_lossy().to_string()),
        top: args.top,
    };
    let summary = operator::operator()?.report(request)?;

    if output::json_result("report", &summary) {
        return Ok(());
    }
    print_summary(&summary);
    Ok(())
}

pub(super) fn print_summary(summary: &ReportSummary) {
    output::section("Report");
    output::field("Products", summary.total_products);
    if summary.arbitrage_opportunities > 0 {
        output::field(
            "Arbitrage",
            output::highlight(summary.arbitrage_opportunities),
        );
    } else {
        output::field("Arbitrage", 0);
    }
    for file in &summary.files {
        output::field("Written", file);
    }

    if !summary.top.is_empty() {
        output::section("Top Products");
        let rows: Vec<ProductRow> = summary.top.iter().map(ProductRow::from).collect();
        output::lines(&Table::new(rows).to_string());
    }
}
