//! Plain-text retrieval corpus built from a processed batch.
//!
//! The documents are meant for an external vector store; nothing here
//! embeds or indexes them.

use std::fmt::Write as _;

use crate::domain::{CorpusReport, Document, Listing, UnifiedBatch, UnifiedGroup};

pub const DEFAULT_CHUNK_SIZE: usize = 1000;
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

/// One document per group and per listing, plus two report documents.
#[must_use]
pub fn documents(batch: &UnifiedBatch, listings: &[Listing], report: &CorpusReport) -> Vec<Document> {
    let mut docs = Vec::with_capacity(batch.len() + listings.len() + 2);
    docs.extend(batch.iter().map(group_document));
    docs.extend(listings.iter().map(listing_document));
    docs.push(platform_coverage_document(report));
    docs.push(category_breakdown_document(report));
    docs
}

fn group_document(group: &UnifiedGroup) -> Document {
    let platforms: Vec<&str> = group.platforms.keys().map(String::as_str).collect();
    let mut content = format!(
        "Product: {}\nConfidence Score: {:.3}\nAvailable Platforms: {}\n\nPlatform Details:\n",
        group.canonical_name,
        group.confidence,
        platforms.join(", ")
    );
    for (platform, payload) in group.primary_payloads() {
        let _ = write!(
            content,
            "\n- {platform}:\n  Price: {}\n  Volume: {}\n  Category: {}\n  Market ID: {}\n",
            or_na(payload.price),
            or_na(payload.volume),
            payload.category,
            if payload.market_id.is_empty() {
                "N/A"
            } else {
                payload.market_id.as_str()
            },
        );
    }

    Document::new(content.trim())
        .with_meta("type", "unified_market")
        .with_meta("group_id", group.id)
        .with_meta("product_name", &group.canonical_name)
        .with_meta("confidence", format!("{:.3}", group.confidence))
        .with_meta("platforms", platforms.join(", "))
        .with_meta("platform_count", platforms.len())
}

fn listing_document(listing: &Listing) -> Document {
    let description = if listing.description.is_empty() {
        "No description available"
    } else {
        listing.description.as_str()
    };
    let content = format!(
        "Market: {}\nPlatform: {}\nPrice: {}\nVolume: {}\nCategory: {}\nDescription: {}\nMarket ID: {}",
        listing.title,
        listing.platform,
        or_na(listing.price),
        or_na(listing.volume),
        listing.category,
        description,
        if listing.market_id.is_empty() {
            "N/A"
        } else {
            listing.market_id.as_str()
        },
    );

    Document::new(content)
        .with_meta("type", "raw_market")
        .with_meta("platform", &listing.platform)
        .with_meta("category", &listing.category)
        .with_meta("market_name", &listing.title)
}

fn platform_coverage_document(report: &CorpusReport) -> Document {
    let mut content = String::from("Platform Coverage Analysis:\n");
    for (platform, totals) in &report.platform_coverage {
        let _ = writeln!(
            content,
            "- {platform}: {} markets, Total Volume: {}",
            totals.count, totals.total_volume
        );
    }
    Document::new(content)
        .with_meta("type", "analysis")
        .with_meta("category", "platform_coverage")
}

fn category_breakdown_document(report: &CorpusReport) -> Document {
    let mut content = String::from("Category Breakdown:\n");
    for (category, count) in &report.category_breakdown {
        let _ = writeln!(content, "- {category}: {count} markets");
    }
    Document::new(content)
        .with_meta("type", "analysis")
        .with_meta("category", "category_breakdown")
}

fn or_na(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| v.to_string())
}

/// Split `text` into windows of at most `size` characters, consecutive
/// windows sharing up to `overlap` characters.
///
/// A window ends at the last whitespace inside it when one exists past the
/// overlap region, so words are rarely cut in half.
#[must_use]
pub fn chunk(text: &str, size: usize, overlap: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let size = size.max(1);
    let overlap = overlap.min(size - 1);
    if chars.len() <= size {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut start = 0;
    loop {
        let mut end = (start + size).min(chars.len());
        if end < chars.len() {
            if let Some(ws) = (start + overlap + 1..end).rev().find(|&i| chars[i].is_whitespace()) {
                end = ws;
            }
        }
        chunks.push(chars[start..end].iter().collect());
        if end >= chars.len() {
            break;
        }
        start = end.saturating_sub(overlap).max(start + 1);
    }
    chunks
}

/// Split every document with [`chunk`], tagging pieces with their index.
#[must_use]
pub fn chunk_documents(docs: &[Document], size: usize, overlap: usize) -> Vec<Document> {
    docs.iter()
        .flat_map(|doc| {
            chunk(&doc.content, size, overlap)
                .into_iter()
                .enumerate()
                .map(|(i, content)| Document {
                    content,
                    metadata: doc.metadata.clone(),
                }
                .with_meta("chunk", i))
        })
        .collect()
}
