//! Output file names and the atomic writer shared by the exporters.
//!
//! Every file is written to a temporary sibling first and renamed into
//! place, so readers never observe a half-written artifact.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;

pub const RAW_DATA_FILE: &str = "raw_data.json";
pub const UNIFIED_DATA_FILE: &str = "unified_data.json";
pub const ANALYSIS_REPORTS_FILE: &str = "analysis_reports.json";
pub const COMPREHENSIVE_CSV_FILE: &str = "final_products_comprehensive.csv";
pub const SIMPLE_CSV_FILE: &str = "final_products_simple.csv";
pub const SUMMARY_CSV_FILE: &str = "summary_statistics.csv";
pub const CORPUS_FILE: &str = "corpus.jsonl";

/// Round to three decimal places for presentation.
#[must_use]
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Write `bytes` to `path` atomically, creating parent directories.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let temp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&temp_path)?;

    let cleanup_and_err = |e| {
        let _ = fs::remove_file(&temp_path);
        e
    };

    file.write_all(bytes).map_err(cleanup_and_err)?;
    file.sync_all().map_err(cleanup_and_err)?;
    fs::rename(&temp_path, path).map_err(cleanup_and_err)?;

    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round3_rounds_half_away() {
        assert_eq!(round3(0.123_456), 0.123);
        assert_eq!(round3(0.6666), 0.667);
        assert_eq!(round3(1.0), 1.0);
    }

    #[test]
    fn write_atomic_creates_nested_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/out.json");

        write_atomic(&path, b"{}").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
        assert!(!path.with_extension("tmp").exists());
    }
}
