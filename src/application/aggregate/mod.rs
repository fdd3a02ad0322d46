//! Metrics, flattened rows and corpus reports derived from unified groups.

pub mod metrics;
pub mod report;
pub mod row;
