//! File exporters for the output directory.

pub mod csv;
pub mod file;
pub mod json;
