//! In-memory [`ListingSource`] doubles.

use async_trait::async_trait;

use crate::domain::RawListing;
use crate::error::{Error, Result};
use crate::port::outbound::source::ListingSource;

/// Returns the same listings on every fetch.
pub struct StaticSource {
    name: &'static str,
    listings: Vec<RawListing>,
}

impl StaticSource {
    pub fn new(name: &'static str, listings: Vec<RawListing>) -> Self {
        Self { name, listings }
    }
}

#[async_trait]
impl ListingSource for StaticSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch(&self) -> Result<Vec<RawListing>> {
        Ok(self.listings.clone())
    }
}

/// Fails every fetch with a connection error.
pub struct FailingSource {
    name: &'static str,
}

impl FailingSource {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

#[async_trait]
impl ListingSource for FailingSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch(&self) -> Result<Vec<RawListing>> {
        Err(Error::Connection(format!("{} unreachable", self.name)))
    }
}
