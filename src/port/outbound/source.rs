//! Listing acquisition port.

use async_trait::async_trait;

use crate::domain::RawListing;
use crate::error::Result;

/// A platform (or file) that yields raw listings for one batch.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Platform name, used for logs and demo fixture lookup.
    fn name(&self) -> &'static str;

    /// Fetch one batch of listings.
    ///
    /// # Errors
    ///
    /// Fails on transport or payload errors. Callers log the failure and
    /// continue with the remaining sources.
    async fn fetch(&self) -> Result<Vec<RawListing>>;
}
