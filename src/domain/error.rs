//! Domain validation errors for core domain types.
//!
//! These errors are raised when a record crossing the acquisition boundary
//! violates an invariant of [`Listing`](super::listing::Listing). Field-level
//! coercion problems (an unparseable price, a negative volume) are not
//! errors: the field is dropped and the record kept.
//!
//! # Examples
//!
//! ```
//! use unimarket::domain::error::DomainError;
//! use unimarket::domain::listing::{Listing, RawListing};
//!
//! let raw = RawListing {
//!     platform: "Kalshi".into(),
//!     ..Default::default()
//! };
//!
//! assert!(matches!(Listing::try_from(raw), Err(DomainError::EmptyTitle { .. })));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Every listing must name the platform it came from.
    #[error("listing {market_id:?} has no platform")]
    EmptyPlatform {
        /// Market identifier of the rejected record, possibly empty.
        market_id: String,
    },

    /// Every listing must carry a title to match on.
    #[error("listing {market_id:?} from {platform} has no title")]
    EmptyTitle {
        /// Platform of the rejected record.
        platform: String,
        /// Market identifier of the rejected record, possibly empty.
        market_id: String,
    },
}
