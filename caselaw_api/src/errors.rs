//! Error types for the API client.

use crate::types::CourtCategory;

/// Errors that can occur when making requests or building search queries.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed (network error, timeout, or unreadable body).
    #[error("Request failed")]
    RequestFailed,
    /// A court or tribunal ordinal outside `1..=count`.
    #[error("{category} index {ordinal} out of range (1-{count})")]
    OrdinalOutOfRange {
        category: CourtCategory,
        ordinal: i64,
        count: usize,
    },
    /// A directory category other than `courts` or `tribunals`.
    #[error("Unknown court type '{0}': expected 'courts' or 'tribunals'")]
    UnknownCategory(String),
}
