//! Series error types
//!
//! Validation errors for request inputs and fetch errors for the upstream
//! provider.

use thiserror::Error;

/// Invalid series request input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeriesError {
    /// Series identifier empty, too long, or not URL-safe
    #[error("Invalid series identifier: {0}")]
    InvalidSeriesId(String),

    /// Period string in none of the accepted shapes
    #[error("Invalid period {0:?} (expected YYYY, YYYY/MM or YYYY/MM/DD)")]
    InvalidPeriod(String),

    /// `from` is later than `to`
    #[error("Invalid range: from {from} is after to {to}")]
    InvalidRange { from: String, to: String },
}

/// Errors that can occur while fetching a series from the provider
#[derive(Error, Debug)]
pub enum FetchError {
    /// Network failure or timeout
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Provider answered with a non-success status
    #[error("Upstream responded {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    /// Body could not be read as a series payload
    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),
}

impl FetchError {
    /// Whether the provider answered but with something unreadable
    pub fn is_malformed(&self) -> bool {
        matches!(self, FetchError::MalformedResponse(_))
    }
}

/// Result type alias for fetch operations
pub type FetchResult<T> = Result<T, FetchError>;
