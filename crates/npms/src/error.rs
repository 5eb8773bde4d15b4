//! Error types for API calls.
//!
//! Qualifier serialization itself is total and has no error path; only the
//! transport layer can fail.

use thiserror::Error;

/// Errors returned by [`Client`](crate::Client) calls.
#[derive(Error, Debug)]
pub enum Error {
    /// Transport failure, non-2xx HTTP status, or JSON decode failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
