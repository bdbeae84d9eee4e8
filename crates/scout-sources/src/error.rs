//! Source adapter error types.

use thiserror::Error;

/// Errors that can occur when querying an external paper source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Source API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the source.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// Failed to parse a source response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The source returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// The source did not answer within its time budget.
    #[error("no response within {secs}s")]
    Timeout {
        /// The budget that was exceeded.
        secs: u64,
    },
}

impl SourceError {
    /// Map a transport error, folding reqwest's own timeout into
    /// [`SourceError::Timeout`].
    pub(crate) fn from_transport(err: reqwest::Error, secs: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout { secs }
        } else {
            Self::Http(err)
        }
    }
}
