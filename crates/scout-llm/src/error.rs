//! Text-generation error types.

use thiserror::Error;

/// Errors that can occur when calling the text-generation service.
#[derive(Debug, Error)]
pub enum LlmError {
    /// No API key or model configured.
    #[error("text generation is not configured (set SCOUT_LLM__API_KEY)")]
    NotConfigured,

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Service returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// The prompt was refused by the service's safety filter.
    #[error("prompt blocked: {0}")]
    Blocked(String),

    /// The response carried no text.
    #[error("empty response from model")]
    EmptyResponse,

    /// The response envelope could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// No answer within the configured budget.
    #[error("no response within {secs}s")]
    Timeout { secs: u64 },
}
