//! Pipeline error types.
//!
//! Only failures that end an operation are errors. Fan-out failures (one
//! source down, one unparsable verdict, a failed refinement round) are
//! recorded as [`ScoutWarning`](crate::ScoutWarning)s on the outcome.

use scout_db::DatabaseError;
use scout_llm::LlmError;
use scout_schema::SchemaError;
use scout_sources::SourceError;
use thiserror::Error;

/// Errors that abort a pipeline operation.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A seed paper or project could not be resolved. Nothing was written.
    #[error("not found: {0}")]
    NotFound(String),

    /// A single-seed fetch (resolve or reference lookup) failed.
    #[error("source failed: {0}")]
    Source(#[from] SourceError),

    /// The text-generation service failed.
    #[error("text generation failed: {0}")]
    Llm(#[from] LlmError),

    /// A model response did not match its schema.
    #[error("model response rejected: {0}")]
    Schema(#[from] SchemaError),

    /// The paper store failed.
    #[error("store error: {0}")]
    Store(#[from] DatabaseError),

    /// The operation's cancellation token fired.
    #[error("operation cancelled")]
    Cancelled,

    /// The caller passed something unusable (blank query, empty project).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl PipelineError {
    /// Map a store lookup miss to [`PipelineError::NotFound`].
    pub(crate) fn from_lookup(err: DatabaseError, what: impl Into<String>) -> Self {
        match err {
            DatabaseError::NoResult => Self::NotFound(what.into()),
            other => Self::Store(other),
        }
    }
}
