//! Soft failures reported alongside an operation's result.

use std::fmt;

use scout_core::enums::SourceKind;
use serde::Serialize;

/// A recovered failure. Never aborts the operation that records it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoutWarning {
    /// One upstream source failed or timed out; its results are empty.
    SourceUnavailable { origin: SourceKind, reason: String },
    /// The auto-pilot round failed; the original results stand.
    RefinementFailed { reason: String },
    /// A relevance verdict could not be obtained; the candidate was dropped.
    JudgmentSkipped { title: String, reason: String },
}

impl fmt::Display for ScoutWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceUnavailable { origin, reason } => {
                write!(f, "{origin} source unavailable: {reason}")
            }
            Self::RefinementFailed { reason } => write!(f, "auto-pilot refinement failed: {reason}"),
            Self::JudgmentSkipped { title, reason } => {
                write!(f, "skipped '{title}': {reason}")
            }
        }
    }
}
