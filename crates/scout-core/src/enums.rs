//! Source and reading-status enums for Scout.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! `ReadingStatus` provides `allowed_next_states()` to enforce valid
//! transitions at the application layer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// SourceKind
// ---------------------------------------------------------------------------

/// Where a paper record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Indexed academic graph search.
    Academic,
    /// Filetype-constrained web search (reports, PDFs).
    Grey,
    /// One-hop reference expansion of an archived paper.
    Snowball,
    /// Already archived in the active project.
    InternalMemory,
    /// Metadata extracted from user-supplied document text.
    Ingest,
}

impl SourceKind {
    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Academic => "academic",
            Self::Grey => "grey",
            Self::Snowball => "snowball",
            Self::InternalMemory => "internal_memory",
            Self::Ingest => "ingest",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ReadingStatus
// ---------------------------------------------------------------------------

/// Reading progress of an archived paper.
///
/// ```text
/// unread → reading → synthesized
///        ← reading
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ReadingStatus {
    #[default]
    Unread,
    Reading,
    Synthesized,
}

impl ReadingStatus {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Unread => &[Self::Reading],
            Self::Reading => &[Self::Synthesized, Self::Unread],
            Self::Synthesized => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unread => "unread",
            Self::Reading => "reading",
            Self::Synthesized => "synthesized",
        }
    }
}

impl fmt::Display for ReadingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
