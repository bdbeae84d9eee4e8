use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::CandidatePaper;
use crate::enums::{ReadingStatus, SourceKind};
use crate::structured::RelevanceVerdict;

/// A paper archived in exactly one project.
///
/// Cloning into another project creates a new record; records are never
/// shared across projects.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ArchivedPaper {
    pub id: String,
    pub project_id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub year: Option<i32>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub url: Option<String>,
    pub source_kind: SourceKind,
    pub relevance: Option<RelevanceVerdict>,
    pub citation_count: i64,
    pub reading_status: ReadingStatus,
    pub created_at: DateTime<Utc>,
}

impl ArchivedPaper {
    /// The candidate-shaped view of this record, e.g. for cloning or for
    /// surfacing it as an internal-memory hit.
    #[must_use]
    pub fn to_candidate(&self, source_kind: SourceKind) -> CandidatePaper {
        CandidatePaper {
            title: self.title.clone(),
            authors: self.authors.clone(),
            year: self.year,
            abstract_text: self.abstract_text.clone(),
            url: self.url.clone(),
            source_kind,
            citation_count: Some(self.citation_count),
            external_id: None,
            relevance: self.relevance.clone(),
        }
    }

    /// First author or `n.a`, used as a citation key.
    #[must_use]
    pub fn lead_author(&self) -> &str {
        self.authors.first().map_or("n.a", String::as_str)
    }
}
