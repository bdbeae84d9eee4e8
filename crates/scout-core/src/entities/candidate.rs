use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::SourceKind;
use crate::structured::RelevanceVerdict;
use crate::title::normalize_title;

/// A paper surfaced by a search invocation, not yet persisted.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CandidatePaper {
    /// Natural key within a project (after normalization).
    pub title: String,
    /// Display names in publication order. May be empty.
    #[serde(default)]
    pub authors: Vec<String>,
    pub year: Option<i32>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub url: Option<String>,
    pub source_kind: SourceKind,
    /// Upstream citation count, when the source reports one.
    #[serde(default)]
    pub citation_count: Option<i64>,
    /// Upstream graph node identifier (e.g. a Semantic Scholar `paperId`).
    #[serde(default)]
    pub external_id: Option<String>,
    /// Attached by the relevance filter; absent until filtered.
    #[serde(default)]
    pub relevance: Option<RelevanceVerdict>,
}

impl CandidatePaper {
    /// A bare candidate with only a title and its source.
    #[must_use]
    pub fn new(title: impl Into<String>, source_kind: SourceKind) -> Self {
        Self {
            title: title.into(),
            authors: Vec::new(),
            year: None,
            abstract_text: None,
            url: None,
            source_kind,
            citation_count: None,
            external_id: None,
            relevance: None,
        }
    }

    /// Dedup key for this candidate's title.
    #[must_use]
    pub fn normalized_title(&self) -> String {
        normalize_title(&self.title)
    }

    /// Whether the relevance filter judged this candidate relevant.
    #[must_use]
    pub fn is_relevant(&self) -> bool {
        self.relevance.as_ref().is_some_and(|r| r.is_relevant)
    }

    /// Text handed to the model when judging relevance: the abstract or
    /// snippet if present, otherwise the title alone.
    #[must_use]
    pub fn grounding_text(&self) -> &str {
        self.abstract_text
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(&self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abstract_field_uses_plain_name_on_the_wire() {
        let mut paper = CandidatePaper::new("Deep Residual Learning", SourceKind::Academic);
        paper.abstract_text = Some("We present a residual learning framework.".into());
        let json = serde_json::to_value(&paper).unwrap();
        assert_eq!(json["abstract"], "We present a residual learning framework.");
        assert!(json.get("abstract_text").is_none());
    }

    #[test]
    fn grounding_text_falls_back_to_title() {
        let mut paper = CandidatePaper::new("Only A Title", SourceKind::Grey);
        assert_eq!(paper.grounding_text(), "Only A Title");
        paper.abstract_text = Some("   ".into());
        assert_eq!(paper.grounding_text(), "Only A Title");
        paper.abstract_text = Some("snippet".into());
        assert_eq!(paper.grounding_text(), "snippet");
    }

    #[test]
    fn unfiltered_candidate_is_not_relevant() {
        let paper = CandidatePaper::new("x", SourceKind::Academic);
        assert!(!paper.is_relevant());
    }
}
