//! Structured model outputs.
//!
//! Every judgment or proposal requested from the text-generation service has
//! an explicit type here. `scout-schema` derives the JSON Schema sent to the
//! model from these types and validates responses against it before they are
//! deserialized.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Number of alternative queries requested from the auto-pilot.
pub const PROPOSAL_QUERY_COUNT: usize = 3;

/// Relevance judgment of one candidate against the original query.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RelevanceVerdict {
    /// Is this paper highly relevant to the research query?
    pub is_relevant: bool,
    /// Two-sentence academic summary focusing on findings.
    pub summary: String,
    /// Primary research methodology (e.g. Qualitative, Meta-analysis, Empirical).
    pub methodology: String,
}

/// Auto-pilot output: why the query under-performed and what to try instead.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RefinementProposal {
    /// One paragraph on why the original query returned too few results.
    pub analysis: String,
    /// Exactly three alternative academic search strings, best first.
    #[schemars(length(min = 3, max = 3))]
    pub queries: Vec<String>,
}

impl RefinementProposal {
    /// Trim the analysis and every query.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` unless exactly
    /// [`PROPOSAL_QUERY_COUNT`] non-blank queries remain.
    pub fn normalized(self) -> Result<Self, CoreError> {
        let queries: Vec<String> = self
            .queries
            .into_iter()
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty())
            .collect();
        if queries.len() != PROPOSAL_QUERY_COUNT {
            return Err(CoreError::Validation(format!(
                "refinement proposal needs {PROPOSAL_QUERY_COUNT} queries, got {}",
                queries.len()
            )));
        }
        Ok(Self {
            analysis: self.analysis.trim().to_string(),
            queries,
        })
    }

    /// The query the auto-pilot re-runs automatically.
    #[must_use]
    pub fn first_query(&self) -> Option<&str> {
        self.queries.first().map(String::as_str)
    }
}

/// Bibliographic metadata extracted from document text.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PaperMetadata {
    /// Full academic title of the paper.
    pub title: String,
    /// All contributing authors.
    pub authors: Vec<String>,
    /// Year of publication.
    pub year: Option<i32>,
    /// Concise abstract or summary.
    #[serde(rename = "abstract")]
    pub abstract_text: String,
}

/// Answer grounded in a project's archived papers.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SynthesisAnswer {
    pub answer: String,
    /// Citation keys of the form `(Author, Year)` used in the answer.
    pub citations: Vec<String>,
}
