//! Interactive state across one search and its optional manual hop.

use scout_core::entities::CandidatePaper;
use scout_core::structured::RefinementProposal;
use serde::Serialize;

use crate::engine::{OutcomeKind, ScoutOutcome, merge_results};
use crate::warning::ScoutWarning;

/// Caller-owned view of the current search in one project.
///
/// A new search replaces the results. A manual refinement hop appends its
/// relevant results and consumes the proposal, so a session refines at most
/// once per search.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScoutSession {
    pub project_id: String,
    pub results: Vec<CandidatePaper>,
    pub proposal: Option<RefinementProposal>,
    pub warnings: Vec<ScoutWarning>,
}

impl ScoutSession {
    #[must_use]
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            ..Self::default()
        }
    }

    /// Fold an outcome into the session.
    #[must_use]
    pub fn absorb(mut self, outcome: ScoutOutcome) -> Self {
        match outcome.kind {
            OutcomeKind::Search => {
                self.results = outcome.results;
                self.proposal = outcome.proposal;
                self.warnings = outcome.warnings;
            }
            OutcomeKind::RefinedHop => {
                merge_results(&mut self.results, outcome.results);
                self.proposal = None;
                self.warnings.extend(outcome.warnings);
            }
        }
        self
    }

    /// Take the proposed query at `index`, consuming the proposal.
    ///
    /// Returns `None` if there is no proposal or the index is out of range;
    /// in the latter case the proposal is kept.
    pub fn take_refinement(&mut self, index: usize) -> Option<String> {
        let query = self.proposal.as_ref()?.queries.get(index)?.clone();
        self.proposal = None;
        Some(query)
    }

    /// Candidate at `index` in the current results.
    #[must_use]
    pub fn candidate(&self, index: usize) -> Option<&CandidatePaper> {
        self.results.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scout_core::enums::SourceKind;

    fn outcome(kind: OutcomeKind, titles: &[&str], proposal: bool) -> ScoutOutcome {
        ScoutOutcome {
            kind,
            project_id: "prj-00000001".into(),
            query: "q".into(),
            results: titles
                .iter()
                .map(|t| CandidatePaper::new(*t, SourceKind::Academic))
                .collect(),
            memory: Vec::new(),
            proposal: proposal.then(|| RefinementProposal {
                analysis: "narrow".into(),
                queries: vec!["a".into(), "b".into(), "c".into()],
            }),
            refined_with: None,
            rejected: 0,
            warnings: Vec::new(),
        }
    }

    fn titles(session: &ScoutSession) -> Vec<&str> {
        session.results.iter().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn search_replaces_results() {
        let session = ScoutSession::new("prj-00000001")
            .absorb(outcome(OutcomeKind::Search, &["A", "B"], false))
            .absorb(outcome(OutcomeKind::Search, &["C"], true));
        assert_eq!(titles(&session), vec!["C"]);
        assert!(session.proposal.is_some());
    }

    #[test]
    fn refined_hop_appends_and_clears_proposal() {
        let mut session = ScoutSession::new("prj-00000001")
            .absorb(outcome(OutcomeKind::Search, &["A"], true));
        assert_eq!(session.take_refinement(1).as_deref(), Some("b"));
        assert!(session.take_refinement(0).is_none());

        let session = session.absorb(outcome(OutcomeKind::RefinedHop, &["A", "D"], false));
        assert_eq!(titles(&session), vec!["A", "D"]);
        assert!(session.proposal.is_none());
    }

    #[test]
    fn out_of_range_refinement_keeps_proposal() {
        let mut session = ScoutSession::new("prj-00000001")
            .absorb(outcome(OutcomeKind::Search, &[], true));
        assert!(session.take_refinement(7).is_none());
        assert!(session.proposal.is_some());
    }
}
