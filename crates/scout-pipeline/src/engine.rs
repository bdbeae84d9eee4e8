//! The `Scout` engine: every pipeline operation behind one handle.

use std::collections::HashSet;

use scout_config::RefinementPolicy;
use scout_core::entities::CandidatePaper;
use scout_core::enums::SourceKind;
use scout_core::structured::RefinementProposal;
use scout_db::{InsertOutcome, PaperStore};
use scout_llm::TextGenerator;
use scout_schema::SchemaRegistry;
use scout_sources::{AcademicSource, GreySource};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::adapter::SourceAdapter;
use crate::autopilot::Autopilot;
use crate::error::PipelineError;
use crate::filter::RelevanceFilter;
use crate::miner::{MineReport, SnowballMiner};
use crate::settings::PipelineSettings;
use crate::warning::ScoutWarning;

/// Per-invocation switches for [`Scout::scout`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoutOptions {
    /// Also search grey literature.
    pub include_grey: bool,
    /// Engage the auto-pilot when too few relevant results come back.
    pub autopilot: bool,
}

/// How a [`ScoutOutcome`] was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    /// A fresh scout of a user query.
    Search,
    /// One manual hop on a surfaced refinement query.
    RefinedHop,
}

/// Everything one scout invocation produced. Nothing in it is archived.
#[derive(Debug, Clone, Serialize)]
pub struct ScoutOutcome {
    pub kind: OutcomeKind,
    pub project_id: String,
    pub query: String,
    /// Relevant candidates, annotated with their verdicts.
    pub results: Vec<CandidatePaper>,
    /// Papers already archived in the project whose title matches the query.
    pub memory: Vec<CandidatePaper>,
    /// The auto-pilot proposal, when one was requested and parsed.
    pub proposal: Option<RefinementProposal>,
    /// The refinement query that was run automatically, if any.
    pub refined_with: Option<String>,
    /// Candidates judged not relevant.
    pub rejected: usize,
    pub warnings: Vec<ScoutWarning>,
}

/// Fetch, filter and archive papers for one set of sources, one model and
/// one store.
pub struct Scout<A, G, L, S> {
    adapter: SourceAdapter<A, G>,
    llm: L,
    store: S,
    schemas: SchemaRegistry,
    settings: PipelineSettings,
}

impl<A, G, L, S> Scout<A, G, L, S>
where
    A: AcademicSource,
    G: GreySource,
    L: TextGenerator,
    S: PaperStore,
{
    #[must_use]
    pub fn new(academic: A, grey: G, llm: L, store: S, settings: PipelineSettings) -> Self {
        let adapter = SourceAdapter::new(
            academic,
            grey,
            settings.academic_limit,
            settings.grey_limit,
            settings.academic_timeout,
            settings.grey_timeout,
        );
        Self {
            adapter,
            llm,
            store,
            schemas: SchemaRegistry::new(),
            settings,
        }
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub const fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    pub(crate) const fn llm(&self) -> &L {
        &self.llm
    }

    pub(crate) const fn schemas(&self) -> &SchemaRegistry {
        &self.schemas
    }

    fn filter(&self) -> RelevanceFilter<'_, L> {
        RelevanceFilter::new(
            &self.llm,
            &self.schemas,
            self.settings.relevance_concurrency,
            self.settings.prompt_abstract_chars,
            self.settings.llm_timeout,
        )
    }

    fn autopilot(&self) -> Autopilot<'_, L> {
        Autopilot::new(
            &self.llm,
            &self.schemas,
            self.settings.autopilot_threshold,
            self.settings.llm_timeout,
        )
    }

    /// Scout `query` for `project_id`: internal memory scan, fetch, relevance
    /// filter and, if enabled and under threshold, one auto-pilot round.
    ///
    /// With [`RefinementPolicy::AutoFirst`] the first proposed query is run
    /// once and its relevant, not yet listed results are appended. With
    /// [`RefinementPolicy::Surface`] the proposal is returned for the caller
    /// to pick from via [`Scout::run_refined`]. A failed refinement round is
    /// a warning; the original results stand. Nothing is archived.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a blank query, `NotFound` for an unknown project,
    /// `Store` if the memory scan fails, `Cancelled` if `cancel` fires.
    pub async fn scout(
        &self,
        project_id: &str,
        query: &str,
        options: ScoutOptions,
        cancel: &CancellationToken,
    ) -> Result<ScoutOutcome, PipelineError> {
        let query = require_query(query)?;
        self.require_project(project_id).await?;

        let memory: Vec<CandidatePaper> = self
            .store
            .search_titles(project_id, query)
            .await?
            .iter()
            .map(|p| p.to_candidate(SourceKind::InternalMemory))
            .collect();

        let mut outcome = self
            .hop(project_id, query, options.include_grey, OutcomeKind::Search, cancel)
            .await?;
        outcome.memory = memory;

        if options.autopilot {
            self.refine(&mut outcome, options.include_grey, cancel).await?;
        }
        Ok(outcome)
    }

    /// Run one manual refinement hop: fetch and filter `query`, never
    /// refining further.
    ///
    /// # Errors
    ///
    /// Same as [`Scout::scout`].
    pub async fn run_refined(
        &self,
        project_id: &str,
        query: &str,
        include_grey: bool,
        cancel: &CancellationToken,
    ) -> Result<ScoutOutcome, PipelineError> {
        let query = require_query(query)?;
        self.require_project(project_id).await?;
        self.hop(project_id, query, include_grey, OutcomeKind::RefinedHop, cancel)
            .await
    }

    /// Archive a surfaced candidate on explicit user request.
    ///
    /// No relevance or pre-insert duplicate check applies; the store's
    /// unique title constraint still does, so saving a title the project
    /// already holds returns [`InsertOutcome::Duplicate`].
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown project, `Store` if the insert fails.
    pub async fn save_candidate(
        &self,
        project_id: &str,
        candidate: &CandidatePaper,
    ) -> Result<InsertOutcome, PipelineError> {
        self.require_project(project_id).await?;
        let outcome = self.store.insert_paper(project_id, candidate).await?;
        tracing::info!(
            project_id,
            title = %candidate.title,
            inserted = outcome.is_inserted(),
            "manual save"
        );
        Ok(outcome)
    }

    /// One hop of `seed_title`'s references into `project_id`.
    ///
    /// # Errors
    ///
    /// See [`SnowballMiner::mine`].
    pub async fn mine(
        &self,
        project_id: &str,
        seed_title: &str,
        cancel: &CancellationToken,
    ) -> Result<MineReport, PipelineError> {
        SnowballMiner::new(
            self.adapter.academic(),
            &self.store,
            self.settings.snowball_limit,
            self.adapter.academic_timeout(),
        )
        .mine(project_id, seed_title, cancel)
        .await
    }

    pub(crate) async fn require_project(&self, project_id: &str) -> Result<(), PipelineError> {
        self.store
            .get_project(project_id)
            .await
            .map(|_| ())
            .map_err(|e| PipelineError::from_lookup(e, format!("project {project_id}")))
    }

    async fn hop(
        &self,
        project_id: &str,
        query: &str,
        include_grey: bool,
        kind: OutcomeKind,
        cancel: &CancellationToken,
    ) -> Result<ScoutOutcome, PipelineError> {
        let fetched = self.adapter.fetch(query, include_grey, cancel).await?;
        let filtered = self.filter().filter(query, fetched.candidates, cancel).await?;

        let mut warnings = fetched.warnings;
        warnings.extend(filtered.warnings);
        Ok(ScoutOutcome {
            kind,
            project_id: project_id.to_string(),
            query: query.to_string(),
            results: dedup_by_title(filtered.relevant),
            memory: Vec::new(),
            proposal: None,
            refined_with: None,
            rejected: filtered.rejected,
            warnings,
        })
    }

    async fn refine(
        &self,
        outcome: &mut ScoutOutcome,
        include_grey: bool,
        cancel: &CancellationToken,
    ) -> Result<(), PipelineError> {
        let autopilot = self.autopilot();
        let found = outcome.results.len();
        if !autopilot.should_engage(found) {
            return Ok(());
        }
        tracing::info!(query = %outcome.query, found, "engaging auto-pilot");

        let proposal = match autopilot.propose(&outcome.query, found, cancel).await {
            Ok(proposal) => proposal,
            Err(PipelineError::Cancelled) => return Err(PipelineError::Cancelled),
            Err(e) => {
                tracing::warn!(error = %e, "auto-pilot refinement failed");
                outcome
                    .warnings
                    .push(ScoutWarning::RefinementFailed { reason: e.to_string() });
                return Ok(());
            }
        };

        if self.settings.refinement_policy == RefinementPolicy::AutoFirst {
            if let Some(next) = proposal.first_query().map(String::from) {
                let refined = self
                    .hop(&outcome.project_id, &next, include_grey, OutcomeKind::RefinedHop, cancel)
                    .await?;
                merge_results(&mut outcome.results, refined.results);
                outcome.rejected += refined.rejected;
                outcome.warnings.extend(refined.warnings);
                outcome.refined_with = Some(next);
            }
        }
        outcome.proposal = Some(proposal);
        Ok(())
    }
}

fn require_query(query: &str) -> Result<&str, PipelineError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(PipelineError::InvalidInput("query is empty".into()));
    }
    Ok(query)
}

/// Keep the first candidate per normalized title.
fn dedup_by_title(candidates: Vec<CandidatePaper>) -> Vec<CandidatePaper> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| seen.insert(c.normalized_title()))
        .collect()
}

/// Append `more` to `results`, skipping titles already present.
pub(crate) fn merge_results(results: &mut Vec<CandidatePaper>, more: Vec<CandidatePaper>) {
    let mut seen: HashSet<String> = results.iter().map(CandidatePaper::normalized_title).collect();
    results.extend(more.into_iter().filter(|c| seen.insert(c.normalized_title())));
}
