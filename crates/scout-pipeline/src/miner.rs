//! Snowball miner: one hop of a seed paper's reference list into a project.

use std::time::Duration;

use scout_core::entities::{ArchivedPaper, CandidatePaper};
use scout_core::enums::SourceKind;
use scout_db::{InsertOutcome, PaperStore};
use scout_sources::{AcademicSource, SourceError};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::error::PipelineError;
use crate::guard::{Guarded, guard};

/// What one mining run did.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MineReport {
    /// Upstream graph identifier the seed resolved to.
    pub seed_id: String,
    /// Title of the resolved seed as the graph knows it.
    pub seed_title: String,
    /// Newly archived papers, in reference order.
    pub inserted: Vec<ArchivedPaper>,
    /// References already present in the project.
    pub duplicates: usize,
    /// References dropped for lack of a title.
    pub dropped_untitled: usize,
}

impl MineReport {
    /// Count of newly archived papers.
    #[must_use]
    pub fn new_papers(&self) -> usize {
        self.inserted.len()
    }
}

pub struct SnowballMiner<'a, A, S> {
    academic: &'a A,
    store: &'a S,
    limit: usize,
    timeout: Duration,
}

impl<'a, A: AcademicSource, S: PaperStore> SnowballMiner<'a, A, S> {
    #[must_use]
    pub const fn new(academic: &'a A, store: &'a S, limit: usize, timeout: Duration) -> Self {
        Self {
            academic,
            store,
            limit,
            timeout,
        }
    }

    /// Resolve `seed_title`, fetch its references and archive the new ones
    /// in `project_id` as snowball papers.
    ///
    /// Single hop: papers added here are not mined in turn. Running twice
    /// on identical upstream data archives nothing the second time.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the project does not exist or the seed does not
    ///   resolve; nothing is written.
    /// - `Source` if the resolve or reference call fails or times out.
    /// - `Cancelled` if `cancel` fires; papers archived before that stay.
    /// - `Store` if an insert fails.
    pub async fn mine(
        &self,
        project_id: &str,
        seed_title: &str,
        cancel: &CancellationToken,
    ) -> Result<MineReport, PipelineError> {
        let seed_title = seed_title.trim();
        if seed_title.is_empty() {
            return Err(PipelineError::InvalidInput("seed title is empty".into()));
        }
        self.store
            .get_project(project_id)
            .await
            .map_err(|e| PipelineError::from_lookup(e, format!("project {project_id}")))?;

        let (seed_id, resolved_title) = self.resolve(seed_title, cancel).await?;
        let references = self.call(self.academic.references(&seed_id, self.limit), cancel).await?;

        let mut report = MineReport {
            seed_id,
            seed_title: resolved_title,
            ..MineReport::default()
        };

        for reference in references.into_iter().take(self.limit) {
            if reference.title.trim().is_empty() {
                report.dropped_untitled += 1;
                continue;
            }
            if cancel.is_cancelled() {
                return Err(PipelineError::Cancelled);
            }
            let candidate = CandidatePaper {
                source_kind: SourceKind::Snowball,
                ..reference
            };
            if self.store.is_duplicate(project_id, &candidate.title).await? {
                report.duplicates += 1;
                continue;
            }
            match self.store.insert_paper(project_id, &candidate).await? {
                InsertOutcome::Inserted(paper) => report.inserted.push(paper),
                InsertOutcome::Duplicate(_) => report.duplicates += 1,
            }
        }

        tracing::info!(
            project_id,
            seed = %report.seed_title,
            inserted = report.new_papers(),
            duplicates = report.duplicates,
            dropped_untitled = report.dropped_untitled,
            "snowball mining complete"
        );
        Ok(report)
    }

    async fn resolve(
        &self,
        seed_title: &str,
        cancel: &CancellationToken,
    ) -> Result<(String, String), PipelineError> {
        let hits = self.call(self.academic.search(seed_title, 1), cancel).await?;
        hits.into_iter()
            .next()
            .and_then(|hit| hit.external_id.map(|id| (id, hit.title)))
            .ok_or_else(|| PipelineError::NotFound(format!("seed paper '{seed_title}'")))
    }

    async fn call<T>(
        &self,
        fut: impl Future<Output = Result<T, SourceError>>,
        cancel: &CancellationToken,
    ) -> Result<T, PipelineError> {
        match guard(cancel, self.timeout, fut).await {
            Guarded::Done(result) => Ok(result?),
            Guarded::TimedOut(budget) => Err(SourceError::Timeout {
                secs: budget.as_secs(),
            }
            .into()),
            Guarded::Cancelled => Err(PipelineError::Cancelled),
        }
    }
}
