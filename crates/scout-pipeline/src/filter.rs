//! Relevance filter: one structured verdict per candidate, bounded
//! concurrency, input order preserved.

use std::time::Duration;

use futures::stream::{self, StreamExt};
use scout_core::entities::CandidatePaper;
use scout_core::structured::RelevanceVerdict;
use scout_llm::TextGenerator;
use scout_schema::{RELEVANCE_VERDICT, SchemaRegistry};
use tokio_util::sync::CancellationToken;

use crate::error::PipelineError;
use crate::guard::{Guarded, guard};
use crate::prompts;
use crate::warning::ScoutWarning;

/// Relevant candidates, in input order, annotated with their verdict.
#[derive(Debug, Default)]
pub struct FilterOutcome {
    pub relevant: Vec<CandidatePaper>,
    /// Candidates judged not relevant.
    pub rejected: usize,
    pub warnings: Vec<ScoutWarning>,
}

enum Judgment {
    Verdict(CandidatePaper),
    Skipped { title: String, reason: String },
    Cancelled,
}

pub struct RelevanceFilter<'a, L> {
    llm: &'a L,
    schemas: &'a SchemaRegistry,
    concurrency: usize,
    abstract_chars: usize,
    timeout: Duration,
}

impl<'a, L: TextGenerator> RelevanceFilter<'a, L> {
    #[must_use]
    pub const fn new(
        llm: &'a L,
        schemas: &'a SchemaRegistry,
        concurrency: usize,
        abstract_chars: usize,
        timeout: Duration,
    ) -> Self {
        Self {
            llm,
            schemas,
            concurrency,
            abstract_chars,
            timeout,
        }
    }

    /// Judge every candidate against `query` and keep the relevant ones.
    ///
    /// At most `concurrency` judgments are in flight at once. A verdict
    /// that fails, times out or does not match the schema drops its
    /// candidate with a [`ScoutWarning::JudgmentSkipped`]; the rest of the
    /// batch continues.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Cancelled`] if `cancel` fires.
    pub async fn filter(
        &self,
        query: &str,
        candidates: Vec<CandidatePaper>,
        cancel: &CancellationToken,
    ) -> Result<FilterOutcome, PipelineError> {
        let judgments: Vec<Judgment> = stream::iter(candidates)
            .map(|candidate| self.judge(query, candidate, cancel))
            .buffered(self.concurrency.max(1))
            .collect()
            .await;

        let mut outcome = FilterOutcome::default();
        for judgment in judgments {
            match judgment {
                Judgment::Verdict(paper) if paper.is_relevant() => outcome.relevant.push(paper),
                Judgment::Verdict(_) => outcome.rejected += 1,
                Judgment::Skipped { title, reason } => {
                    outcome
                        .warnings
                        .push(ScoutWarning::JudgmentSkipped { title, reason });
                }
                Judgment::Cancelled => return Err(PipelineError::Cancelled),
            }
        }
        tracing::info!(
            query,
            relevant = outcome.relevant.len(),
            rejected = outcome.rejected,
            skipped = outcome.warnings.len(),
            "relevance filter complete"
        );
        Ok(outcome)
    }

    async fn judge(
        &self,
        query: &str,
        mut candidate: CandidatePaper,
        cancel: &CancellationToken,
    ) -> Judgment {
        if cancel.is_cancelled() {
            return Judgment::Cancelled;
        }
        let schema = match self.schemas.require(RELEVANCE_VERDICT) {
            Ok(schema) => schema,
            Err(e) => return skipped(candidate, e.to_string()),
        };
        let prompt = prompts::relevance(query, &candidate, self.abstract_chars);

        let raw = match guard(cancel, self.timeout, self.llm.generate(&prompt, Some(schema))).await
        {
            Guarded::Done(Ok(raw)) => raw,
            Guarded::Done(Err(e)) => return skipped(candidate, e.to_string()),
            Guarded::TimedOut(budget) => {
                return skipped(candidate, format!("no verdict within {}s", budget.as_secs()));
            }
            Guarded::Cancelled => return Judgment::Cancelled,
        };

        match self
            .schemas
            .parse::<RelevanceVerdict>(RELEVANCE_VERDICT, &raw)
        {
            Ok(verdict) => {
                tracing::debug!(title = %candidate.title, relevant = verdict.is_relevant, "verdict");
                candidate.relevance = Some(verdict);
                Judgment::Verdict(candidate)
            }
            Err(e) => skipped(candidate, e.to_string()),
        }
    }
}

fn skipped(candidate: CandidatePaper, reason: String) -> Judgment {
    tracing::debug!(title = %candidate.title, %reason, "judgment skipped");
    Judgment::Skipped {
        title: candidate.title,
        reason,
    }
}
