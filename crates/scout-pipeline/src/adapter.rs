//! Source adapter: concurrent fan-out to the academic and grey sources.

use std::time::Duration;

use scout_core::entities::CandidatePaper;
use scout_core::enums::SourceKind;
use scout_sources::{AcademicSource, GreySource, SourceError};
use tokio_util::sync::CancellationToken;

use crate::error::PipelineError;
use crate::guard::{Guarded, guard};
use crate::warning::ScoutWarning;

/// Candidates from one fetch plus any sources that failed soft.
#[derive(Debug, Default)]
pub struct FetchOutcome {
    pub candidates: Vec<CandidatePaper>,
    pub warnings: Vec<ScoutWarning>,
}

/// Owns both sources and issues their calls concurrently.
pub struct SourceAdapter<A, G> {
    academic: A,
    grey: G,
    academic_limit: usize,
    grey_limit: usize,
    academic_timeout: Duration,
    grey_timeout: Duration,
}

impl<A: AcademicSource, G: GreySource> SourceAdapter<A, G> {
    #[must_use]
    pub const fn new(
        academic: A,
        grey: G,
        academic_limit: usize,
        grey_limit: usize,
        academic_timeout: Duration,
        grey_timeout: Duration,
    ) -> Self {
        Self {
            academic,
            grey,
            academic_limit,
            grey_limit,
            academic_timeout,
            grey_timeout,
        }
    }

    /// The academic source, for single-seed lookups.
    #[must_use]
    pub const fn academic(&self) -> &A {
        &self.academic
    }

    #[must_use]
    pub const fn academic_timeout(&self) -> Duration {
        self.academic_timeout
    }

    /// Query the academic source and, when `include_grey` is set, the grey
    /// source, concurrently. Academic results come first.
    ///
    /// A source that errors or exceeds its timeout contributes no
    /// candidates and one [`ScoutWarning::SourceUnavailable`]; the other
    /// source's results are returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Cancelled`] if `cancel` fires.
    pub async fn fetch(
        &self,
        query: &str,
        include_grey: bool,
        cancel: &CancellationToken,
    ) -> Result<FetchOutcome, PipelineError> {
        let academic = guard(
            cancel,
            self.academic_timeout,
            self.academic.search(query, self.academic_limit),
        );
        let grey = async {
            if include_grey {
                Some(guard(cancel, self.grey_timeout, self.grey.search(query, self.grey_limit)).await)
            } else {
                None
            }
        };
        let (academic, grey) = tokio::join!(academic, grey);

        let mut outcome = FetchOutcome::default();
        outcome.absorb(SourceKind::Academic, academic, self.academic_limit)?;
        if let Some(grey) = grey {
            outcome.absorb(SourceKind::Grey, grey, self.grey_limit)?;
        }
        tracing::info!(
            query,
            include_grey,
            candidates = outcome.candidates.len(),
            failed_sources = outcome.warnings.len(),
            "fetch complete"
        );
        Ok(outcome)
    }
}

impl FetchOutcome {
    fn absorb(
        &mut self,
        origin: SourceKind,
        result: Guarded<Result<Vec<CandidatePaper>, SourceError>>,
        cap: usize,
    ) -> Result<(), PipelineError> {
        let reason = match result {
            Guarded::Done(Ok(mut papers)) => {
                papers.retain(|p| !p.title.trim().is_empty());
                papers.truncate(cap);
                for paper in &mut papers {
                    paper.source_kind = origin;
                }
                self.candidates.extend(papers);
                return Ok(());
            }
            Guarded::Cancelled => return Err(PipelineError::Cancelled),
            Guarded::Done(Err(e)) => e.to_string(),
            Guarded::TimedOut(budget) => SourceError::Timeout {
                secs: budget.as_secs(),
            }
            .to_string(),
        };
        tracing::warn!(source = %origin, %reason, "source unavailable");
        self.warnings
            .push(ScoutWarning::SourceUnavailable { origin, reason });
        Ok(())
    }
}
