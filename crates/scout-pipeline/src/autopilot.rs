//! Auto-pilot: one bounded round of model-proposed query refinement.

use std::time::Duration;

use scout_core::structured::RefinementProposal;
use scout_llm::TextGenerator;
use scout_schema::{REFINEMENT_PROPOSAL, SchemaError, SchemaRegistry};
use tokio_util::sync::CancellationToken;

use crate::error::PipelineError;
use crate::guard::{Guarded, guard};
use crate::prompts;

/// Asks the model why a query under-performed and what to try instead.
pub struct Autopilot<'a, L> {
    llm: &'a L,
    schemas: &'a SchemaRegistry,
    threshold: usize,
    timeout: Duration,
}

impl<'a, L: TextGenerator> Autopilot<'a, L> {
    #[must_use]
    pub const fn new(
        llm: &'a L,
        schemas: &'a SchemaRegistry,
        threshold: usize,
        timeout: Duration,
    ) -> Self {
        Self {
            llm,
            schemas,
            threshold,
            timeout,
        }
    }

    /// Whether `relevant_found` results are few enough to engage.
    #[must_use]
    pub const fn should_engage(&self, relevant_found: usize) -> bool {
        relevant_found < self.threshold
    }

    /// Request a [`RefinementProposal`] for `query`.
    ///
    /// The reply must carry exactly three non-blank queries.
    ///
    /// # Errors
    ///
    /// Returns `Llm` if the call fails or times out, `Schema` if the reply
    /// does not match the proposal schema or lacks three usable queries, and
    /// `Cancelled` if `cancel` fires.
    pub async fn propose(
        &self,
        query: &str,
        relevant_found: usize,
        cancel: &CancellationToken,
    ) -> Result<RefinementProposal, PipelineError> {
        let schema = self.schemas.require(REFINEMENT_PROPOSAL)?;
        let prompt = prompts::refinement(query, relevant_found);

        let raw = match guard(cancel, self.timeout, self.llm.generate(&prompt, Some(schema))).await
        {
            Guarded::Done(result) => result?,
            Guarded::TimedOut(budget) => {
                return Err(scout_llm::LlmError::Timeout {
                    secs: budget.as_secs(),
                }
                .into());
            }
            Guarded::Cancelled => return Err(PipelineError::Cancelled),
        };

        let proposal = self
            .schemas
            .parse::<RefinementProposal>(REFINEMENT_PROPOSAL, &raw)?
            .normalized()
            .map_err(|e| SchemaError::ValidationFailed {
                errors: vec![e.to_string()],
            })?;
        tracing::info!(query, proposals = ?proposal.queries, "auto-pilot proposal");
        Ok(proposal)
    }
}
