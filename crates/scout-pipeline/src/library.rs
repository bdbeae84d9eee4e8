//! Library-facing operations: metadata ingest and grounded synthesis.

use scout_core::entities::CandidatePaper;
use scout_core::enums::SourceKind;
use scout_core::structured::{PaperMetadata, SynthesisAnswer};
use scout_db::{InsertOutcome, PaperStore};
use scout_llm::{LlmError, TextGenerator};
use scout_schema::{PAPER_METADATA, SYNTHESIS_ANSWER};
use scout_sources::{AcademicSource, GreySource};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::engine::Scout;
use crate::error::PipelineError;
use crate::guard::{Guarded, guard};
use crate::prompts;

impl<A, G, L, S> Scout<A, G, L, S>
where
    A: AcademicSource,
    G: GreySource,
    L: TextGenerator,
    S: PaperStore,
{
    /// Extract bibliographic metadata from already-decoded document text.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for blank text, `Llm` or `Schema` if the model call
    /// fails or its reply is malformed, `Cancelled` if `cancel` fires.
    pub async fn extract_metadata(
        &self,
        text: &str,
        cancel: &CancellationToken,
    ) -> Result<PaperMetadata, PipelineError> {
        if text.trim().is_empty() {
            return Err(PipelineError::InvalidInput("document text is empty".into()));
        }
        let prompt = prompts::metadata(text, self.settings().prompt_abstract_chars);
        let metadata: PaperMetadata = self.structured(PAPER_METADATA, &prompt, cancel).await?;
        tracing::info!(title = %metadata.title, authors = metadata.authors.len(), "metadata extracted");
        Ok(metadata)
    }

    /// Archive extracted metadata in `project_id` as an ingested paper.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown project, `Store` if the title is blank or
    /// the insert fails.
    pub async fn archive_metadata(
        &self,
        project_id: &str,
        metadata: PaperMetadata,
        url: Option<String>,
    ) -> Result<InsertOutcome, PipelineError> {
        self.require_project(project_id).await?;
        let abstract_text = Some(metadata.abstract_text).filter(|a| !a.trim().is_empty());
        let candidate = CandidatePaper {
            authors: metadata.authors,
            year: metadata.year,
            abstract_text,
            url: url.filter(|u| !u.trim().is_empty()),
            ..CandidatePaper::new(metadata.title, SourceKind::Ingest)
        };
        Ok(self.store().insert_paper(project_id, &candidate).await?)
    }

    /// Answer `question` from the papers archived in `project_id` only.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a blank question or a project with no papers,
    /// `NotFound` for an unknown project, `Llm` or `Schema` if the model
    /// call fails, `Cancelled` if `cancel` fires.
    pub async fn synthesize(
        &self,
        project_id: &str,
        question: &str,
        cancel: &CancellationToken,
    ) -> Result<SynthesisAnswer, PipelineError> {
        if question.trim().is_empty() {
            return Err(PipelineError::InvalidInput("question is empty".into()));
        }
        self.require_project(project_id).await?;
        let papers = self.store().list_by_project(project_id).await?;
        if papers.is_empty() {
            return Err(PipelineError::InvalidInput(format!(
                "project {project_id} has no archived papers"
            )));
        }
        let prompt = prompts::synthesis(&papers, question);
        let answer: SynthesisAnswer = self.structured(SYNTHESIS_ANSWER, &prompt, cancel).await?;
        tracing::info!(
            project_id,
            papers = papers.len(),
            citations = answer.citations.len(),
            "synthesis complete"
        );
        Ok(answer)
    }

    async fn structured<T: DeserializeOwned>(
        &self,
        schema_name: &str,
        prompt: &str,
        cancel: &CancellationToken,
    ) -> Result<T, PipelineError> {
        let schema = self.schemas().require(schema_name)?;
        let budget = self.settings().llm_timeout;
        let raw = match guard(cancel, budget, self.llm().generate(prompt, Some(schema))).await {
            Guarded::Done(result) => result?,
            Guarded::TimedOut(budget) => {
                return Err(LlmError::Timeout {
                    secs: budget.as_secs(),
                }
                .into());
            }
            Guarded::Cancelled => return Err(PipelineError::Cancelled),
        };
        Ok(self.schemas().parse(schema_name, &raw)?)
    }
}
