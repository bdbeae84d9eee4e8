//! Scripted stand-ins for the external services, shared by the pipeline
//! integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use scout_core::entities::CandidatePaper;
use scout_core::enums::SourceKind;
use scout_db::ScoutDb;
use scout_llm::{LlmError, TextGenerator};
use scout_pipeline::{PipelineSettings, Scout};
use scout_sources::{AcademicSource, GreySource, SourceError};
use serde_json::{Value, json};

pub type TestScout = Scout<FakeAcademic, FakeGrey, FakeLlm, ScoutDb>;

/// Candidate with a title, one author and an abstract.
pub fn paper(title: &str) -> CandidatePaper {
    CandidatePaper {
        authors: vec!["A. Author".into()],
        year: Some(2020),
        abstract_text: Some(format!("Abstract of {title}.")),
        ..CandidatePaper::new(title, SourceKind::Academic)
    }
}

pub fn papers(titles: &[&str]) -> Vec<CandidatePaper> {
    titles.iter().map(|t| paper(t)).collect()
}

pub fn titles(papers: &[CandidatePaper]) -> Vec<&str> {
    papers.iter().map(|p| p.title.as_str()).collect()
}

fn api_down() -> SourceError {
    SourceError::Api {
        status: 503,
        message: "service unavailable".into(),
    }
}

// ── Academic graph ─────────────────────────────────────────────────

#[derive(Default)]
struct AcademicState {
    results: Mutex<HashMap<String, Vec<CandidatePaper>>>,
    references: Mutex<HashMap<String, Vec<CandidatePaper>>>,
    searches: Mutex<Vec<(String, usize)>>,
    reference_calls: Mutex<Vec<(String, usize)>>,
    failing: AtomicBool,
    delay: Mutex<Option<Duration>>,
}

/// Academic source answering from per-query and per-paper tables.
#[derive(Clone, Default)]
pub struct FakeAcademic {
    state: Arc<AcademicState>,
}

impl FakeAcademic {
    pub fn with_results(self, query: &str, papers: Vec<CandidatePaper>) -> Self {
        self.state
            .results
            .lock()
            .unwrap()
            .insert(query.to_string(), papers);
        self
    }

    pub fn with_references(self, paper_id: &str, papers: Vec<CandidatePaper>) -> Self {
        self.state
            .references
            .lock()
            .unwrap()
            .insert(paper_id.to_string(), papers);
        self
    }

    pub fn failing(self) -> Self {
        self.state.failing.store(true, Ordering::SeqCst);
        self
    }

    pub fn delayed(self, delay: Duration) -> Self {
        *self.state.delay.lock().unwrap() = Some(delay);
        self
    }

    pub fn searches(&self) -> Vec<(String, usize)> {
        self.state.searches.lock().unwrap().clone()
    }

    pub fn reference_calls(&self) -> Vec<(String, usize)> {
        self.state.reference_calls.lock().unwrap().clone()
    }

    async fn pause(&self) {
        let delay = *self.state.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

impl AcademicSource for FakeAcademic {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<CandidatePaper>, SourceError> {
        self.state
            .searches
            .lock()
            .unwrap()
            .push((query.to_string(), limit));
        self.pause().await;
        if self.state.failing.load(Ordering::SeqCst) {
            return Err(api_down());
        }
        let results = self.state.results.lock().unwrap().get(query).cloned();
        Ok(results.unwrap_or_default().into_iter().take(limit).collect())
    }

    async fn references(
        &self,
        paper_id: &str,
        limit: usize,
    ) -> Result<Vec<CandidatePaper>, SourceError> {
        self.state
            .reference_calls
            .lock()
            .unwrap()
            .push((paper_id.to_string(), limit));
        self.pause().await;
        if self.state.failing.load(Ordering::SeqCst) {
            return Err(api_down());
        }
        let refs = self.state.references.lock().unwrap().get(paper_id).cloned();
        Ok(refs.unwrap_or_default().into_iter().take(limit).collect())
    }
}

// ── Grey literature ────────────────────────────────────────────────

#[derive(Default)]
struct GreyState {
    results: Mutex<Vec<CandidatePaper>>,
    calls: AtomicUsize,
    failing: AtomicBool,
    delay: Mutex<Option<Duration>>,
}

/// Grey source returning the same hits for every query.
#[derive(Clone, Default)]
pub struct FakeGrey {
    state: Arc<GreyState>,
}

impl FakeGrey {
    pub fn with_results(self, papers: Vec<CandidatePaper>) -> Self {
        *self.state.results.lock().unwrap() = papers;
        self
    }

    pub fn failing(self) -> Self {
        self.state.failing.store(true, Ordering::SeqCst);
        self
    }

    pub fn delayed(self, delay: Duration) -> Self {
        *self.state.delay.lock().unwrap() = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.state.calls.load(Ordering::SeqCst)
    }
}

impl GreySource for FakeGrey {
    async fn search(
        &self,
        _query: &str,
        max_results: usize,
    ) -> Result<Vec<CandidatePaper>, SourceError> {
        self.state.calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.state.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.state.failing.load(Ordering::SeqCst) {
            return Err(api_down());
        }
        let results = self.state.results.lock().unwrap().clone();
        Ok(results.into_iter().take(max_results).collect())
    }
}

// ── Text generation ────────────────────────────────────────────────

#[derive(Default)]
struct LlmState {
    relevant: Mutex<HashSet<String>>,
    garbled: Mutex<HashSet<String>>,
    slow: Mutex<HashMap<String, Duration>>,
    proposal: Mutex<Option<Value>>,
    metadata: Mutex<Option<Value>>,
    synthesis: Mutex<Option<Value>>,
    prompts: Mutex<Vec<String>>,
    proposal_calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

/// Model that answers by schema shape.
///
/// Relevance verdicts are keyed on the `Title:` line of the prompt. Titles
/// marked relevant get a positive verdict, garbled titles get prose instead
/// of JSON, everything else is judged not relevant. Proposal, metadata and
/// synthesis replies fail with an API error unless scripted.
#[derive(Clone, Default)]
pub struct FakeLlm {
    state: Arc<LlmState>,
}

impl FakeLlm {
    pub fn relevant(self, titles: &[&str]) -> Self {
        self.state
            .relevant
            .lock()
            .unwrap()
            .extend(titles.iter().map(|t| (*t).to_string()));
        self
    }

    pub fn garbled(self, titles: &[&str]) -> Self {
        self.state
            .garbled
            .lock()
            .unwrap()
            .extend(titles.iter().map(|t| (*t).to_string()));
        self
    }

    pub fn slow(self, title: &str, delay: Duration) -> Self {
        self.state
            .slow
            .lock()
            .unwrap()
            .insert(title.to_string(), delay);
        self
    }

    pub fn proposing(self, queries: &[&str]) -> Self {
        *self.state.proposal.lock().unwrap() = Some(json!({
            "analysis": "The query is too narrow for the indexed literature.",
            "queries": queries,
        }));
        self
    }

    pub fn raw_proposal(self, value: Value) -> Self {
        *self.state.proposal.lock().unwrap() = Some(value);
        self
    }

    pub fn extracting(self, metadata: Value) -> Self {
        *self.state.metadata.lock().unwrap() = Some(metadata);
        self
    }

    pub fn answering(self, answer: Value) -> Self {
        *self.state.synthesis.lock().unwrap() = Some(answer);
        self
    }

    pub fn proposal_calls(&self) -> usize {
        self.state.proposal_calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.state.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.state.prompts.lock().unwrap().clone()
    }

    fn scripted(slot: &Mutex<Option<Value>>) -> Result<String, LlmError> {
        slot.lock()
            .unwrap()
            .as_ref()
            .map(Value::to_string)
            .ok_or_else(|| LlmError::Api {
                status: 500,
                message: "internal error".into(),
            })
    }

    async fn verdict(&self, prompt: &str) -> Result<String, LlmError> {
        let title = prompt
            .lines()
            .find_map(|l| l.strip_prefix("Title: "))
            .unwrap_or_default()
            .to_string();

        let now = self.state.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let delay = self.state.slow.lock().unwrap().get(&title).copied();
        tokio::time::sleep(delay.unwrap_or(Duration::from_millis(2))).await;
        self.state.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.state.garbled.lock().unwrap().contains(&title) {
            return Ok("I think this paper is probably relevant.".into());
        }
        let is_relevant = self.state.relevant.lock().unwrap().contains(&title);
        Ok(json!({
            "is_relevant": is_relevant,
            "summary": format!("Findings of {title}. Evaluated on a benchmark."),
            "methodology": "Empirical",
        })
        .to_string())
    }
}

impl TextGenerator for FakeLlm {
    async fn generate(&self, prompt: &str, response_schema: Option<&Value>) -> Result<String, LlmError> {
        self.state.prompts.lock().unwrap().push(prompt.to_string());
        let props = response_schema
            .and_then(|s| s.get("properties"))
            .cloned()
            .unwrap_or_default();
        if props.get("is_relevant").is_some() {
            self.verdict(prompt).await
        } else if props.get("queries").is_some() {
            self.state.proposal_calls.fetch_add(1, Ordering::SeqCst);
            Self::scripted(&self.state.proposal)
        } else if props.get("answer").is_some() {
            Self::scripted(&self.state.synthesis)
        } else if props.get("abstract").is_some() {
            Self::scripted(&self.state.metadata)
        } else {
            Err(LlmError::EmptyResponse)
        }
    }
}

// ── Wiring ─────────────────────────────────────────────────────────

pub fn settings() -> PipelineSettings {
    PipelineSettings {
        academic_timeout: Duration::from_millis(500),
        grey_timeout: Duration::from_millis(500),
        llm_timeout: Duration::from_millis(500),
        ..PipelineSettings::default()
    }
}

/// In-memory store holding one project, returned with its id.
pub async fn store_with_project(name: &str) -> (ScoutDb, String) {
    let db = ScoutDb::open_local(":memory:").await.unwrap();
    let project = db.create_project(name, None).await.unwrap();
    (db, project.id)
}

pub async fn scout(
    academic: FakeAcademic,
    grey: FakeGrey,
    llm: FakeLlm,
    settings: PipelineSettings,
) -> (TestScout, String) {
    let (db, project_id) = store_with_project("Test project").await;
    (Scout::new(academic, grey, llm, db, settings), project_id)
}
