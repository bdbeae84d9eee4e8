//! Semantic Scholar graph API client.

use scout_config::AcademicConfig;
use scout_core::entities::CandidatePaper;
use scout_core::enums::SourceKind;
use serde::Deserialize;

use crate::error::SourceError;
use crate::http::{build_client, ensure_success};
use crate::AcademicSource;

const SEARCH_FIELDS: &str = "paperId,title,authors,year,abstract,url,citationCount";
const MAX_PAGE: usize = 100;

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<PaperData>,
}

#[derive(Deserialize)]
struct ReferencesResponse {
    #[serde(default)]
    data: Vec<ReferenceData>,
}

#[derive(Deserialize)]
struct ReferenceData {
    #[serde(rename = "citedPaper", default)]
    cited_paper: Option<PaperData>,
}

#[derive(Deserialize)]
struct PaperData {
    #[serde(rename = "paperId", default)]
    paper_id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    authors: Vec<AuthorData>,
    #[serde(default)]
    year: Option<i32>,
    #[serde(rename = "abstract", default)]
    abstract_text: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(rename = "citationCount", default)]
    citation_count: Option<i64>,
}

#[derive(Deserialize)]
struct AuthorData {
    #[serde(default)]
    name: Option<String>,
}

impl PaperData {
    fn into_candidate(self) -> CandidatePaper {
        CandidatePaper {
            title: self.title.map(|t| t.trim().to_string()).unwrap_or_default(),
            authors: self.authors.into_iter().filter_map(|a| a.name).collect(),
            year: self.year,
            abstract_text: self.abstract_text,
            url: self.url,
            source_kind: SourceKind::Academic,
            citation_count: self.citation_count,
            external_id: self.paper_id,
            relevance: None,
        }
    }
}

/// HTTP client for the Semantic Scholar graph API.
pub struct SemanticScholarClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    timeout_secs: u64,
}

impl SemanticScholarClient {
    /// Build a client from the `[academic]` config section.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the underlying `reqwest::Client`
    /// fails to build.
    pub fn new(config: &AcademicConfig) -> Result<Self, SourceError> {
        Ok(Self {
            http: build_client(config.timeout_secs)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.has_api_key().then(|| config.api_key.clone()),
            timeout_secs: config.timeout_secs,
        })
    }

    fn search_url(&self, query: &str, limit: usize) -> String {
        format!(
            "{}/paper/search?query={}&limit={}&fields={SEARCH_FIELDS}",
            self.base_url,
            urlencoding::encode(query),
            limit.clamp(1, MAX_PAGE)
        )
    }

    fn references_url(&self, paper_id: &str, limit: usize) -> String {
        format!(
            "{}/paper/{}/references?limit={}&fields={SEARCH_FIELDS}",
            self.base_url,
            urlencoding::encode(paper_id),
            limit.clamp(1, MAX_PAGE)
        )
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, SourceError> {
        let mut request = self.http.get(url);
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }
        let resp = request
            .send()
            .await
            .map_err(|e| SourceError::from_transport(e, self.timeout_secs))?;
        ensure_success(resp).await
    }
}

impl AcademicSource for SemanticScholarClient {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<CandidatePaper>, SourceError> {
        let resp = self.get(&self.search_url(query, limit)).await?;
        let body = resp
            .text()
            .await
            .map_err(|e| SourceError::from_transport(e, self.timeout_secs))?;
        let papers = parse_search(&body)?;
        tracing::debug!(query, count = papers.len(), "semantic scholar search");
        Ok(papers.into_iter().take(limit).collect())
    }

    async fn references(
        &self,
        paper_id: &str,
        limit: usize,
    ) -> Result<Vec<CandidatePaper>, SourceError> {
        let resp = self.get(&self.references_url(paper_id, limit)).await?;
        let body = resp
            .text()
            .await
            .map_err(|e| SourceError::from_transport(e, self.timeout_secs))?;
        let refs = parse_references(&body)?;
        tracing::debug!(paper_id, count = refs.len(), "semantic scholar references");
        Ok(refs.into_iter().take(limit).collect())
    }
}

fn parse_search(body: &str) -> Result<Vec<CandidatePaper>, SourceError> {
    let data: SearchResponse =
        serde_json::from_str(body).map_err(|e| SourceError::Parse(e.to_string()))?;
    Ok(data
        .data
        .into_iter()
        .map(PaperData::into_candidate)
        .collect())
}

fn parse_references(body: &str) -> Result<Vec<CandidatePaper>, SourceError> {
    let data: ReferencesResponse =
        serde_json::from_str(body).map_err(|e| SourceError::Parse(e.to_string()))?;
    Ok(data
        .data
        .into_iter()
        .map(|r| {
            r.cited_paper
                .map_or_else(|| CandidatePaper::new("", SourceKind::Academic), PaperData::into_candidate)
        })
        .collect())
}
