//! `DuckDuckGo` HTML search client for grey literature.
//!
//! Queries are constrained to PDF documents (`filetype:pdf`) so results skew
//! towards reports, theses and white papers. Each hit becomes a
//! [`CandidatePaper`] with the snippet as its abstract, a placeholder author
//! and the current year, since web results carry neither.

use chrono::Datelike;
use scout_config::GreyConfig;
use scout_core::entities::CandidatePaper;
use scout_core::enums::SourceKind;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::SourceError;
use crate::http::{build_client, ensure_success};
use crate::GreySource;

/// One organic result from a `DuckDuckGo` results page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebHit {
    pub title: String,
    pub url: String,
    pub snippet: Option<String>,
}

/// HTTP client for the `DuckDuckGo` HTML endpoint.
pub struct DuckDuckGoClient {
    http: reqwest::Client,
    base_url: String,
    max_results: usize,
    placeholder_author: String,
    timeout_secs: u64,
}

impl DuckDuckGoClient {
    /// Build a client from the `[grey]` config section.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the underlying `reqwest::Client`
    /// fails to build.
    pub fn new(config: &GreyConfig) -> Result<Self, SourceError> {
        Ok(Self {
            http: build_client(config.timeout_secs)?,
            base_url: config.base_url.clone(),
            max_results: config.max_results as usize,
            placeholder_author: config.placeholder_author.clone(),
            timeout_secs: config.timeout_secs,
        })
    }

    fn to_candidate(&self, hit: WebHit, year: i32) -> CandidatePaper {
        CandidatePaper {
            title: hit.title,
            authors: vec![self.placeholder_author.clone()],
            year: Some(year),
            abstract_text: hit.snippet,
            url: Some(hit.url),
            source_kind: SourceKind::Grey,
            citation_count: None,
            external_id: None,
            relevance: None,
        }
    }
}

impl GreySource for DuckDuckGoClient {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<CandidatePaper>, SourceError> {
        let cap = max_results.min(self.max_results);
        if cap == 0 {
            return Ok(Vec::new());
        }

        let constrained = pdf_query(query);
        let resp = self
            .http
            .get(&self.base_url)
            .query(&[("q", constrained.as_str())])
            .send()
            .await
            .map_err(|e| SourceError::from_transport(e, self.timeout_secs))?;
        let html = ensure_success(resp)
            .await?
            .text()
            .await
            .map_err(|e| SourceError::from_transport(e, self.timeout_secs))?;

        let year = chrono::Utc::now().year();
        let hits = parse_results(&html, cap);
        tracing::debug!(query = %constrained, count = hits.len(), "grey literature search");
        Ok(hits
            .into_iter()
            .map(|hit| self.to_candidate(hit, year))
            .collect())
    }
}

/// Constrain a query to PDF documents.
#[must_use]
pub fn pdf_query(query: &str) -> String {
    format!("{} filetype:pdf", query.trim())
}

/// Extract at most `limit` results from a `DuckDuckGo` HTML results page.
///
/// Results without a usable link or title are skipped, and repeated target
/// URLs are reported once.
#[must_use]
pub fn parse_results(html: &str, limit: usize) -> Vec<WebHit> {
    let (Ok(container), Ok(title), Ok(snippet)) = (
        Selector::parse("div.result"),
        Selector::parse("a.result__a"),
        Selector::parse("a.result__snippet, div.result__snippet, span.result__snippet"),
    ) else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    let mut hits: Vec<WebHit> = Vec::new();

    for result in document.select(&container) {
        if hits.len() >= limit {
            break;
        }
        let Some(anchor) = result.select(&title).next() else {
            continue;
        };
        let Some(url) = anchor.value().attr("href").and_then(resolve_href) else {
            continue;
        };
        let title = compact_text(anchor);
        if title.is_empty() || hits.iter().any(|h| h.url == url) {
            continue;
        }
        let snippet = result
            .select(&snippet)
            .next()
            .map(compact_text)
            .filter(|s| !s.is_empty());
        hits.push(WebHit {
            title,
            url,
            snippet,
        });
    }
    hits
}

fn compact_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Turn a result link into the target URL, unwrapping `DuckDuckGo`'s
/// `/l/?uddg=` redirect.
fn resolve_href(href: &str) -> Option<String> {
    let href = href.trim();
    let absolute = if let Some(rest) = href.strip_prefix("//") {
        format!("https://{rest}")
    } else if href.starts_with('/') {
        format!("https://duckduckgo.com{href}")
    } else {
        href.to_string()
    };

    let parsed = Url::parse(&absolute).ok()?;
    let is_redirect = parsed
        .host_str()
        .is_some_and(|h| h.ends_with("duckduckgo.com"))
        && parsed.path().starts_with("/l/");
    if is_redirect {
        let target = parsed
            .query_pairs()
            .find(|(k, _)| k == "uddg")
            .map(|(_, v)| v.trim().to_string())?;
        let mut dest = Url::parse(&target).ok()?;
        dest.set_fragment(None);
        return matches!(dest.scheme(), "http" | "https").then(|| dest.to_string());
    }

    matches!(parsed.scheme(), "http" | "https").then_some(absolute)
}
