//! # scout-sources
//!
//! External paper sources for Scout.
//!
//! - Semantic Scholar graph API: keyword search and one-hop reference lookup
//! - `DuckDuckGo` HTML endpoint: filetype-constrained grey-literature search
//!
//! Both clients map their responses to [`CandidatePaper`] so the pipeline
//! never sees a source-specific record. The pipeline talks to them through
//! the [`AcademicSource`] and [`GreySource`] traits, which lets tests swap in
//! scripted fakes.

pub mod duckduckgo;
pub mod semantic_scholar;

mod error;
mod http;

pub use duckduckgo::DuckDuckGoClient;
pub use error::SourceError;
pub use semantic_scholar::SemanticScholarClient;

use std::future::Future;

use scout_core::entities::CandidatePaper;

/// An indexed academic graph that supports keyword search and reference
/// lookup.
pub trait AcademicSource: Send + Sync {
    /// Keyword search returning at most `limit` candidates in upstream
    /// ranking order.
    fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<CandidatePaper>, SourceError>> + Send;

    /// Papers cited by the paper with upstream identifier `paper_id`.
    ///
    /// References the graph knows no title for come back with an empty
    /// `title`; callers decide whether to keep them.
    fn references(
        &self,
        paper_id: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<CandidatePaper>, SourceError>> + Send;
}

/// A general web search constrained to document results.
pub trait GreySource: Send + Sync {
    /// Search for PDF documents matching `query`, returning at most
    /// `max_results` candidates.
    fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> impl Future<Output = Result<Vec<CandidatePaper>, SourceError>> + Send;
}
