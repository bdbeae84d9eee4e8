//! Prompt builders for every structured request the pipeline makes.

use scout_core::entities::{ArchivedPaper, CandidatePaper};
use scout_core::structured::PROPOSAL_QUERY_COUNT;

/// Truncate to at most `max_chars` characters, marking the cut.
#[must_use]
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    let s = s.trim();
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max_chars).collect();
    format!("{truncated}…")
}

/// Relevance judgment of one candidate against the original query.
#[must_use]
pub fn relevance(query: &str, paper: &CandidatePaper, max_chars: usize) -> String {
    format!(
        "You are screening search results for a literature review.\n\
         Research query: \"{query}\"\n\
         Title: {title}\n\
         Abstract: {text}\n\n\
         Decide whether this paper is highly relevant to the research query. \
         Give a two-sentence academic summary focusing on findings and name the \
         primary research methodology (e.g. Qualitative, Meta-analysis, Empirical).",
        query = query.trim(),
        title = paper.title,
        text = truncate_chars(paper.grounding_text(), max_chars),
    )
}

/// Auto-pilot request for alternative queries.
#[must_use]
pub fn refinement(query: &str, relevant_found: usize) -> String {
    format!(
        "An academic search for \"{query}\" returned only {relevant_found} relevant paper(s).\n\
         In one paragraph, analyse why the query under-performed (too narrow, wrong \
         terminology, mixed fields). Then suggest exactly {PROPOSAL_QUERY_COUNT} better \
         academic search strings, best first.",
        query = query.trim(),
    )
}

/// Bibliographic metadata extraction from document text.
#[must_use]
pub fn metadata(text: &str, max_chars: usize) -> String {
    format!(
        "Extract the bibliographic metadata of the following document: its full \
         academic title, all contributing authors, the year of publication if stated, \
         and a concise abstract.\n\nDOCUMENT:\n{}",
        truncate_chars(text, max_chars)
    )
}

/// One knowledge-base line per archived paper.
#[must_use]
pub fn knowledge_line(paper: &ArchivedPaper) -> String {
    let year = paper
        .year
        .map_or_else(|| "n.a".to_string(), |y| y.to_string());
    format!(
        "KEY: ({}, {year}) | TITLE: {} | CONTENT: {}",
        paper.lead_author(),
        paper.title,
        paper.abstract_text.as_deref().unwrap_or("").trim()
    )
}

/// Synthesis grounded strictly in a project's archive.
#[must_use]
pub fn synthesis(papers: &[ArchivedPaper], question: &str) -> String {
    let kb: Vec<String> = papers.iter().map(knowledge_line).collect();
    format!(
        "You are a professional researcher. Use ONLY the context below; do not rely \
         on outside knowledge. Cite sources by their KEY, e.g. (Author, Year), and list \
         every key you cite.\n\nCONTEXT:\n{}\n\nQUESTION: {}",
        kb.join("\n"),
        question.trim()
    )
}
