//! Title normalization.
//!
//! `(project_id, normalize_title(title))` is the dedup key for archived
//! papers. Normalization only trims and collapses whitespace: case,
//! punctuation and subtitle variants are treated as distinct titles.

/// Collapse runs of whitespace to a single space and trim both ends.
#[must_use]
pub fn normalize_title(title: &str) -> String {
    title.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether two titles map to the same dedup key.
#[must_use]
pub fn same_title(a: &str, b: &str) -> bool {
    normalize_title(a) == normalize_title(b)
}
