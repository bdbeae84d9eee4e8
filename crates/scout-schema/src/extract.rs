//! Locate the JSON document inside raw model text.
//!
//! Constrained output mode normally returns bare JSON, but models still wrap
//! answers in Markdown fences or add a sentence before the object.

/// Return the JSON object or array embedded in `raw`.
///
/// Strips a surrounding ```` ```json ```` fence if present, otherwise slices
/// from the first `{`/`[` to the matching last `}`/`]`. Returns the trimmed
/// input unchanged when neither delimiter is found, leaving the parse error
/// to the caller.
#[must_use]
pub fn extract_json(raw: &str) -> &str {
    let trimmed = raw.trim();

    if let Some(rest) = trimmed.strip_prefix("```") {
        let body = rest.strip_prefix("json").unwrap_or(rest);
        let body = body.strip_suffix("```").unwrap_or(body);
        return body.trim();
    }

    let object = trimmed.find('{').zip(trimmed.rfind('}'));
    let array = trimmed.find('[').zip(trimmed.rfind(']'));
    let span = match (object, array) {
        (Some(o), Some(a)) => Some(if a.0 < o.0 { a } else { o }),
        (Some(o), None) => Some(o),
        (None, Some(a)) => Some(a),
        (None, None) => None,
    };

    match span {
        Some((start, end)) if start < end => &trimmed[start..=end],
        _ => trimmed,
    }
}
