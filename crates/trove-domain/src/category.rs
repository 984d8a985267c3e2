//! Category normalization rules
//!
//! Categories are compared by a grouping key (trimmed, lowercased) and shown
//! with the first spelling seen. Every component that matches categories
//! (clustering, filtering, the summary writer, the store) goes through here.

/// Reserved category carried by every summary artifact
pub const AI_SUMMARY_CATEGORY: &str = "ai-summary";

/// Trimmed display form, or `None` for a blank category
pub fn normalize(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Grouping key: trimmed and lowercased
///
/// # Examples
///
/// ```
/// use trove_domain::category;
///
/// assert_eq!(category::key("  AI "), category::key("ai"));
/// ```
pub fn key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Normalize a category list: trim, drop blanks, drop key duplicates
///
/// Keeps insertion order and the first spelling of each key.
pub fn dedupe<I, S>(categories: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for raw in categories {
        if let Some(display) = normalize(raw.as_ref()) {
            if seen.insert(key(&display)) {
                out.push(display);
            }
        }
    }
    out
}
