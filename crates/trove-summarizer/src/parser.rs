//! Parse LLM output into a summary draft

use serde_json::{Map, Value};
use tracing::warn;
use trove_domain::Sentiment;

/// Model output after validation, before post-processing
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryDraft {
    /// Summary prose
    pub summary_text: String,
    /// Key points as returned
    pub key_points: Vec<String>,
    /// Suggested categories as returned
    pub categories: Vec<String>,
    /// Overall tone
    pub sentiment: Sentiment,
    /// True when the response was unusable and the raw text was kept instead
    pub degraded: bool,
}

/// Parse a model response
///
/// Never fails: a response with no JSON object, invalid JSON, or a schema
/// violation degrades to the first `fallback_chars` characters of the raw
/// text with no key points or categories and neutral sentiment.
pub fn parse_summary_response(response: &str, fallback_chars: usize) -> SummaryDraft {
    let parsed = find_json_object(response)
        .ok_or_else(|| "no JSON object in response".to_string())
        .and_then(|json| {
            serde_json::from_str::<Value>(json).map_err(|e| format!("JSON parse error: {}", e))
        })
        .and_then(|value| validate(&value));

    match parsed {
        Ok(draft) => draft,
        Err(e) => {
            warn!("Unusable summary response, degrading: {}", e);
            degrade(response, fallback_chars)
        }
    }
}

/// Locate the first balanced `{...}` block
///
/// Braces inside string literals (and escaped quotes within them) do not
/// count. Markdown fences around the object are skipped naturally.
pub fn find_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}

fn validate(value: &Value) -> Result<SummaryDraft, String> {
    let obj = value
        .as_object()
        .ok_or_else(|| "response is not a JSON object".to_string())?;

    let summary_text = obj
        .get("summaryText")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| "missing or empty 'summaryText'".to_string())?
        .to_string();

    let key_points = string_array(obj, "keyPoints")?;
    let categories = string_array(obj, "categories")?;

    let sentiment = match obj.get("sentiment") {
        None | Some(Value::Null) => Sentiment::Neutral,
        Some(Value::String(s)) => {
            Sentiment::parse(s).ok_or_else(|| format!("invalid 'sentiment': {}", s))?
        }
        Some(_) => return Err("'sentiment' is not a string".to_string()),
    };

    Ok(SummaryDraft {
        summary_text,
        key_points,
        categories,
        sentiment,
        degraded: false,
    })
}

/// Optional array of strings; blank entries are dropped
fn string_array(obj: &Map<String, Value>, field: &str) -> Result<Vec<String>, String> {
    let items = match obj.get(field) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(format!("'{}' is not an array", field)),
    };

    let mut out = Vec::with_capacity(items.len());
    for item in items {
        let s = item
            .as_str()
            .ok_or_else(|| format!("'{}' contains a non-string entry", field))?;
        let s = s.trim();
        if !s.is_empty() {
            out.push(s.to_string());
        }
    }
    Ok(out)
}

fn degrade(response: &str, fallback_chars: usize) -> SummaryDraft {
    SummaryDraft {
        summary_text: response.chars().take(fallback_chars).collect(),
        key_points: Vec::new(),
        categories: Vec::new(),
        sentiment: Sentiment::Neutral,
        degraded: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_json() {
        let response = r#"{
            "summaryText": "Rust makes memory safety the default.",
            "keyPoints": ["Ownership", "Borrowing"],
            "categories": ["rust", "safety"],
            "sentiment": "Positive"
        }"#;

        let draft = parse_summary_response(response, 1000);
        assert!(!draft.degraded);
        assert_eq!(draft.summary_text, "Rust makes memory safety the default.");
        assert_eq!(draft.key_points, vec!["Ownership", "Borrowing"]);
        assert_eq!(draft.categories, vec!["rust", "safety"]);
        assert_eq!(draft.sentiment, Sentiment::Positive);
    }

    #[test]
    fn test_parse_json_with_markdown_wrapper() {
        let response = "```json\n{\"summaryText\": \"Wrapped.\"}\n```";
        let draft = parse_summary_response(response, 1000);
        assert!(!draft.degraded);
        assert_eq!(draft.summary_text, "Wrapped.");
        assert_eq!(draft.sentiment, Sentiment::Neutral);
        assert!(draft.key_points.is_empty());
    }

    #[test]
    fn test_parse_json_with_surrounding_prose() {
        let response = "Here is the summary:\n{\"summaryText\": \"Inner.\"} Hope that helps {ok}";
        let draft = parse_summary_response(response, 1000);
        assert_eq!(draft.summary_text, "Inner.");
    }

    #[test]
    fn test_find_json_object_ignores_braces_in_strings() {
        let text = r#"x {"summaryText": "a } b { c", "q": "say \"}\""} y"#;
        let json = find_json_object(text).unwrap();
        assert_eq!(json, r#"{"summaryText": "a } b { c", "q": "say \"}\""}"#);
    }

    #[test]
    fn test_find_json_object_nested() {
        let text = r#"{"a": {"b": {}}, "c": 1} trailing }"#;
        assert_eq!(find_json_object(text), Some(r#"{"a": {"b": {}}, "c": 1}"#));
    }

    #[test]
    fn test_find_json_object_unbalanced() {
        assert_eq!(find_json_object("{\"a\": 1"), None);
        assert_eq!(find_json_object("no braces"), None);
    }

    #[test]
    fn test_parse_plain_text_degrades() {
        let draft = parse_summary_response("  Just prose, no JSON.  ", 1000);
        assert!(draft.degraded);
        assert_eq!(draft.summary_text, "  Just prose, no JSON.  ");
        assert!(draft.key_points.is_empty());
        assert!(draft.categories.is_empty());
        assert_eq!(draft.sentiment, Sentiment::Neutral);
    }

    #[test]
    fn test_degraded_text_is_truncated_by_chars() {
        let response = "é".repeat(1500);
        let draft = parse_summary_response(&response, 1000);
        assert!(draft.degraded);
        assert_eq!(draft.summary_text.chars().count(), 1000);
    }

    #[test]
    fn test_degraded_text_keeps_leading_whitespace_in_count() {
        let response = format!("\n\n{}", "a".repeat(20));
        let draft = parse_summary_response(&response, 10);
        assert_eq!(draft.summary_text, "\n\naaaaaaaa");
    }

    #[test]
    fn test_missing_summary_text_degrades() {
        let draft = parse_summary_response(r#"{"keyPoints": ["a"]}"#, 1000);
        assert!(draft.degraded);
        assert!(draft.key_points.is_empty());
    }

    #[test]
    fn test_blank_summary_text_degrades() {
        let draft = parse_summary_response(r#"{"summaryText": "   "}"#, 1000);
        assert!(draft.degraded);
    }

    #[test]
    fn test_wrong_array_types_degrade() {
        let not_array = r#"{"summaryText": "S", "keyPoints": "one"}"#;
        assert!(parse_summary_response(not_array, 1000).degraded);

        let mixed = r#"{"summaryText": "S", "categories": ["a", 2]}"#;
        assert!(parse_summary_response(mixed, 1000).degraded);
    }

    #[test]
    fn test_invalid_sentiment_degrades() {
        let response = r#"{"summaryText": "S", "sentiment": "mixed"}"#;
        assert!(parse_summary_response(response, 1000).degraded);

        let numeric = r#"{"summaryText": "S", "sentiment": 1}"#;
        assert!(parse_summary_response(numeric, 1000).degraded);
    }

    #[test]
    fn test_null_optionals_are_absent() {
        let response = r#"{"summaryText": "S", "keyPoints": null, "sentiment": null}"#;
        let draft = parse_summary_response(response, 1000);
        assert!(!draft.degraded);
        assert!(draft.key_points.is_empty());
        assert_eq!(draft.sentiment, Sentiment::Neutral);
    }

    #[test]
    fn test_blank_entries_dropped() {
        let response = r#"{"summaryText": "S", "keyPoints": [" a ", "", "  "]}"#;
        let draft = parse_summary_response(response, 1000);
        assert_eq!(draft.key_points, vec!["a"]);
    }

    #[test]
    fn test_object_inside_array_is_found() {
        let draft = parse_summary_response(r#"[{"summaryText": "S"}]"#, 1000);
        assert!(!draft.degraded);
        assert_eq!(draft.summary_text, "S");
    }
}
