//! Locates a plausible JSON object inside free-form AI output.
//!
//! This is a candidate generator only. It does not balance braces and does
//! not validate; the tolerant parser decides whether the candidate is JSON.

use once_cell::sync::Lazy;
use regex::Regex;

static FENCED_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(?i:json)?\s*(.*?)\s*```").expect("fence regex"));

/// Returns the most plausible JSON substring of `text`, if any.
///
/// A fenced code block wins. Otherwise the span from the first `{` to the
/// last `}` is returned.
pub fn extract_json_candidate(text: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }

    if let Some(inner) = FENCED_BLOCK
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|inner| !inner.is_empty())
    {
        return Some(inner.to_string());
    }

    let first = text.find('{')?;
    let last = text.rfind('}')?;
    if last > first {
        Some(text[first..=last].trim().to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fenced_json_block_wins() {
        let text = "Here you go:\n```json\n{\"contract\":\"X\"}\n```\nThanks {not this}";
        assert_eq!(extract_json_candidate(text).as_deref(), Some("{\"contract\":\"X\"}"));
    }

    #[test]
    fn untagged_fence_is_accepted() {
        let text = "```\n{\"a\":1}\n```";
        assert_eq!(extract_json_candidate(text).as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn uppercase_tag_is_accepted() {
        let text = "```JSON\n{\"a\":1}\n```";
        assert_eq!(extract_json_candidate(text).as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn brace_span_is_first_to_last() {
        let text = "prefix {\"a\":{\"b\":1}} middle } suffix";
        assert_eq!(
            extract_json_candidate(text).as_deref(),
            Some("{\"a\":{\"b\":1}} middle }")
        );
    }

    #[test]
    fn empty_fence_falls_back_to_braces() {
        let text = "``` ``` then {\"a\":1}";
        assert_eq!(extract_json_candidate(text).as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn no_braces_means_no_candidate() {
        assert_eq!(extract_json_candidate("just prose"), None);
        assert_eq!(extract_json_candidate(""), None);
    }

    #[test]
    fn closing_brace_before_opening_is_rejected() {
        assert_eq!(extract_json_candidate("} then {"), None);
    }
}
