//! JSON parsing that retries after repairing escape artifacts.

use serde_json::Value;

use super::repair::repair_text;

const WRAPPING_QUOTES: &[char] = &['"', '\'', '`'];

/// Parses `text` as JSON, retrying with repaired variants.
///
/// Attempts, first success wins:
/// 1. the text as-is;
/// 2. the text with exactly one level of JSON string escaping removed;
/// 3. the text after [`repair_text`];
/// 4. the text with wrapping quotes/backticks stripped, then repaired.
///
/// Repaired attempts also retry once with raw control characters inside
/// string literals re-escaped. A result that is a bare JSON string holding
/// an object or array is unwrapped one level.
pub fn parse_json_tolerant(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }

    parse_strict(text)
        .or_else(|| parse_unescaped_once(text))
        .or_else(|| parse_repaired(&repair_text(text)))
        .or_else(|| parse_repaired(&repair_text(strip_wrapping_quotes(text))))
}

fn parse_strict(text: &str) -> Option<Value> {
    serde_json::from_str::<Value>(text).ok().map(unwrap_embedded)
}

fn parse_repaired(text: &str) -> Option<Value> {
    parse_strict(text).or_else(|| parse_strict(&escape_controls_in_strings(text)))
}

/// Decodes the text as the body of a JSON string literal, then parses that.
///
/// Unlike [`repair_text`] this removes a single escape level, so `\\\"`
/// inside a once-escaped object becomes `\"` and the literal stays intact.
fn parse_unescaped_once(text: &str) -> Option<Value> {
    let decoded = serde_json::from_str::<String>(&format!("\"{}\"", text.trim())).ok()?;
    parse_repaired(&decoded)
}

/// Handles JSON that was serialized into a JSON string.
fn unwrap_embedded(value: Value) -> Value {
    if let Value::String(inner) = &value {
        if let Ok(nested @ (Value::Object(_) | Value::Array(_))) =
            serde_json::from_str::<Value>(inner.trim())
        {
            return nested;
        }
    }
    value
}

fn strip_wrapping_quotes(text: &str) -> &str {
    let leading = text.trim_start();
    let text = if leading.starts_with(WRAPPING_QUOTES) {
        leading.trim_start_matches(WRAPPING_QUOTES).trim_start()
    } else {
        text
    };

    let trailing = text.trim_end();
    if trailing.ends_with(WRAPPING_QUOTES) {
        trailing.trim_end_matches(WRAPPING_QUOTES).trim_end()
    } else {
        text
    }
}

/// Re-escapes raw control characters that appear inside string literals.
///
/// Repair turns `\n` into a real newline even inside JSON strings, which
/// strict JSON rejects. When the control character directly follows a
/// backslash, that backslash was a doubled escape and stays literal.
fn escape_controls_in_strings(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut in_string = false;
    let mut escaped = false;

    for c in text.chars() {
        if !in_string {
            if c == '"' {
                in_string = true;
            }
            out.push(c);
            continue;
        }

        if (c as u32) < 0x20 {
            push_control_escape(&mut out, c);
            escaped = false;
        } else if escaped {
            out.push(c);
            escaped = false;
        } else if c == '\\' {
            out.push(c);
            escaped = true;
        } else {
            if c == '"' {
                in_string = false;
            }
            out.push(c);
        }
    }

    out
}

fn push_control_escape(out: &mut String, c: char) {
    match c {
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        other => out.push_str(&format!("\\u{:04x}", other as u32)),
    }
}
