//! Reverses escaping artifacts that AI responses carry into plain text.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static SHORT_UNICODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\u00([0-9A-Fa-f]{2})").expect("short unicode regex"));

// A high surrogate may be followed by its low half; both are decoded together.
static LONG_UNICODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\u([0-9A-Fa-f]{4})(\\u[dD][c-fC-F][0-9A-Fa-f]{2})?").expect("unicode regex")
});

/// Replaces literal escape sequences with the characters they stand for.
///
/// Sequences are handled in a fixed order: `\r`, `\n`, `\t`, `\"`, `\'`,
/// `\u00XX`, then `\uXXXX`. Anything that does not decode (lone surrogates,
/// short hex runs) is left as-is. The pass repeats until the text stops
/// changing, so `repair_text(repair_text(s)) == repair_text(s)` for every `s`.
pub fn repair_text(input: &str) -> String {
    let mut current = input.to_string();
    loop {
        let next = repair_once(&current);
        // Every replacement shortens the text, so this terminates.
        if next == current {
            return current;
        }
        current = next;
    }
}

fn repair_once(input: &str) -> String {
    let text = input
        .replace("\\r", "\r")
        .replace("\\n", "\n")
        .replace("\\t", "\t")
        .replace("\\\"", "\"")
        .replace("\\'", "'");

    let text = SHORT_UNICODE.replace_all(&text, |caps: &Captures| {
        u32::from_str_radix(&caps[1], 16)
            .ok()
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| caps[0].to_string())
    });

    LONG_UNICODE
        .replace_all(&text, |caps: &Captures| decode_unicode(caps))
        .into_owned()
}

fn decode_unicode(caps: &Captures) -> String {
    let first = match u32::from_str_radix(&caps[1], 16) {
        Ok(code) => code,
        Err(_) => return caps[0].to_string(),
    };
    let trailing = caps.get(2).map(|m| m.as_str());

    if (0xD800..0xDC00).contains(&first) {
        if let Some(low_escape) = trailing {
            let low = u32::from_str_radix(&low_escape[2..], 16).unwrap_or(0);
            let combined = 0x10000 + ((first - 0xD800) << 10) + (low - 0xDC00);
            if let Some(c) = char::from_u32(combined) {
                return c.to_string();
            }
        }
        return caps[0].to_string();
    }

    let mut out = match char::from_u32(first) {
        Some(c) => c.to_string(),
        None => format!("\\u{}", &caps[1]),
    };
    if let Some(low_escape) = trailing {
        // A low surrogate after a regular character stays literal.
        out.push_str(low_escape);
    }
    out
}
