//! Keyword heuristic that picks the drafting language from the user's prompt.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Language the contract is drafted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    /// Primary locale. Wins ties.
    #[default]
    #[serde(rename = "tr")]
    Turkish,
    #[serde(rename = "en")]
    English,
}

impl Locale {
    pub fn tag(&self) -> &'static str {
        match self {
            Locale::Turkish => "tr",
            Locale::English => "en",
        }
    }

    /// Name of the language as written in the language itself.
    pub fn native_name(&self) -> &'static str {
        match self {
            Locale::Turkish => "Türkçe",
            Locale::English => "English",
        }
    }
}

const SAMPLE_CHARS: usize = 500;
const KEYWORD_POINTS: u32 = 2;
const DIACRITIC_BONUS: u32 = 3;

const TURKISH_KEYWORDS: &[&str] = &[
    "ve", "ile", "taraf", "sözleşme", "teslim", "fesh", "mücbir", "fatura", "tarih", "gün",
];
const ENGLISH_KEYWORDS: &[&str] = &[
    "the", "and", "party", "agreement", "deliver", "termination", "due", "day", "contract",
];
const TURKISH_CHARS: &str = "ğıüşöçİŞĞÜÖ";

static TURKISH_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| keyword_patterns(TURKISH_KEYWORDS));
static ENGLISH_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| keyword_patterns(ENGLISH_KEYWORDS));

fn keyword_patterns(words: &[&str]) -> Vec<Regex> {
    words
        .iter()
        .map(|w| Regex::new(&format!(r"(?i)\b{}\b", regex::escape(w))).expect("keyword regex"))
        .collect()
}

fn score(sample: &str, patterns: &[Regex]) -> u32 {
    patterns
        .iter()
        .filter(|p| p.is_match(sample))
        .count() as u32
        * KEYWORD_POINTS
}

/// Classifies `text` as Turkish or English.
///
/// Only the first 500 characters are inspected. Empty input and ties
/// resolve to Turkish.
pub fn detect_language(text: &str) -> Locale {
    if text.trim().is_empty() {
        return Locale::Turkish;
    }

    let sample: String = text.chars().take(SAMPLE_CHARS).collect::<String>().to_lowercase();

    let mut turkish = score(&sample, &TURKISH_PATTERNS);
    let english = score(&sample, &ENGLISH_PATTERNS);

    if sample.chars().any(|c| TURKISH_CHARS.contains(c)) {
        turkish += DIACRITIC_BONUS;
    }

    if turkish >= english {
        Locale::Turkish
    } else {
        Locale::English
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_turkish_word_is_turkish() {
        assert_eq!(detect_language("sözleşme"), Locale::Turkish);
    }

    #[test]
    fn single_english_word_is_english() {
        assert_eq!(detect_language("agreement"), Locale::English);
    }

    #[test]
    fn empty_input_defaults_to_turkish() {
        assert_eq!(detect_language(""), Locale::Turkish);
        assert_eq!(detect_language("   "), Locale::Turkish);
    }

    #[test]
    fn tie_goes_to_turkish() {
        // "ve" and "the" score 2 each
        assert_eq!(detect_language("ve the"), Locale::Turkish);
    }

    #[test]
    fn english_sentence_is_english() {
        let prompt = "A freelance agreement between the client and the developer, due in 30 days.";
        assert_eq!(detect_language(prompt), Locale::English);
    }

    #[test]
    fn turkish_sentence_is_turkish() {
        let prompt = "Müşteri ile geliştirici arasında web sitesi teslim sözleşmesi";
        assert_eq!(detect_language(prompt), Locale::Turkish);
    }

    #[test]
    fn keywords_need_word_boundaries() {
        // "theory" and "android" contain "the"/"and" but do not match
        assert_eq!(detect_language("theory android"), Locale::Turkish);
    }

    #[test]
    fn only_leading_sample_is_scored() {
        let mut prompt = "x ".repeat(300);
        prompt.push_str("agreement contract party");
        assert_eq!(detect_language(&prompt), Locale::Turkish);
    }

    #[test]
    fn locale_tags() {
        assert_eq!(Locale::Turkish.tag(), "tr");
        assert_eq!(Locale::English.native_name(), "English");
        assert_eq!(serde_json::to_string(&Locale::English).unwrap(), "\"en\"");
    }
}
