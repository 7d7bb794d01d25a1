//! Converts a parsed AI response into the canonical record.
//!
//! `normalize` is the only place where a [`ParsedResponse`] becomes a
//! [`GeneratedContract`]. Missing or malformed fields degrade to fixed
//! placeholders; nothing here fails.

use serde_json::{Map, Value};

use super::generated::{GeneratedContract, RiskItem, RiskLevel};
use super::language::Locale;
use super::plain_text::parse_plain_text;
use super::repair::repair_text;
use super::templates::messages;

const CONTRACT_KEYS: &[&str] = &["contract", "text", "content"];
const SUMMARY_KEY: &str = "summary";
const RISK_KEYS: &[&str] = &["riskAnalysis", "risk_analysis"];

/// Outcome of interpreting an AI response.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedResponse {
    /// JSON with at least one recognizable contract field.
    Recognized(RecognizedFields),
    /// Anything else; handled as prose.
    Unrecognized(String),
}

/// Raw values of the fields the normalizer understands.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecognizedFields {
    /// First non-null of `contract`, `text`, `content`.
    pub contract: Option<Value>,
    pub summary: Option<Value>,
    pub risk_analysis: Option<Value>,
}

impl RecognizedFields {
    /// Accepts a JSON object whose `contract`, `summary` or `riskAnalysis`
    /// is truthy (not null, false, zero or an empty string).
    pub fn recognize(value: Value) -> Option<Self> {
        let Value::Object(mut map) = value else {
            return None;
        };

        let accepted = std::iter::once("contract")
            .chain(std::iter::once(SUMMARY_KEY))
            .chain(RISK_KEYS.iter().copied())
            .any(|key| map.get(key).is_some_and(is_truthy));
        if !accepted {
            return None;
        }

        Some(Self {
            contract: take_first_present(&mut map, CONTRACT_KEYS),
            summary: take_first_present(&mut map, &[SUMMARY_KEY]),
            risk_analysis: take_first_present(&mut map, RISK_KEYS),
        })
    }
}

fn take_first_present(map: &mut Map<String, Value>, keys: &[&str]) -> Option<Value> {
    keys.iter()
        .find_map(|key| map.remove(*key).filter(|v| !v.is_null()))
}

/// JavaScript-style truthiness, used to decide whether a field "exists".
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Stringifies a JSON value the way it should appear in display text.
fn display_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

/// Produces the canonical record for any parsed response.
pub fn normalize(parsed: ParsedResponse, locale: Locale) -> GeneratedContract {
    match parsed {
        ParsedResponse::Recognized(fields) => normalize_fields(fields, locale),
        ParsedResponse::Unrecognized(text) => parse_plain_text(&text, locale),
    }
}

fn normalize_fields(fields: RecognizedFields, locale: Locale) -> GeneratedContract {
    GeneratedContract {
        contract: normalize_contract(fields.contract, locale),
        summary: normalize_summary(fields.summary, locale),
        risk_analysis: normalize_risks(fields.risk_analysis, locale),
    }
}

fn normalize_contract(value: Option<Value>, locale: Locale) -> String {
    let text = match value {
        None => String::new(),
        Some(Value::String(s)) => {
            let repaired = repair_text(&s);
            strip_wrapping_double_quotes(repaired.trim()).trim().to_string()
        }
        Some(other) => other.to_string(),
    };

    if text.is_empty() {
        messages(locale).contract_unavailable.to_string()
    } else {
        text
    }
}

fn strip_wrapping_double_quotes(text: &str) -> &str {
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        &text[1..text.len() - 1]
    } else {
        text
    }
}

fn normalize_summary(value: Option<Value>, locale: Locale) -> Vec<String> {
    let items: Vec<String> = match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(display_text)
            .filter(|item| !item.is_empty())
            .collect(),
        Some(scalar) if is_truthy(&scalar) => {
            let text = display_text(&scalar);
            if text.is_empty() {
                Vec::new()
            } else {
                vec![text]
            }
        }
        _ => Vec::new(),
    };

    if items.is_empty() {
        vec![messages(locale).summary_not_found.to_string()]
    } else {
        items
    }
}

fn normalize_risks(value: Option<Value>, locale: Locale) -> Vec<RiskItem> {
    let items: Vec<RiskItem> = match value {
        Some(Value::Array(items)) => items.iter().filter_map(risk_from_value).collect(),
        _ => Vec::new(),
    };

    if items.is_empty() {
        vec![RiskItem::new(
            RiskLevel::Medium,
            messages(locale).risk_not_found,
        )]
    } else {
        items
    }
}

fn risk_from_value(item: &Value) -> Option<RiskItem> {
    let level = item
        .get("level")
        .filter(|v| !v.is_null())
        .map(|v| RiskLevel::parse_lenient(&display_text(v)))
        .unwrap_or_default();

    let description = match item.get("description").filter(|v| !v.is_null()) {
        Some(description) => display_text(description),
        None => display_text(item),
    };

    if description.is_empty() {
        None
    } else {
        Some(RiskItem::new(level, description))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn recognized(value: Value) -> ParsedResponse {
        ParsedResponse::Recognized(RecognizedFields::recognize(value).expect("recognized"))
    }

    #[test]
    fn canonical_json_round_trips() {
        let parsed = recognized(json!({
            "contract": "# Sözleşme\n\nMadde 1",
            "summary": ["a", "b"],
            "riskAnalysis": [{"level": "High", "description": "d"}]
        }));

        let record = normalize(parsed, Locale::Turkish);
        assert_eq!(record.contract, "# Sözleşme\n\nMadde 1");
        assert_eq!(record.summary, vec!["a", "b"]);
        assert_eq!(record.risk_analysis, vec![RiskItem::new(RiskLevel::High, "d")]);
    }

    #[test]
    fn recognition_requires_a_truthy_known_field() {
        assert!(RecognizedFields::recognize(json!({"other": 1})).is_none());
        assert!(RecognizedFields::recognize(json!({"contract": ""})).is_none());
        assert!(RecognizedFields::recognize(json!({"summary": null})).is_none());
        assert!(RecognizedFields::recognize(json!(["contract"])).is_none());
        assert!(RecognizedFields::recognize(json!("contract")).is_none());
        assert!(RecognizedFields::recognize(json!({"summary": []})).is_some());
        assert!(RecognizedFields::recognize(json!({"risk_analysis": [{}]})).is_some());
    }

    #[test]
    fn contract_falls_back_to_text_then_content() {
        let record = normalize(
            recognized(json!({"summary": "s", "text": "from text", "content": "from content"})),
            Locale::English,
        );
        assert_eq!(record.contract, "from text");

        let record = normalize(
            recognized(json!({"summary": "s", "contract": null, "content": "from content"})),
            Locale::English,
        );
        assert_eq!(record.contract, "from content");
    }

    #[test]
    fn contract_is_repaired_and_unquoted() {
        let record = normalize(
            recognized(json!({"contract": "\"Line 1\\nLine 2\""})),
            Locale::English,
        );
        assert_eq!(record.contract, "Line 1\nLine 2");
    }

    #[test]
    fn non_text_contract_is_serialized() {
        let record = normalize(
            recognized(json!({"contract": {"title": "T"}})),
            Locale::English,
        );
        assert_eq!(record.contract, r#"{"title":"T"}"#);
    }

    #[test]
    fn missing_contract_gets_placeholder() {
        let record = normalize(recognized(json!({"summary": ["a"]})), Locale::English);
        assert_eq!(record.contract, "The contract text could not be generated.");
        assert!(record.is_well_formed());
    }

    #[test]
    fn scalar_summary_is_wrapped() {
        let record = normalize(
            recognized(json!({"contract": "c", "summary": "single"})),
            Locale::English,
        );
        assert_eq!(record.summary, vec!["single"]);
    }

    #[test]
    fn summary_elements_are_stringified() {
        let record = normalize(
            recognized(json!({"contract": "c", "summary": ["a", 2, null, "  ", {"k": 1}]})),
            Locale::English,
        );
        assert_eq!(record.summary, vec!["a", "2", r#"{"k":1}"#]);
    }

    #[test]
    fn empty_summary_gets_placeholder() {
        let record = normalize(
            recognized(json!({"contract": "c", "summary": []})),
            Locale::Turkish,
        );
        assert_eq!(record.summary, vec!["Özet bulunamadı"]);
    }

    #[test]
    fn risk_entries_are_coerced() {
        let record = normalize(
            recognized(json!({
                "contract": "c",
                "riskAnalysis": [
                    {"level": "HIGH", "description": "late"},
                    {"description": "no level"},
                    {"level": "critical", "description": "odd level"},
                    "bare string risk",
                    {"level": "Low", "description": ""}
                ]
            })),
            Locale::English,
        );

        assert_eq!(
            record.risk_analysis,
            vec![
                RiskItem::new(RiskLevel::High, "late"),
                RiskItem::new(RiskLevel::Medium, "no level"),
                RiskItem::new(RiskLevel::Medium, "odd level"),
                RiskItem::new(RiskLevel::Medium, "bare string risk"),
            ]
        );
    }

    #[test]
    fn non_array_risks_get_placeholder() {
        let record = normalize(
            recognized(json!({"contract": "c", "riskAnalysis": {"level": "High"}})),
            Locale::Turkish,
        );
        assert_eq!(
            record.risk_analysis,
            vec![RiskItem::new(RiskLevel::Medium, "Risk analizi yok")]
        );
    }

    #[test]
    fn unrecognized_goes_through_plain_text_parser() {
        let record = normalize(
            ParsedResponse::Unrecognized("## SUMMARY\n- x\n## RISK\nHigh: y".to_string()),
            Locale::English,
        );
        assert_eq!(record.summary, vec!["x"]);
        assert_eq!(record.risk_analysis[0].level, RiskLevel::High);
    }
}
