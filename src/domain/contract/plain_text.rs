//! Heuristic extraction of summary and risk sections from markdown prose.
//!
//! This is the terminal fallback of the generation pipeline and must always
//! produce a well-formed record.

use once_cell::sync::Lazy;
use regex::Regex;

use super::generated::{GeneratedContract, RiskItem, RiskLevel};
use super::language::Locale;
use super::templates::messages;

const MAX_SUMMARY_ITEMS: usize = 6;

// Section bodies run to the next level 1-3 heading or the end of the text.
static SUMMARY_SECTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)(?:^|\n)#{0,3}\s*(?:ÖZET|SUMMARY)\s*[:\-]?\s*(.*?)(?:\n#{1,3}\s|$)")
        .expect("summary section regex")
});

static RISK_SECTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?is)(?:^|\n)#{0,3}\s*(?:R[İI]SK ANAL[İI]Z[İI]|RISK ANALYSIS|R[İI]SK)\s*[:\-]?\s*(.*?)(?:\n#{1,3}\s|$)",
    )
    .expect("risk section regex")
});

static BULLET_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[-*]\s*").expect("bullet marker regex"));

static BULLET_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[-*]\s+(.+)$").expect("bullet line regex"));

// Known limitation: a bare dash separator also matches prose such as
// "Low-cost supplier".
static SEVERITY_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:[-*•]\s*|\d+[.)]\s*)?(?:\*\*)?(High|Medium|Low|Yüksek|Orta|Düşük|Mini\w*)(?:\*\*)?\s*[:\-–]\s*(?:\*\*\s*)?(.+)$",
    )
    .expect("severity line regex")
});

/// Builds a record from text that is not JSON.
pub fn parse_plain_text(text: &str, locale: Locale) -> GeneratedContract {
    let msgs = messages(locale);

    let contract = match text.trim() {
        "" => msgs.contract_unavailable.to_string(),
        trimmed => trimmed.to_string(),
    };

    let mut summary = extract_summary(text);
    if summary.is_empty() {
        summary = vec![msgs.summary_unavailable.to_string()];
    }

    let mut risk_analysis = extract_risks(text);
    if risk_analysis.is_empty() {
        risk_analysis = vec![RiskItem::new(RiskLevel::Medium, msgs.risk_unavailable)];
    }

    GeneratedContract {
        contract,
        summary,
        risk_analysis,
    }
}

fn extract_summary(text: &str) -> Vec<String> {
    let from_section: Vec<String> = SUMMARY_SECTION
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|body| {
            body.as_str()
                .lines()
                .map(|line| BULLET_MARKER.replace(line, "").trim().to_string())
                .filter(|line| !line.is_empty())
                .take(MAX_SUMMARY_ITEMS)
                .collect()
        })
        .unwrap_or_default();

    if !from_section.is_empty() {
        return from_section;
    }

    text.lines()
        .filter_map(|line| BULLET_LINE.captures(line))
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().trim().to_string()))
        .filter(|item| !item.is_empty())
        .take(MAX_SUMMARY_ITEMS)
        .collect()
}

fn extract_risks(text: &str) -> Vec<RiskItem> {
    let Some(body) = RISK_SECTION.captures(text).and_then(|caps| caps.get(1)) else {
        return Vec::new();
    };

    body.as_str()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(parse_risk_line)
        .collect()
}

fn parse_risk_line(line: &str) -> RiskItem {
    match SEVERITY_LINE.captures(line) {
        Some(caps) => {
            let description = caps[2].trim();
            if description.is_empty() {
                RiskItem::new(RiskLevel::Medium, line)
            } else {
                RiskItem::new(RiskLevel::parse_lenient(&caps[1]), description)
            }
        }
        None => RiskItem::new(RiskLevel::Medium, line),
    }
}
