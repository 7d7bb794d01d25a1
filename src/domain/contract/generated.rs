//! Canonical contract record produced by every generation path.

use serde::{Deserialize, Serialize};

/// Severity of a single risk finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RiskLevel {
    High,
    #[default]
    Medium,
    Low,
}

impl RiskLevel {
    /// Maps an English or Turkish severity word onto a level.
    ///
    /// Unknown words fall back to `Medium`.
    pub fn parse_lenient(word: &str) -> Self {
        let word = word.trim().to_lowercase();
        match word.as_str() {
            "high" | "yüksek" | "yuksek" => RiskLevel::High,
            "medium" | "orta" => RiskLevel::Medium,
            "low" | "düşük" | "dusuk" => RiskLevel::Low,
            w if w.starts_with("mini") => RiskLevel::Low,
            _ => RiskLevel::Medium,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::High => "High",
            RiskLevel::Medium => "Medium",
            RiskLevel::Low => "Low",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the risk analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskItem {
    pub level: RiskLevel,
    pub description: String,
}

impl RiskItem {
    pub fn new(level: RiskLevel, description: impl Into<String>) -> Self {
        Self {
            level,
            description: description.into(),
        }
    }
}

/// The three-field record rendered, exported and stored downstream.
///
/// Invariants upheld by every constructor in this crate:
/// `contract` is non-empty, `summary` and `risk_analysis` have at least
/// one entry, and every risk description is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContract {
    pub contract: String,
    pub summary: Vec<String>,
    pub risk_analysis: Vec<RiskItem>,
}

impl GeneratedContract {
    /// Returns true when the structural invariants hold.
    pub fn is_well_formed(&self) -> bool {
        !self.contract.trim().is_empty()
            && !self.summary.is_empty()
            && !self.risk_analysis.is_empty()
            && self
                .risk_analysis
                .iter()
                .all(|r| !r.description.trim().is_empty())
    }
}

/// Which step of the generation pipeline produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStage {
    /// No AI credential; the record was filled from the request fields.
    OfflineTemplate,
    /// JSON found by candidate extraction on the raw response.
    ExtractedJson,
    /// The whole raw response parsed as JSON.
    WholeResponseJson,
    /// JSON found after repairing escape artifacts in the raw response.
    RepairedExtractedJson,
    /// Heuristic markdown/prose parsing.
    PlainText,
    /// The AI call itself failed.
    UpstreamFailure,
}

/// A generated record together with the stage that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutcome {
    pub contract: GeneratedContract,
    pub stage: ResolutionStage,
}

impl GenerationOutcome {
    pub fn new(contract: GeneratedContract, stage: ResolutionStage) -> Self {
        Self { contract, stage }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_level_parses_both_languages() {
        assert_eq!(RiskLevel::parse_lenient("High"), RiskLevel::High);
        assert_eq!(RiskLevel::parse_lenient("YÜKSEK"), RiskLevel::High);
        assert_eq!(RiskLevel::parse_lenient("orta"), RiskLevel::Medium);
        assert_eq!(RiskLevel::parse_lenient("Mini"), RiskLevel::Low);
        assert_eq!(RiskLevel::parse_lenient("Minimal"), RiskLevel::Low);
        assert_eq!(RiskLevel::parse_lenient("Düşük"), RiskLevel::Low);
        assert_eq!(RiskLevel::parse_lenient(" low "), RiskLevel::Low);
    }

    #[test]
    fn unknown_risk_level_defaults_to_medium() {
        assert_eq!(RiskLevel::parse_lenient("critical"), RiskLevel::Medium);
        assert_eq!(RiskLevel::parse_lenient(""), RiskLevel::Medium);
    }

    #[test]
    fn generated_contract_uses_camel_case_keys() {
        let record = GeneratedContract {
            contract: "X".to_string(),
            summary: vec!["a".to_string()],
            risk_analysis: vec![RiskItem::new(RiskLevel::High, "d")],
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["contract"], "X");
        assert_eq!(json["summary"][0], "a");
        assert_eq!(json["riskAnalysis"][0]["level"], "High");
        assert_eq!(json["riskAnalysis"][0]["description"], "d");
    }

    #[test]
    fn well_formed_rejects_empty_fields() {
        let mut record = GeneratedContract {
            contract: "X".to_string(),
            summary: vec!["a".to_string()],
            risk_analysis: vec![RiskItem::new(RiskLevel::Low, "d")],
        };
        assert!(record.is_well_formed());

        record.summary.clear();
        assert!(!record.is_well_formed());
    }
}
