//! Data Transfer Objects for contract endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::contract::{ContractRequest, Currency, GeneratedContract, Party, ResolutionStage};
use crate::ports::ExportFormat;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Party as sent by the drafting form.
#[derive(Debug, Clone, Deserialize)]
pub struct PartyRequest {
    pub name: String,
    #[serde(default)]
    pub address: String,
}

/// Request to draft a contract.
///
/// Mirrors the drafting form: `deadline` is `YYYY-MM-DD` or empty and
/// `termination` is a day count given as a number or a string.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContractRequest {
    #[serde(alias = "prompt")]
    pub description: String,
    #[serde(default)]
    pub parties: Vec<PartyRequest>,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub termination: Option<Value>,
}

impl GenerateContractRequest {
    /// Converts to the domain request.
    ///
    /// # Errors
    ///
    /// Returns a message when the description is blank or the deadline is
    /// not a calendar date.
    pub fn into_domain(self) -> Result<ContractRequest, String> {
        if self.description.trim().is_empty() {
            return Err("description must not be empty".to_string());
        }

        let deadline = match self.deadline.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|_| format!("deadline must be YYYY-MM-DD, got '{}'", raw))?,
            ),
        };

        Ok(ContractRequest {
            description: self.description,
            parties: self
                .parties
                .into_iter()
                .map(|p| Party::new(p.name, p.address))
                .collect(),
            country: self.country,
            currency: self.currency,
            deadline,
            termination_notice_days: self.termination.as_ref().and_then(notice_days),
        })
    }
}

/// Reads a day count from a JSON number or numeric string. Anything else
/// counts as unspecified.
fn notice_days(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Request to export contract text.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportContractRequest {
    pub contract: String,
    #[serde(default)]
    pub format: ExportFormat,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Drafted contract plus the stage that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContractResponse {
    #[serde(flatten)]
    pub contract: GeneratedContract,
    pub stage: ResolutionStage,
}
