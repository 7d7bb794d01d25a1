//! Contract generation request.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A contracting party as entered by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    /// Postal or wallet address. May be empty.
    #[serde(default)]
    pub address: String,
}

impl Party {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }
}

/// Settlement currency offered by the drafting form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Currency {
    /// Turkish lira.
    #[default]
    #[serde(rename = "TL")]
    Tl,
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "EUR")]
    Eur,
    /// The ledger's native asset.
    #[serde(rename = "ALGO")]
    Algo,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Tl => "TL",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Algo => "ALGO",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Everything the user supplied for a single drafting attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractRequest {
    /// Natural-language description of the deal.
    pub description: String,
    #[serde(default)]
    pub parties: Vec<Party>,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    /// Termination notice period in days.
    #[serde(default)]
    pub termination_notice_days: Option<u32>,
}

impl ContractRequest {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            parties: Vec::new(),
            country: String::new(),
            currency: Currency::default(),
            deadline: None,
            termination_notice_days: None,
        }
    }

    pub fn with_party(mut self, party: Party) -> Self {
        self.parties.push(party);
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_termination_notice_days(mut self, days: u32) -> Self {
        self.termination_notice_days = Some(days);
        self
    }
}
