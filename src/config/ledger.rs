//! Ledger node configuration (Algod)

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;
use crate::adapters::ledger::{DEFAULT_ALGOD_URL, DEFAULT_TOKEN_HEADER};

#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Algod REST endpoint
    #[serde(default = "default_algod_url")]
    pub algod_url: String,

    /// API token; public endpoints need none
    pub algod_token: Option<Secret<String>>,

    /// Header the token is sent in
    #[serde(default = "default_token_header")]
    pub token_header: String,
}

impl LedgerConfig {
    pub fn token(&self) -> Option<&str> {
        self.algod_token
            .as_ref()
            .map(|t| t.expose_secret().as_str())
            .filter(|t| !t.is_empty())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.algod_url.starts_with("https://") && !self.algod_url.starts_with("http://") {
            return Err(ValidationError::InvalidUrl("ledger.algod_url"));
        }
        if self.token_header.trim().is_empty() {
            return Err(ValidationError::EmptyTokenHeader);
        }
        Ok(())
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            algod_url: default_algod_url(),
            algod_token: None,
            token_header: default_token_header(),
        }
    }
}

fn default_algod_url() -> String {
    DEFAULT_ALGOD_URL.to_string()
}

fn default_token_header() -> String {
    DEFAULT_TOKEN_HEADER.to_string()
}
