//! Identifiers exchanged with the storage network, the wallet and the ledger.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::domain::foundation::ValidationError;

// ════════════════════════════════════════════════════════════════════════════════
// ContentId - address of a pinned document
// ════════════════════════════════════════════════════════════════════════════════

/// Content address of a pinned document, always `ipfs://<hash>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentId(String);

impl ContentId {
    pub const SCHEME: &'static str = "ipfs://";

    /// Parses a full `ipfs://` address.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let hash = value.strip_prefix(Self::SCHEME).ok_or_else(|| {
            ValidationError::invalid_format("content_id", "must start with ipfs://")
        })?;
        Self::check_hash(hash)?;
        Ok(Self(value))
    }

    /// Builds the address from a bare hash as returned by the pinning service.
    pub fn from_hash(hash: &str) -> Result<Self, ValidationError> {
        let hash = hash.trim();
        Self::check_hash(hash)?;
        Ok(Self(format!("{}{}", Self::SCHEME, hash)))
    }

    fn check_hash(hash: &str) -> Result<(), ValidationError> {
        if hash.is_empty() {
            return Err(ValidationError::empty_field("content_id"));
        }
        if !hash.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ValidationError::invalid_format(
                "content_id",
                "hash must be alphanumeric",
            ));
        }
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The hash without the scheme.
    pub fn hash(&self) -> &str {
        &self.0[Self::SCHEME.len()..]
    }

    /// HTTP URL of the document on a public gateway.
    pub fn gateway_url(&self, gateway_base: &str) -> String {
        format!("{}/ipfs/{}", gateway_base.trim_end_matches('/'), self.hash())
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ContentId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ContentId> for String {
    fn from(id: ContentId) -> Self {
        id.0
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// DocumentDigest - SHA-256 of the uploaded bytes
// ════════════════════════════════════════════════════════════════════════════════

/// Lowercase hex SHA-256 of a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentDigest(String);

impl DocumentDigest {
    pub fn of(bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        Self(format!("{:x}", hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// WalletAddress - Algorand account address
// ════════════════════════════════════════════════════════════════════════════════

/// Base32 account address (58 characters, `A-Z` and `2-7`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WalletAddress(String);

impl WalletAddress {
    pub const LENGTH: usize = 58;

    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let value = value.trim();
        if value.is_empty() {
            return Err(ValidationError::empty_field("address"));
        }
        if value.len() != Self::LENGTH {
            return Err(ValidationError::invalid_length(
                "address",
                Self::LENGTH,
                value.len(),
            ));
        }
        if !value
            .chars()
            .all(|c| c.is_ascii_uppercase() || ('2'..='7').contains(&c))
        {
            return Err(ValidationError::invalid_format(
                "address",
                "must be base32 (A-Z, 2-7)",
            ));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for WalletAddress {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<WalletAddress> for String {
    fn from(address: WalletAddress) -> Self {
        address.0
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// TransactionId / MicroAlgos
// ════════════════════════════════════════════════════════════════════════════════

/// Ledger transaction identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("tx_id"));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Account balance in the ledger's base unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MicroAlgos(pub u64);

impl MicroAlgos {
    pub const PER_ALGO: u64 = 1_000_000;

    pub fn as_algos(&self) -> f64 {
        self.0 as f64 / Self::PER_ALGO as f64
    }
}
