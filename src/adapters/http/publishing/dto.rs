//! Data Transfer Objects for storage and ledger endpoints.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::application::handlers::UploadedDocument;
use crate::domain::anchoring::{ContentId, UnsignedTransaction};
use crate::domain::foundation::ValidationError;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to pin a document.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadRequest {
    pub filename: String,
    /// Document bytes, standard base64.
    pub content_base64: String,
}

/// Request to build an anchor transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildAnchorRequest {
    pub sender: String,
    /// `ipfs://<hash>` or the bare hash.
    pub cid: String,
}

impl BuildAnchorRequest {
    pub fn content_id(&self) -> Result<ContentId, ValidationError> {
        let cid = self.cid.trim();
        if cid.starts_with(ContentId::SCHEME) {
            ContentId::new(cid)
        } else {
            ContentId::from_hash(cid)
        }
    }
}

/// Request to broadcast wallet-signed transactions.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitRequest {
    /// Signed transactions, standard base64, in group order.
    pub signed_b64: Vec<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    pub cid: String,
    pub sha256: String,
    pub size_bytes: u64,
}

impl From<UploadedDocument> for UploadResponse {
    fn from(doc: UploadedDocument) -> Self {
        Self {
            cid: doc.cid.to_string(),
            sha256: doc.sha256.to_string(),
            size_bytes: doc.size_bytes,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self { status: "ok" }
    }
}

/// Unsigned transaction handed to the browser wallet.
#[derive(Debug, Clone, Serialize)]
pub struct UnsignedTransactionResponse {
    pub sender: String,
    pub receiver: String,
    pub amount: u64,
    pub fee: u64,
    pub first_valid: u64,
    pub last_valid: u64,
    pub genesis_id: String,
    pub genesis_hash: String,
    /// Note bytes, standard base64.
    pub note: String,
}

impl From<UnsignedTransaction> for UnsignedTransactionResponse {
    fn from(tx: UnsignedTransaction) -> Self {
        Self {
            sender: tx.sender.to_string(),
            receiver: tx.receiver.to_string(),
            amount: tx.amount,
            fee: tx.fee,
            first_valid: tx.first_valid,
            last_valid: tx.last_valid,
            genesis_id: tx.genesis_id,
            genesis_hash: tx.genesis_hash,
            note: STANDARD.encode(&tx.note),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitResponse {
    pub tx_id: String,
}
