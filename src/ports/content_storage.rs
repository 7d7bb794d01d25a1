//! Content Storage Port - pins documents to a content-addressed network.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::anchoring::ContentId;

/// Port for uploading documents to content-addressed storage.
///
/// The returned [`ContentId`] is what gets anchored on the ledger, so an
/// implementation must only return once the content is actually pinned.
#[async_trait]
pub trait ContentStorage: Send + Sync {
    /// Upload `bytes` under `filename` and return its content address.
    async fn upload(&self, bytes: Vec<u8>, filename: &str) -> Result<ContentId, StorageError>;

    /// Verify that the configured credentials are accepted.
    async fn check_authentication(&self) -> Result<(), StorageError>;
}

/// Errors that can occur while pinning content.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// Credential rejected by the pinning service.
    #[error("storage authentication failed")]
    AuthenticationFailed,

    /// Document exceeds the accepted size.
    #[error("file too large: {size_bytes} bytes (max: {max_bytes})")]
    FileTooLarge { size_bytes: u64, max_bytes: u64 },

    /// The pinning service answered with a non-success status.
    #[error("upload rejected with status {status}: {detail}")]
    Rejected { status: u16, detail: String },

    #[error("network error: {0}")]
    Network(String),

    /// The success response could not be understood.
    #[error("invalid storage response: {0}")]
    InvalidResponse(String),
}

impl StorageError {
    pub fn file_too_large(size_bytes: u64, max_bytes: u64) -> Self {
        Self::FileTooLarge {
            size_bytes,
            max_bytes,
        }
    }

    pub fn rejected(status: u16, detail: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            detail: detail.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }
}
