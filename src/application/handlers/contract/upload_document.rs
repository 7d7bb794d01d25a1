//! UploadDocumentHandler - validates a document and pins it to content storage.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::domain::anchoring::{ContentId, DocumentDigest};
use crate::ports::{ContentStorage, StorageError};

/// Upload limit when none is configured: 20 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 20 * 1024 * 1024;

/// Extensions accepted for upload.
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "html", "md"];

/// Command to upload a document.
#[derive(Debug, Clone)]
pub struct UploadDocumentCommand {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// A pinned document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedDocument {
    pub cid: ContentId,
    pub sha256: DocumentDigest,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, Error)]
pub enum UploadError {
    #[error("document is empty")]
    Empty,

    #[error("unsupported file type: {0}")]
    UnsupportedExtension(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Handler for document uploads.
#[derive(Clone)]
pub struct UploadDocumentHandler {
    storage: Arc<dyn ContentStorage>,
    max_bytes: u64,
}

impl UploadDocumentHandler {
    pub fn new(storage: Arc<dyn ContentStorage>) -> Self {
        Self {
            storage,
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub async fn handle(&self, cmd: UploadDocumentCommand) -> Result<UploadedDocument, UploadError> {
        let size_bytes = cmd.bytes.len() as u64;
        if size_bytes == 0 {
            return Err(UploadError::Empty);
        }
        if size_bytes > self.max_bytes {
            return Err(StorageError::file_too_large(size_bytes, self.max_bytes).into());
        }

        let extension = Path::new(&cmd.filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(UploadError::UnsupportedExtension(cmd.filename));
        }

        let sha256 = DocumentDigest::of(&cmd.bytes);
        let cid = self.storage.upload(cmd.bytes, &cmd.filename).await?;

        tracing::info!(cid = %cid, sha256 = %sha256, size_bytes, "document pinned");

        Ok(UploadedDocument {
            cid,
            sha256,
            size_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryContentStorage;

    fn command(filename: &str, bytes: &[u8]) -> UploadDocumentCommand {
        UploadDocumentCommand {
            filename: filename.to_string(),
            bytes: bytes.to_vec(),
        }
    }

    #[tokio::test]
    async fn uploads_and_reports_digest() {
        let storage = InMemoryContentStorage::new();
        let handler = UploadDocumentHandler::new(Arc::new(storage.clone()));

        let uploaded = handler.handle(command("contract.pdf", b"%PDF-1.7")).await.unwrap();

        assert_eq!(uploaded.size_bytes, 8);
        assert_eq!(uploaded.sha256, DocumentDigest::of(b"%PDF-1.7"));
        assert!(uploaded.cid.as_str().starts_with("ipfs://"));
        assert_eq!(storage.object_count().await, 1);
    }

    #[tokio::test]
    async fn empty_document_is_rejected() {
        let storage = InMemoryContentStorage::new();
        let handler = UploadDocumentHandler::new(Arc::new(storage.clone()));

        assert!(matches!(
            handler.handle(command("contract.pdf", b"")).await,
            Err(UploadError::Empty)
        ));
        assert_eq!(storage.object_count().await, 0);
    }

    #[tokio::test]
    async fn oversized_document_is_rejected() {
        let handler =
            UploadDocumentHandler::new(Arc::new(InMemoryContentStorage::new())).with_max_bytes(4);

        let result = handler.handle(command("contract.pdf", b"12345")).await;

        assert!(matches!(
            result,
            Err(UploadError::Storage(StorageError::FileTooLarge {
                size_bytes: 5,
                max_bytes: 4
            }))
        ));
    }

    #[tokio::test]
    async fn extension_is_checked_case_insensitively() {
        let handler = UploadDocumentHandler::new(Arc::new(InMemoryContentStorage::new()));

        assert!(handler.handle(command("CONTRACT.HTML", b"<p>")).await.is_ok());
        assert!(matches!(
            handler.handle(command("payload.exe", b"MZ")).await,
            Err(UploadError::UnsupportedExtension(name)) if name == "payload.exe"
        ));
        assert!(matches!(
            handler.handle(command("noext", b"x")).await,
            Err(UploadError::UnsupportedExtension(_))
        ));
    }

    #[tokio::test]
    async fn storage_failure_is_propagated() {
        let storage = InMemoryContentStorage::failing_with(StorageError::AuthenticationFailed);
        let handler = UploadDocumentHandler::new(Arc::new(storage));

        assert!(matches!(
            handler.handle(command("a.md", b"# A")).await,
            Err(UploadError::Storage(StorageError::AuthenticationFailed))
        ));
    }
}
