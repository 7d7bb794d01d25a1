//! PublishContractHandler - export, pin and anchor a contract in one go.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use super::export_contract::{ExportContractCommand, ExportContractHandler};
use super::upload_document::{UploadDocumentCommand, UploadDocumentHandler, UploadError, UploadedDocument};
use crate::application::handlers::anchoring::{AnchorError, AnchorReceipt, AnchorService};
use crate::ports::{ExportError, ExportFormat};

/// Pipeline steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishStep {
    Export,
    Upload,
    Anchor,
}

/// Command to publish a contract.
#[derive(Debug, Clone)]
pub struct PublishContractCommand {
    pub contract: String,
    pub format: ExportFormat,
}

/// Everything produced by a successful publish.
#[derive(Debug, Clone, Serialize)]
pub struct PublishedContract {
    pub filename: String,
    pub document: UploadedDocument,
    pub receipt: AnchorReceipt,
}

/// Failure of one pipeline step. Later steps did not run.
#[derive(Debug, Clone, Error)]
pub enum PublishError {
    #[error("export failed: {0}")]
    Export(#[from] ExportError),

    #[error("upload failed: {0}")]
    Upload(#[from] UploadError),

    #[error("anchoring failed: {0}")]
    Anchor(#[from] AnchorError),
}

impl PublishError {
    pub fn step(&self) -> PublishStep {
        match self {
            PublishError::Export(_) => PublishStep::Export,
            PublishError::Upload(_) => PublishStep::Upload,
            PublishError::Anchor(_) => PublishStep::Anchor,
        }
    }
}

/// Handler running export, upload and anchoring in sequence.
pub struct PublishContractHandler {
    export: ExportContractHandler,
    upload: UploadDocumentHandler,
    anchor: Arc<AnchorService>,
}

impl PublishContractHandler {
    pub fn new(
        export: ExportContractHandler,
        upload: UploadDocumentHandler,
        anchor: Arc<AnchorService>,
    ) -> Self {
        Self {
            export,
            upload,
            anchor,
        }
    }

    pub async fn handle(&self, cmd: PublishContractCommand) -> Result<PublishedContract, PublishError> {
        let exported = self
            .export
            .handle(ExportContractCommand {
                contract: cmd.contract,
                format: cmd.format,
            })
            .await?;
        let filename = exported.filename.clone();

        let document = self
            .upload
            .handle(UploadDocumentCommand {
                filename: exported.filename,
                bytes: exported.content,
            })
            .await?;

        let receipt = self.anchor.anchor(&document.cid).await?;

        tracing::info!(
            filename = %filename,
            cid = %document.cid,
            tx_id = %receipt.tx_id,
            "contract published"
        );

        Ok(PublishedContract {
            filename,
            document,
            receipt,
        })
    }
}
