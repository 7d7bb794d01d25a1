//! ExportContractHandler - renders contract markdown into a downloadable file.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::ports::{DocumentExportService, ExportError, ExportFormat, ExportedDocument};

/// Command to export a contract.
#[derive(Debug, Clone)]
pub struct ExportContractCommand {
    /// Contract markdown.
    pub contract: String,
    pub format: ExportFormat,
}

impl ExportContractCommand {
    pub fn pdf(contract: impl Into<String>) -> Self {
        Self {
            contract: contract.into(),
            format: ExportFormat::Pdf,
        }
    }
}

/// Filename stem for an export made at `at`.
pub fn export_basename(at: DateTime<Utc>) -> String {
    format!("contract-{}", at.timestamp_millis())
}

/// Handler for contract exports.
#[derive(Clone)]
pub struct ExportContractHandler {
    exporter: Arc<dyn DocumentExportService>,
}

impl ExportContractHandler {
    pub fn new(exporter: Arc<dyn DocumentExportService>) -> Self {
        Self { exporter }
    }

    pub async fn handle(&self, cmd: ExportContractCommand) -> Result<ExportedDocument, ExportError> {
        if cmd.contract.trim().is_empty() {
            return Err(ExportError::InvalidInput("contract text is empty".to_string()));
        }

        let content = match cmd.format {
            ExportFormat::Pdf => self.exporter.to_pdf(&cmd.contract).await?,
            ExportFormat::Html => self.exporter.to_html(&cmd.contract).await?.into_bytes(),
            ExportFormat::Markdown => cmd.contract.into_bytes(),
        };

        let document = ExportedDocument::new(content, cmd.format, &export_basename(Utc::now()));
        tracing::debug!(
            filename = %document.filename,
            size_bytes = document.size_bytes(),
            "contract exported"
        );
        Ok(document)
    }
}
