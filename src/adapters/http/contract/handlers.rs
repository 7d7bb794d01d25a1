//! HTTP handlers for contract endpoints.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;

use crate::application::handlers::{ContractGenerator, ExportContractCommand, ExportContractHandler};
use crate::ports::DocumentExportService;

use super::super::error::ApiError;
use super::dto::{ExportContractRequest, GenerateContractRequest, GenerateContractResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for contract endpoints.
#[derive(Clone)]
pub struct ContractAppState {
    pub generator: ContractGenerator,
    pub exporter: Arc<dyn DocumentExportService>,
}

impl ContractAppState {
    pub fn new(generator: ContractGenerator, exporter: Arc<dyn DocumentExportService>) -> Self {
        Self {
            generator,
            exporter,
        }
    }

    pub fn export_handler(&self) -> ExportContractHandler {
        ExportContractHandler::new(self.exporter.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/contracts/generate - Draft a contract
///
/// Always 200 for a valid request; degraded drafts are reported through
/// `stage`, never as an error status.
pub async fn generate_contract(
    State(state): State<ContractAppState>,
    payload: Result<Json<GenerateContractRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    let request = request.into_domain().map_err(ApiError::BadRequest)?;

    let outcome = state.generator.generate_with_diagnostics(&request).await;

    Ok(Json(GenerateContractResponse {
        contract: outcome.contract,
        stage: outcome.stage,
    }))
}

/// POST /api/contracts/export - Render contract text as a file
pub async fn export_contract(
    State(state): State<ContractAppState>,
    payload: Result<Json<ExportContractRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;

    let document = state
        .export_handler()
        .handle(ExportContractCommand {
            contract: request.contract,
            format: request.format,
        })
        .await?;

    let disposition = format!("attachment; filename=\"{}\"", document.filename);
    Ok((
        [
            (header::CONTENT_TYPE, document.content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document.content,
    ))
}
