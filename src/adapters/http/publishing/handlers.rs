//! HTTP handlers for storage and ledger endpoints.
//!
//! Signing happens in the browser wallet: the server builds unsigned
//! transactions and relays signed ones to the node.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::application::handlers::{UploadDocumentCommand, UploadDocumentHandler};
use crate::domain::anchoring::{SignedTransaction, UnsignedTransaction, WalletAddress};
use crate::ports::{ContentStorage, LedgerClient};

use super::super::error::ApiError;
use super::dto::{
    BuildAnchorRequest, StatusResponse, SubmitRequest, SubmitResponse,
    UnsignedTransactionResponse, UploadRequest, UploadResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for storage and ledger endpoints.
#[derive(Clone)]
pub struct PublishingAppState {
    pub storage: Arc<dyn ContentStorage>,
    pub ledger: Arc<dyn LedgerClient>,
    pub max_upload_bytes: u64,
}

impl PublishingAppState {
    pub fn new(
        storage: Arc<dyn ContentStorage>,
        ledger: Arc<dyn LedgerClient>,
        max_upload_bytes: u64,
    ) -> Self {
        Self {
            storage,
            ledger,
            max_upload_bytes,
        }
    }

    pub fn upload_handler(&self) -> UploadDocumentHandler {
        UploadDocumentHandler::new(self.storage.clone()).with_max_bytes(self.max_upload_bytes)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Storage
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/storage/upload - Pin a document
pub async fn upload_document(
    State(state): State<PublishingAppState>,
    payload: Result<Json<UploadRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    let bytes = STANDARD
        .decode(request.content_base64.trim())
        .map_err(|e| ApiError::bad_request(format!("content_base64 is not valid base64: {}", e)))?;

    let uploaded = state
        .upload_handler()
        .handle(UploadDocumentCommand {
            filename: request.filename,
            bytes,
        })
        .await?;

    Ok(Json(UploadResponse::from(uploaded)))
}

/// GET /api/storage/health - Check the pinning service credentials
pub async fn storage_health(
    State(state): State<PublishingAppState>,
) -> Result<impl IntoResponse, ApiError> {
    state.storage.check_authentication().await?;
    Ok(Json(StatusResponse::ok()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Ledger
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/ledger/anchor/build - Build an unsigned anchor transaction
pub async fn build_anchor_transaction(
    State(state): State<PublishingAppState>,
    payload: Result<Json<BuildAnchorRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    let sender = WalletAddress::new(request.sender.trim())?;
    let content_id = request.content_id()?;

    let params = state.ledger.suggested_params().await?;
    let transaction = UnsignedTransaction::anchor(&sender, &content_id, &params);

    Ok(Json(UnsignedTransactionResponse::from(transaction)))
}

/// POST /api/ledger/submit - Broadcast wallet-signed transactions
///
/// Group members are concatenated in the order given, which is the wire
/// form the node expects.
pub async fn submit_transaction(
    State(state): State<PublishingAppState>,
    payload: Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    if request.signed_b64.is_empty() {
        return Err(ApiError::bad_request("signed_b64 must not be empty"));
    }

    let mut raw = Vec::new();
    for (index, encoded) in request.signed_b64.iter().enumerate() {
        let bytes = STANDARD.decode(encoded.trim()).map_err(|e| {
            ApiError::bad_request(format!("signed_b64[{}] is not valid base64: {}", index, e))
        })?;
        raw.extend(bytes);
    }

    let tx_id = state
        .ledger
        .submit_transaction(&SignedTransaction::new(raw))
        .await?;
    tracing::info!(tx_id = %tx_id, group_size = request.signed_b64.len(), "transaction submitted");

    Ok(Json(SubmitResponse {
        tx_id: tx_id.to_string(),
    }))
}
