//! API error type shared by all HTTP modules.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::application::handlers::UploadError;
use crate::domain::foundation::ValidationError;
use crate::ports::{ExportError, LedgerError, StorageError};

// ════════════════════════════════════════════════════════════════════════════════
// Error Response DTO
// ════════════════════════════════════════════════════════════════════════════════

/// Standard error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Mapping
// ════════════════════════════════════════════════════════════════════════════════

/// Errors surfaced by HTTP handlers.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    /// Request body exceeded the route's body limit.
    PayloadTooLarge(String),
    Export(ExportError),
    Upload(UploadError),
    Storage(StorageError),
    Ledger(LedgerError),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "FILE_TOO_LARGE"),
            ApiError::Export(err) => match err {
                ExportError::InvalidInput(_) | ExportError::UnsupportedFormat(_) => {
                    (StatusCode::BAD_REQUEST, "INVALID_DOCUMENT")
                }
                ExportError::ServiceUnavailable(_) => {
                    (StatusCode::SERVICE_UNAVAILABLE, "EXPORT_UNAVAILABLE")
                }
                ExportError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, "EXPORT_TIMEOUT"),
                _ => (StatusCode::INTERNAL_SERVER_ERROR, "EXPORT_FAILED"),
            },
            ApiError::Upload(UploadError::Storage(err)) | ApiError::Storage(err) => {
                storage_status(err)
            }
            ApiError::Upload(_) => (StatusCode::BAD_REQUEST, "INVALID_UPLOAD"),
            ApiError::Ledger(err) => match err {
                LedgerError::Rejected(_) => (StatusCode::BAD_REQUEST, "TRANSACTION_REJECTED"),
                LedgerError::Node { status, .. } if (400..500).contains(status) => {
                    (StatusCode::BAD_REQUEST, "TRANSACTION_REJECTED")
                }
                LedgerError::ConfirmationTimeout { .. } => {
                    (StatusCode::GATEWAY_TIMEOUT, "CONFIRMATION_TIMEOUT")
                }
                _ => (StatusCode::BAD_GATEWAY, "LEDGER_UNAVAILABLE"),
            },
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::BadRequest(message) | ApiError::PayloadTooLarge(message) => message.clone(),
            ApiError::Export(err) => err.to_string(),
            ApiError::Upload(err) => err.to_string(),
            ApiError::Storage(err) => err.to_string(),
            ApiError::Ledger(err) => err.to_string(),
        }
    }
}

fn storage_status(err: &StorageError) -> (StatusCode, &'static str) {
    match err {
        StorageError::FileTooLarge { .. } => (StatusCode::PAYLOAD_TOO_LARGE, "FILE_TOO_LARGE"),
        StorageError::AuthenticationFailed => (StatusCode::BAD_GATEWAY, "STORAGE_AUTH_FAILED"),
        _ => (StatusCode::BAD_GATEWAY, "STORAGE_ERROR"),
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge(rejection.body_text())
        } else {
            Self::BadRequest(rejection.body_text())
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        Self::Export(err)
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        Self::Upload(err)
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        Self::Storage(err)
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        Self::Ledger(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = self.message();

        if status.is_server_error() {
            tracing::error!(code, %message, "request failed");
        } else {
            tracing::debug!(code, %message, "request rejected");
        }

        (status, Json(ErrorResponse::new(code, message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_request_maps_to_400() {
        let response = ApiError::bad_request("nope").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn oversized_upload_maps_to_413() {
        let err = ApiError::Upload(UploadError::Storage(StorageError::file_too_large(10, 5)));
        assert_eq!(err.into_response().status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn empty_upload_maps_to_400() {
        let err = ApiError::Upload(UploadError::Empty);
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn ledger_errors_split_client_and_gateway() {
        let rejected = ApiError::Ledger(LedgerError::node(400, "overspend"));
        assert_eq!(rejected.into_response().status(), StatusCode::BAD_REQUEST);

        let down = ApiError::Ledger(LedgerError::node(503, "unavailable"));
        assert_eq!(down.into_response().status(), StatusCode::BAD_GATEWAY);

        let network = ApiError::Ledger(LedgerError::network("refused"));
        assert_eq!(network.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn export_service_missing_maps_to_503() {
        let err = ApiError::Export(ExportError::service_unavailable("pandoc not found"));
        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn storage_errors_map_to_gateway_codes() {
        let (status, code) = storage_status(&StorageError::AuthenticationFailed);
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(code, "STORAGE_AUTH_FAILED");

        let (status, code) = storage_status(&StorageError::rejected(500, "pin failed"));
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(code, "STORAGE_ERROR");

        let (status, _) = storage_status(&StorageError::file_too_large(10, 5));
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }
}
