//! Axum router configuration for storage and ledger endpoints.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use super::handlers::{
    build_anchor_transaction, storage_health, submit_transaction, upload_document,
    PublishingAppState,
};

/// Room for the JSON envelope and filename around the base64 payload.
const UPLOAD_ENVELOPE_BYTES: u64 = 64 * 1024;

/// Create the publishing API router.
///
/// The upload route accepts bodies large enough to carry a base64-encoded
/// document of `max_upload_bytes`; the other routes keep axum's default.
///
/// # Routes
///
/// ## Storage
/// - `POST /api/storage/upload` - Pin a base64 document
/// - `GET /api/storage/health` - Verify pinning credentials
///
/// ## Ledger
/// - `POST /api/ledger/anchor/build` - Unsigned anchor transaction for the wallet
/// - `POST /api/ledger/submit` - Relay signed transactions to the node
pub fn publishing_router(max_upload_bytes: u64) -> Router<PublishingAppState> {
    Router::new()
        .route(
            "/api/storage/upload",
            post(upload_document)
                .layer(DefaultBodyLimit::max(upload_body_limit(max_upload_bytes))),
        )
        .route("/api/storage/health", get(storage_health))
        .route("/api/ledger/anchor/build", post(build_anchor_transaction))
        .route("/api/ledger/submit", post(submit_transaction))
}

/// Largest JSON body that can hold a document of `max_upload_bytes`.
fn upload_body_limit(max_upload_bytes: u64) -> usize {
    let encoded = max_upload_bytes.div_ceil(3).saturating_mul(4);
    usize::try_from(encoded.saturating_add(UPLOAD_ENVELOPE_BYTES)).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ledger::InMemoryLedger;
    use crate::adapters::storage::InMemoryContentStorage;
    use crate::ports::StorageError;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use std::sync::Arc;
    use tower::ServiceExt;

    const SENDER: &str = "GGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGG";

    fn app_with(storage: InMemoryContentStorage, ledger: InMemoryLedger, max: u64) -> Router {
        publishing_router(max).with_state(PublishingAppState::new(
            Arc::new(storage),
            Arc::new(ledger),
            max,
        ))
    }

    fn app() -> Router {
        app_with(InMemoryContentStorage::new(), InMemoryLedger::new(), 1024)
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn upload_returns_cid_and_digest() {
        let response = app()
            .oneshot(post_json(
                "/api/storage/upload",
                serde_json::json!({
                    "filename": "contract.pdf",
                    "content_base64": STANDARD.encode(b"%PDF-1.7 test"),
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert!(json["cid"].as_str().unwrap().starts_with("ipfs://"));
        assert_eq!(json["sha256"].as_str().unwrap().len(), 64);
        assert_eq!(json["size_bytes"], 13);
    }

    #[tokio::test]
    async fn upload_over_limit_is_413() {
        let response = app_with(InMemoryContentStorage::new(), InMemoryLedger::new(), 4)
            .oneshot(post_json(
                "/api/storage/upload",
                serde_json::json!({
                    "filename": "contract.pdf",
                    "content_base64": STANDARD.encode(b"too large"),
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn upload_rejects_bad_base64() {
        let response = app()
            .oneshot(post_json(
                "/api/storage/upload",
                serde_json::json!({"filename": "a.pdf", "content_base64": "***"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn storage_health_reflects_credentials() {
        let ok = app()
            .oneshot(Request::get("/api/storage/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(ok.status(), StatusCode::OK);
        assert_eq!(body_json(ok).await["status"], "ok");

        let failing = app_with(
            InMemoryContentStorage::failing_with(StorageError::AuthenticationFailed),
            InMemoryLedger::new(),
            1024,
        )
        .oneshot(Request::get("/api/storage/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
        assert_eq!(failing.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn build_returns_self_payment_with_note() {
        let response = app()
            .oneshot(post_json(
                "/api/ledger/anchor/build",
                serde_json::json!({"sender": SENDER, "cid": "QmAnchor"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["sender"], SENDER);
        assert_eq!(json["receiver"], SENDER);
        assert_eq!(json["amount"], 0);
        assert_eq!(json["fee"], 1000);
        assert_eq!(json["note"], STANDARD.encode("ipfs://QmAnchor"));
    }

    #[tokio::test]
    async fn build_rejects_invalid_sender() {
        let response = app()
            .oneshot(post_json(
                "/api/ledger/anchor/build",
                serde_json::json!({"sender": "short", "cid": "QmAnchor"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn submit_concatenates_group() {
        let ledger = InMemoryLedger::new();
        let response = app_with(InMemoryContentStorage::new(), ledger.clone(), 1024)
            .oneshot(post_json(
                "/api/ledger/submit",
                serde_json::json!({"signed_b64": [STANDARD.encode([1u8, 2]), STANDARD.encode([3u8])]}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let tx_id = crate::domain::anchoring::TransactionId::new(json["tx_id"].as_str().unwrap())
            .unwrap();
        let submitted = ledger.submitted(&tx_id).await.unwrap();
        assert_eq!(submitted.as_bytes(), &[1, 2, 3]);
    }

    #[tokio::test]
    async fn submit_rejects_empty_group() {
        let response = app()
            .oneshot(post_json("/api/ledger/submit", serde_json::json!({"signed_b64": []})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn submit_maps_pool_rejection_to_400() {
        let response = app_with(
            InMemoryContentStorage::new(),
            InMemoryLedger::rejecting("overspend"),
            1024,
        )
        .oneshot(post_json(
            "/api/ledger/submit",
            serde_json::json!({"signed_b64": [STANDARD.encode([9u8])]}),
        ))
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "TRANSACTION_REJECTED");
    }

    #[test]
    fn upload_body_limit_covers_base64_expansion() {
        assert_eq!(upload_body_limit(3), 4 + 64 * 1024);
        assert_eq!(upload_body_limit(4), 8 + 64 * 1024);
        assert!(upload_body_limit(20 * 1024 * 1024) > 26 * 1024 * 1024);
    }
}
