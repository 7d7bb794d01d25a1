//! Axum router configuration for contract endpoints.

use axum::{routing::post, Router};

use super::handlers::{export_contract, generate_contract, ContractAppState};

/// Create the contract API router.
///
/// # Routes
///
/// - `POST /api/contracts/generate` - Draft a contract
/// - `POST /api/contracts/export` - Download contract text as PDF, HTML or Markdown
pub fn contract_router() -> Router<ContractAppState> {
    Router::new()
        .route("/api/contracts/generate", post(generate_contract))
        .route("/api/contracts/export", post(export_contract))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::adapters::document::PulldownExportService;
    use crate::application::handlers::ContractGenerator;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(generator: ContractGenerator) -> Router {
        contract_router().with_state(ContractAppState::new(
            generator,
            Arc::new(PulldownExportService::new()),
        ))
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
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
    async fn generate_returns_offline_draft() {
        let response = app(ContractGenerator::offline())
            .oneshot(post_json(
                "/api/contracts/generate",
                r#"{"prompt": "A website service agreement with payment terms", "parties": [{"name": "Alice"}], "currency": "EUR"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["stage"], "offline_template");
        assert!(json["contract"].as_str().unwrap().contains("Alice"));
        assert!(json["summary"].is_array());
        assert!(json["riskAnalysis"].is_array());
    }

    #[tokio::test]
    async fn generate_reports_upstream_failure_with_200() {
        let mock = MockAIProvider::new()
            .with_error(crate::ports::AIError::unavailable("model overloaded"));
        let response = app(ContractGenerator::with_provider(Arc::new(mock)))
            .oneshot(post_json("/api/contracts/generate", r#"{"description": "Service deal for the website"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["stage"], "upstream_failure");
        assert_eq!(json["riskAnalysis"][0]["level"], "High");
    }

    #[tokio::test]
    async fn generate_rejects_empty_description() {
        let response = app(ContractGenerator::offline())
            .oneshot(post_json("/api/contracts/generate", r#"{"description": ""}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn generate_rejects_invalid_json() {
        let response = app(ContractGenerator::offline())
            .oneshot(post_json("/api/contracts/generate", "{not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn export_markdown_sets_download_headers() {
        let response = app(ContractGenerator::offline())
            .oneshot(post_json(
                "/api/contracts/export",
                r##"{"contract": "# CONTRACT", "format": "markdown"}"##,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/markdown; charset=utf-8"
        );
        let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap();
        assert!(disposition.starts_with("attachment; filename=\"contract-"));
        assert!(disposition.ends_with(".md\""));
    }

    #[tokio::test]
    async fn export_blank_contract_is_bad_request() {
        let response = app(ContractGenerator::offline())
            .oneshot(post_json(
                "/api/contracts/export",
                r#"{"contract": " ", "format": "html"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
