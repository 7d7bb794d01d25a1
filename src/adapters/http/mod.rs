//! HTTP adapters - REST API implementations.
//!
//! Each area has its own module with DTOs, handlers and routes; this module
//! merges them and applies the cross-cutting tower layers.

pub mod contract;
pub mod error;
pub mod publishing;

use axum::routing::get;
use axum::{Json, Router};
use http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

pub use contract::{contract_router, ContractAppState};
pub use error::{ApiError, ErrorResponse};
pub use publishing::{publishing_router, PublishingAppState};

/// Everything the HTTP surface needs.
#[derive(Clone)]
pub struct AppState {
    pub contract: ContractAppState,
    pub publishing: PublishingAppState,
}

/// GET /health
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Builds the full API router with tracing, CORS and request timeout layers.
pub fn app_router(state: AppState, server: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(contract_router().with_state(state.contract))
        .merge(
            publishing_router(state.publishing.max_upload_bytes).with_state(state.publishing),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&server.cors_origins_list()))
        .layer(TimeoutLayer::new(server.request_timeout()))
}

/// Allows the listed origins, or any origin when none are configured.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    if allowed.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(allowed)
    }
}
