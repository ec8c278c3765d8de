mod analyze;
mod error;
mod history;
mod limits;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{any, get, post};
use axum::{Json, Router};
use tokio::sync::RwLock;
use tower_http::cors::{AllowOrigin, CorsLayer};

use history::HistoryStore;
use ringwatch_core::DetectorConfig;

// ==============================================================================
// Application State
// ==============================================================================

pub struct AppState {
    pub detector: DetectorConfig,
    history: Arc<RwLock<HistoryStore>>,
    max_upload_bytes: usize,
}

impl AppState {
    pub fn new(detector: DetectorConfig, history_cap: usize, max_upload_bytes: usize) -> Self {
        Self {
            detector,
            history: Arc::new(RwLock::new(HistoryStore::new(history_cap))),
            max_upload_bytes,
        }
    }
}

type SharedState = Arc<AppState>;

// ==============================================================================
// Router
// ==============================================================================

pub fn build_router(state: AppState, origin: &str) -> Router {
    // Only reflect the allowed origin when the request's Origin header
    // actually matches. Otherwise, omit the header entirely so browsers
    // get a clean CORS rejection instead of a mismatched origin value.
    let allowed: axum::http::HeaderValue = origin.parse().expect("valid origin header value");
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::predicate({
            let allowed = allowed.clone();
            move |request_origin: &axum::http::HeaderValue, _| *request_origin == allowed
        }))
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let shared = Arc::new(state);

    // The upload route gets its own body cap so oversized CSVs are
    // rejected before the engine sees them.
    let upload_route = Router::new()
        .route("/api/v1/analyze", post(analyze::analyze_upload))
        .layer(DefaultBodyLimit::max(shared.max_upload_bytes));

    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/limits", get(limits::get_limits))
        .route("/api/v1/history", get(history::list_runs))
        .route(
            "/api/v1/history/{id}",
            get(history::get_run).delete(history::delete_run),
        )
        .merge(upload_route)
        .route("/api", any(api_not_found))
        .route("/api/{*path}", any(api_not_found))
        .fallback(api_not_found)
        .layer(cors)
        .with_state(shared)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn api_not_found() -> error::AppError {
    error::AppError::NotFound("API route not found".to_string())
}
