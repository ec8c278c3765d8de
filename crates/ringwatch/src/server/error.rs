use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use ringwatch_core::EngineError;

// ==============================================================================
// Error Type
// ==============================================================================

pub(crate) enum AppError {
    BadRequest(String),
    UnprocessableEntity(String),
    NotFound(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

/// An invalid upload is the caller's fault (422); anything else from the
/// engine is a server fault.
pub(super) fn map_engine_error(err: EngineError) -> AppError {
    match err {
        EngineError::Parse(parse) => AppError::UnprocessableEntity(parse.to_string()),
        other => AppError::Internal(format!("analysis failed: {other}")),
    }
}
