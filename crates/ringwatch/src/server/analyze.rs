use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::error::{map_engine_error, AppError};
use super::history::StoredRun;
use super::SharedState;
use ringwatch_core::AnalysisReport;

// ==============================================================================
// DTOs
// ==============================================================================

#[derive(Deserialize)]
pub(super) struct AnalyzeQuery {
    /// Original filename of the upload, kept for the history panel.
    filename: Option<String>,
}

/// The full engine report, extended with the id under which the run was
/// stored in history.
#[derive(Serialize)]
pub(super) struct AnalyzeResponse {
    analysis_id: String,
    #[serde(flatten)]
    report: AnalysisReport,
}

// ==============================================================================
// Handler
// ==============================================================================

/// `POST /api/v1/analyze` — run the detection pipeline on a raw CSV body.
pub(super) async fn analyze_upload(
    State(state): State<SharedState>,
    Query(query): Query<AnalyzeQuery>,
    body: Bytes,
) -> Result<Json<AnalyzeResponse>, AppError> {
    if body.is_empty() {
        return Err(AppError::BadRequest("uploaded file is empty".to_string()));
    }

    let report = ringwatch_core::analyze(&body, &state.detector)
        .await
        .map_err(map_engine_error)?;

    let analysis_id = uuid::Uuid::new_v4().to_string();
    let filename = query.filename.unwrap_or_else(|| "upload.csv".to_string());
    let created_at = chrono::Utc::now().to_rfc3339();

    tracing::info!(
        analysis_id = %analysis_id,
        filename = %filename,
        accounts = report.summary.total_accounts_analyzed,
        suspicious = report.summary.suspicious_accounts_flagged,
        rings = report.summary.fraud_rings_detected,
        "analysis run complete"
    );

    state.history.write().await.insert(StoredRun {
        id: analysis_id.clone(),
        filename,
        created_at,
        report: report.clone(),
    });

    Ok(Json(AnalyzeResponse {
        analysis_id,
        report,
    }))
}
