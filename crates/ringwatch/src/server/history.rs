use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use super::error::AppError;
use super::SharedState;
use ringwatch_core::AnalysisReport;

// ==============================================================================
// Run Store
// ==============================================================================

/// One completed analysis run retained for the history panel.
#[derive(Clone)]
pub(crate) struct StoredRun {
    pub id: String,
    pub filename: String,
    /// RFC 3339 UTC timestamp of the run.
    pub created_at: String,
    pub report: AnalysisReport,
}

/// In-memory, capacity-capped store of past runs. Lives for the server's
/// lifetime; restarting the process clears it.
pub(crate) struct HistoryStore {
    cap: usize,
    runs: Vec<StoredRun>,
}

impl HistoryStore {
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            runs: Vec::new(),
        }
    }

    /// Insert a run, evicting the oldest entries once the cap is reached.
    pub fn insert(&mut self, run: StoredRun) {
        if self.runs.len() >= self.cap {
            let excess = self.runs.len() + 1 - self.cap;
            self.runs.drain(..excess);
        }
        self.runs.push(run);
    }

    pub fn get(&self, id: &str) -> Option<&StoredRun> {
        self.runs.iter().find(|run| run.id == id)
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.runs.len();
        self.runs.retain(|run| run.id != id);
        self.runs.len() < before
    }

    pub fn iter(&self) -> impl Iterator<Item = &StoredRun> {
        self.runs.iter()
    }
}

// ==============================================================================
// DTOs
// ==============================================================================

#[derive(Serialize)]
pub(super) struct RunSummary {
    analysis_id: String,
    filename: String,
    created_at: String,
    total_accounts: usize,
    suspicious_count: usize,
    rings_detected: usize,
    processing_time: f64,
}

impl From<&StoredRun> for RunSummary {
    fn from(run: &StoredRun) -> Self {
        Self {
            analysis_id: run.id.clone(),
            filename: run.filename.clone(),
            created_at: run.created_at.clone(),
            total_accounts: run.report.summary.total_accounts_analyzed,
            suspicious_count: run.report.summary.suspicious_accounts_flagged,
            rings_detected: run.report.summary.fraud_rings_detected,
            processing_time: run.report.summary.processing_time_seconds,
        }
    }
}

#[derive(Serialize)]
pub(super) struct RunDetail {
    analysis_id: String,
    filename: String,
    created_at: String,
    #[serde(flatten)]
    report: AnalysisReport,
}

// ==============================================================================
// Handlers
// ==============================================================================

pub(super) async fn list_runs(State(state): State<SharedState>) -> Json<Vec<RunSummary>> {
    let history = state.history.read().await;
    let mut entries: Vec<RunSummary> = history.iter().map(RunSummary::from).collect();

    // RFC 3339 UTC strings are lexicographically sortable by recency.
    entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Json(entries)
}

pub(super) async fn get_run(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<RunDetail>, AppError> {
    let history = state.history.read().await;
    let run = history
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("analysis run not found: {id}")))?;

    Ok(Json(RunDetail {
        analysis_id: run.id.clone(),
        filename: run.filename.clone(),
        created_at: run.created_at.clone(),
        report: run.report.clone(),
    }))
}

pub(super) async fn delete_run(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut history = state.history.write().await;
    if !history.remove(&id) {
        return Err(AppError::NotFound(format!("analysis run not found: {id}")));
    }

    tracing::info!(analysis_id = %id, "deleted analysis run from history");
    Ok(Json(serde_json::json!({ "status": "deleted" })))
}
