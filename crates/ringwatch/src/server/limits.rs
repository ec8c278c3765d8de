use axum::extract::State;
use axum::Json;
use serde::Serialize;

use super::SharedState;

// ==============================================================================
// Detection Parameters
// ==============================================================================
//
// Read-only view of the bounds the engine is running under, so the
// frontend can explain why a pattern did or did not flag.

#[derive(Serialize)]
pub(super) struct LimitsResponse {
    cycle_min_length: usize,
    cycle_max_length: usize,
    cycle_max_iterations: usize,
    cycle_max_rings: usize,
    smurf_min_counterparties: usize,
    smurf_window_hours: i64,
    shell_min_degree: usize,
    shell_max_degree: usize,
    shell_min_hops: usize,
    shell_max_hops: usize,
    detector_timeout_secs: u64,
}

pub(super) async fn get_limits(State(state): State<SharedState>) -> Json<LimitsResponse> {
    let detector = &state.detector;

    Json(LimitsResponse {
        cycle_min_length: detector.cycle_min_length,
        cycle_max_length: detector.cycle_max_length,
        cycle_max_iterations: detector.cycle_max_iterations,
        cycle_max_rings: detector.cycle_max_rings,
        smurf_min_counterparties: detector.smurf_min_counterparties,
        smurf_window_hours: detector.smurf_window_hours,
        shell_min_degree: detector.shell_min_degree,
        shell_max_degree: detector.shell_max_degree,
        shell_min_hops: detector.shell_min_hops,
        shell_max_hops: detector.shell_max_hops,
        detector_timeout_secs: detector.detector_timeout.as_secs(),
    })
}
