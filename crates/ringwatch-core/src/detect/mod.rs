//! Detector orchestration.
//!
//! The graph is immutable once built, so the three detectors run as
//! independent blocking tasks over a shared `Arc` and are joined in fixed
//! order (cycles, smurfing, shells) regardless of which finishes first —
//! ring-ID assignment depends on that order. The phase as a whole runs
//! under a wall-clock deadline; expiry discards all three outputs and the
//! pipeline continues with empty results.

pub mod cycles;
pub mod shells;
pub mod smurfing;

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::error::EngineError;
use crate::graph::TransactionGraph;
use crate::types::{CycleRing, DetectorConfig, ShellChain, SmurfingRing};

/// The three detector result sets, in aggregation order.
#[derive(Debug, Clone, Default)]
pub struct DetectorOutputs {
    pub cycles: Vec<CycleRing>,
    pub smurfing: Vec<SmurfingRing>,
    pub shells: Vec<ShellChain>,
}

/// Run all detectors against the graph under `config.detector_timeout`.
///
/// Cancellation is coarse: `spawn_blocking` closures cannot be preempted,
/// so on expiry the joins are abandoned and any still-running detector
/// finishes in the background with its result dropped.
pub async fn run_detectors(
    graph: Arc<TransactionGraph>,
    config: &DetectorConfig,
) -> Result<DetectorOutputs, EngineError> {
    if config.detector_timeout.is_zero() {
        tracing::warn!("detector deadline is zero; skipping the detector phase");
        return Ok(DetectorOutputs::default());
    }

    let cycle_task = spawn_detector(&graph, config, |g, c| cycles::detect_cycles(g, c));
    let smurf_task = spawn_detector(&graph, config, |g, c| smurfing::detect_smurfing(g, c));
    let shell_task = spawn_detector(&graph, config, |g, c| shells::detect_shell_chains(g, c));

    let joined = tokio::time::timeout(config.detector_timeout, async {
        let cycles = cycle_task.await;
        let smurfing = smurf_task.await;
        let shells = shell_task.await;
        (cycles, smurfing, shells)
    })
    .await;

    match joined {
        Ok((cycles, smurfing, shells)) => Ok(DetectorOutputs {
            cycles: cycles.map_err(|e| EngineError::Detector(e.to_string()))?,
            smurfing: smurfing.map_err(|e| EngineError::Detector(e.to_string()))?,
            shells: shells.map_err(|e| EngineError::Detector(e.to_string()))?,
        }),
        Err(_elapsed) => {
            tracing::warn!(
                timeout_secs = config.detector_timeout.as_secs(),
                "detector phase deadline expired; discarding partial results"
            );
            Ok(DetectorOutputs::default())
        }
    }
}

fn spawn_detector<T, F>(
    graph: &Arc<TransactionGraph>,
    config: &DetectorConfig,
    detector: F,
) -> JoinHandle<T>
where
    T: Send + 'static,
    F: FnOnce(&TransactionGraph, &DetectorConfig) -> T + Send + 'static,
{
    let graph = Arc::clone(graph);
    let config = config.clone();
    tokio::task::spawn_blocking(move || detector(&graph, &config))
}
