//! The analysis pipeline: one entry point from CSV bytes to a full report.
//!
//! ```text
//! bytes → parse → build graph → detect (deadline) → aggregate → score → report
//! ```
//!
//! The pipeline either fails fast with a [`ParseError`](crate::ParseError)
//! at the input boundary or returns a complete report — a detector
//! deadline expiry degrades the report to empty findings, never to a
//! partial failure.

use std::sync::Arc;
use std::time::Instant;

use crate::aggregate;
use crate::detect;
use crate::error::EngineError;
use crate::graph::TransactionGraph;
use crate::parser;
use crate::report::{self, AnalysisReport};
use crate::score;
use crate::types::DetectorConfig;

/// Run the full pipeline on raw CSV bytes.
pub async fn analyze(content: &[u8], config: &DetectorConfig) -> Result<AnalysisReport, EngineError> {
    let started = Instant::now();

    let transactions = parser::parse_transactions(content)?;
    tracing::debug!(accepted = transactions.len(), "transactions parsed");

    let graph = Arc::new(TransactionGraph::build(&transactions));
    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "transaction graph built"
    );

    let outputs = detect::run_detectors(Arc::clone(&graph), config).await?;
    tracing::debug!(
        cycles = outputs.cycles.len(),
        smurfing = outputs.smurfing.len(),
        shells = outputs.shells.len(),
        "detectors finished"
    );

    let aggregation = aggregate::aggregate(&outputs);
    let scores = score::score_accounts(&aggregation.accounts);

    Ok(report::build_report(
        &graph,
        &aggregation,
        &scores,
        started.elapsed(),
    ))
}
