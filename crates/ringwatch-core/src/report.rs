//! Report types and the formatter that assembles them.
//!
//! The report carries three views of one run: the flagged accounts sorted
//! by suspicion, the fraud rings with risk scores, and a full graph
//! snapshot for visualization — every node and edge, flagged or not. The
//! snapshot DTOs use camelCase field names and shorten `layered_shell` to
//! `shell`, matching what the frontend consumes.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::Aggregation;
use crate::graph::TransactionGraph;
use crate::score;
use crate::types::PatternKind;

/// Ring id shown for an account missing from the ring-id map. Not expected
/// for accounts flagged by any detector.
const UNKNOWN_RING: &str = "UNKNOWN";

// ==============================================================================
// Report Schema
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub suspicious_accounts: Vec<AccountReport>,
    pub fraud_rings: Vec<RingReport>,
    pub graph: GraphSnapshot,
    pub summary: Summary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountReport {
    pub account_id: String,
    pub suspicion_score: f64,
    pub detected_patterns: Vec<String>,
    pub ring_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RingReport {
    pub ring_id: String,
    pub member_accounts: Vec<String>,
    pub pattern_type: PatternKind,
    pub risk_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<SnapshotNode>,
    pub edges: Vec<SnapshotEdge>,
    pub rings: Vec<SnapshotRing>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotNode {
    pub id: String,
    pub risk_score: f64,
    pub suspicious: bool,
    pub ring_id: Option<String>,
    /// `cycle`, `smurfing`, or `shell`; from the node's last-assigned ring.
    pub pattern_type: Option<String>,
    pub total_transactions: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotRing {
    pub ring_id: String,
    pub pattern_type: String,
    pub member_count: usize,
    pub risk_score: f64,
    pub members: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub total_accounts_analyzed: usize,
    pub suspicious_accounts_flagged: usize,
    pub fraud_rings_detected: usize,
    /// Wall-clock duration of the run, two-decimal precision.
    pub processing_time_seconds: f64,
}

// ==============================================================================
// Formatter
// ==============================================================================

/// Assemble the final report from the graph, the aggregation, and the
/// per-account scores.
pub fn build_report(
    graph: &TransactionGraph,
    aggregation: &Aggregation,
    scores: &std::collections::BTreeMap<String, f64>,
    elapsed: Duration,
) -> AnalysisReport {
    let mut suspicious_accounts: Vec<AccountReport> = scores
        .iter()
        .map(|(account_id, score)| {
            let flags = aggregation.accounts.get(account_id);
            AccountReport {
                account_id: account_id.clone(),
                suspicion_score: *score,
                detected_patterns: flags
                    .map(|f| f.details.iter().cloned().collect())
                    .unwrap_or_default(),
                ring_id: flags
                    .filter(|f| !f.last_ring_id.is_empty())
                    .map(|f| f.last_ring_id.clone())
                    .unwrap_or_else(|| UNKNOWN_RING.to_string()),
            }
        })
        .collect();
    // Descending by score; the stable sort keeps the map's lexicographic
    // account order for ties.
    suspicious_accounts.sort_by(|a, b| {
        b.suspicion_score
            .partial_cmp(&a.suspicion_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let fraud_rings: Vec<RingReport> = aggregation
        .rings
        .iter()
        .map(|draft| {
            let member_scores: Vec<f64> = draft
                .members
                .iter()
                .map(|member| scores.get(member).copied().unwrap_or(0.0))
                .collect();
            RingReport {
                ring_id: draft.ring_id.clone(),
                member_accounts: draft.members.clone(),
                pattern_type: draft.pattern,
                risk_score: score::ring_risk(&member_scores, draft.pattern),
            }
        })
        .collect();

    let graph_snapshot = build_snapshot(graph, aggregation, scores, &fraud_rings);

    let summary = Summary {
        total_accounts_analyzed: graph.node_count(),
        suspicious_accounts_flagged: suspicious_accounts.len(),
        fraud_rings_detected: fraud_rings.len(),
        processing_time_seconds: (elapsed.as_secs_f64() * 100.0).round() / 100.0,
    };

    AnalysisReport {
        suspicious_accounts,
        fraud_rings,
        graph: graph_snapshot,
        summary,
    }
}

fn build_snapshot(
    graph: &TransactionGraph,
    aggregation: &Aggregation,
    scores: &std::collections::BTreeMap<String, f64>,
    fraud_rings: &[RingReport],
) -> GraphSnapshot {
    let nodes: Vec<SnapshotNode> = graph
        .nodes()
        .map(|id| {
            let flags = aggregation.accounts.get(id);
            SnapshotNode {
                id: id.to_string(),
                risk_score: scores.get(id).copied().unwrap_or(0.0),
                suspicious: flags.is_some(),
                ring_id: flags
                    .filter(|f| !f.last_ring_id.is_empty())
                    .map(|f| f.last_ring_id.clone()),
                pattern_type: flags
                    .and_then(|f| f.last_ring_pattern)
                    .map(|kind| kind.snapshot_name().to_string()),
                total_transactions: graph
                    .stats(id)
                    .map(|stats| stats.total_degree())
                    .unwrap_or(0),
            }
        })
        .collect();

    let edges: Vec<SnapshotEdge> = graph
        .adjacency()
        .flat_map(|(source, edges)| {
            edges.iter().map(move |edge| SnapshotEdge {
                id: edge.transaction_id.clone(),
                source: source.to_string(),
                target: edge.target.clone(),
                amount: edge.amount,
                timestamp: edge.timestamp,
            })
        })
        .collect();

    let rings: Vec<SnapshotRing> = fraud_rings
        .iter()
        .map(|ring| SnapshotRing {
            ring_id: ring.ring_id.clone(),
            pattern_type: ring.pattern_type.snapshot_name().to_string(),
            member_count: ring.member_accounts.len(),
            risk_score: ring.risk_score,
            members: ring.member_accounts.clone(),
        })
        .collect();

    GraphSnapshot {
        nodes,
        edges,
        rings,
    }
}
