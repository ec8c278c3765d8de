//! Smurfing detection: fan-in and fan-out hubs.
//!
//! A hub is flagged when at least `smurf_min_counterparties` distinct
//! counterparties touch it within some rolling window. Incoming and
//! outgoing directions are scanned independently, so one account can be
//! flagged as both an aggregator (fan-in) and a disperser (fan-out).

use std::collections::BTreeSet;

use chrono::Duration;

use crate::graph::{Edge, TransactionGraph};
use crate::types::{DetectorConfig, FanDirection, SmurfingRing};

/// Scan every node in both directions. At most one ring per node per
/// direction; nodes are visited in ascending account-id order.
pub fn detect_smurfing(graph: &TransactionGraph, config: &DetectorConfig) -> Vec<SmurfingRing> {
    let mut rings: Vec<SmurfingRing> = Vec::new();

    for node in graph.nodes() {
        if let Some(counterparties) = busiest_window(graph.incoming_edges(node), config) {
            rings.push(build_ring(node, counterparties, FanDirection::FanIn));
        }
        if let Some(counterparties) = busiest_window(graph.outgoing_edges(node), config) {
            rings.push(build_ring(node, counterparties, FanDirection::FanOut));
        }
    }

    rings
}

fn build_ring(
    hub: &str,
    counterparties: BTreeSet<String>,
    pattern: FanDirection,
) -> SmurfingRing {
    let counterparties: Vec<String> = counterparties.into_iter().collect();
    let mut members = Vec::with_capacity(counterparties.len() + 1);
    members.push(hub.to_string());
    members.extend(counterparties.iter().cloned());
    SmurfingRing {
        hub_account: hub.to_string(),
        counterparties,
        pattern,
        members,
    }
}

/// Two-pointer sweep over the edges sorted by timestamp. Returns the
/// distinct counterparties of the window maximizing their count, provided
/// it reaches the threshold; ties keep the earlier window. Repeat edges to
/// one counterparty count once and do not fragment the window.
fn busiest_window(edges: &[Edge], config: &DetectorConfig) -> Option<BTreeSet<String>> {
    if edges.len() < config.smurf_min_counterparties {
        return None;
    }

    let mut sorted: Vec<&Edge> = edges.iter().collect();
    sorted.sort_by_key(|edge| edge.timestamp);
    let window = Duration::hours(config.smurf_window_hours);

    let mut best: BTreeSet<String> = BTreeSet::new();
    let mut left = 0;
    for right in 0..sorted.len() {
        while sorted[right].timestamp - sorted[left].timestamp > window {
            left += 1;
        }

        let current: BTreeSet<String> = sorted[left..=right]
            .iter()
            .map(|edge| edge.target.clone())
            .collect();
        if current.len() >= config.smurf_min_counterparties && current.len() > best.len() {
            best = current;
        }
    }

    (best.len() >= config.smurf_min_counterparties).then_some(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::TransactionGraph;
    use crate::test_util::{fan_in_transactions, fan_out_transactions, tx};
    use crate::types::Transaction;

    #[test]
    fn ten_senders_in_one_day_flag_fan_in() {
        let graph = TransactionGraph::build(&fan_in_transactions("HUB", 10, 1));
        let rings = detect_smurfing(&graph, &DetectorConfig::default());

        assert_eq!(rings.len(), 1);
        let ring = &rings[0];
        assert_eq!(ring.hub_account, "HUB");
        assert_eq!(ring.pattern, FanDirection::FanIn);
        assert_eq!(ring.counterparties.len(), 10);
        assert_eq!(ring.members.len(), 11);
        assert_eq!(ring.members[0], "HUB");
    }

    #[test]
    fn nine_senders_do_not_flag() {
        let graph = TransactionGraph::build(&fan_in_transactions("HUB", 9, 1));
        assert!(detect_smurfing(&graph, &DetectorConfig::default()).is_empty());
    }

    #[test]
    fn ten_senders_spread_past_the_window_do_not_flag() {
        // 10 hours apart: any 72h window holds at most 8 of the 10 senders.
        let graph = TransactionGraph::build(&fan_in_transactions("HUB", 10, 10));
        assert!(detect_smurfing(&graph, &DetectorConfig::default()).is_empty());
    }

    #[test]
    fn fan_out_is_detected_symmetrically() {
        let graph = TransactionGraph::build(&fan_out_transactions("H", 10, 24));
        let rings = detect_smurfing(&graph, &DetectorConfig::default());

        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].pattern, FanDirection::FanOut);
        assert_eq!(rings[0].hub_account, "H");
    }

    #[test]
    fn repeat_edges_to_one_counterparty_count_once() {
        // 9 distinct senders, one of them sending three times: 11 edges
        // pass the length pre-filter but only 9 distinct counterparties.
        let mut txs = fan_in_transactions("HUB", 9, 1);
        txs.push(tx("D1", "S00", "HUB", 5.0, "2024-01-01 09:10:00"));
        txs.push(tx("D2", "S00", "HUB", 5.0, "2024-01-01 09:20:00"));
        let graph = TransactionGraph::build(&txs);

        assert!(detect_smurfing(&graph, &DetectorConfig::default()).is_empty());
    }

    #[test]
    fn a_node_can_be_flagged_in_both_directions() {
        let mut txs = fan_in_transactions("HUB", 10, 1);
        txs.extend(fan_out_transactions("HUB", 10, 24));
        let graph = TransactionGraph::build(&txs);

        let rings = detect_smurfing(&graph, &DetectorConfig::default());
        let patterns: Vec<FanDirection> = rings.iter().map(|r| r.pattern).collect();
        assert_eq!(patterns, vec![FanDirection::FanIn, FanDirection::FanOut]);
        assert!(rings.iter().all(|r| r.hub_account == "HUB"));
    }

    #[test]
    fn window_boundary_is_inclusive() {
        // First edge at 00:00, last exactly 72h later: all 10 fit.
        let mut txs: Vec<Transaction> = (0..9)
            .map(|i| {
                tx(
                    &format!("IN{i}"),
                    &format!("S{i:02}"),
                    "HUB",
                    50.0,
                    &format!("2024-01-01 {:02}:00:00", i),
                )
            })
            .collect();
        txs.push(tx("IN9", "S09", "HUB", 50.0, "2024-01-04 00:00:00"));
        let graph = TransactionGraph::build(&txs);

        let rings = detect_smurfing(&graph, &DetectorConfig::default());
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].counterparties.len(), 10);
    }
}
