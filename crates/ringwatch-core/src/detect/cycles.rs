//! Circular fund-routing detection.
//!
//! Enumerates unique directed simple cycles of bounded length on the
//! transaction graph. The search is an iterative DFS with an explicit
//! stack so the global iteration cap is enforced uniformly, with no risk
//! of overflowing the call stack on dense graphs.

use std::collections::HashSet;

use crate::graph::TransactionGraph;
use crate::types::{CycleRing, DetectorConfig};

/// One suspended DFS position: enough to resume the scan of `node`'s
/// neighbor list at `next_neighbor` after a deeper branch returns.
struct Frame {
    node: String,
    path: Vec<String>,
    visited: HashSet<String>,
    next_neighbor: usize,
}

/// Find unique directed cycles with length in
/// `[cycle_min_length, cycle_max_length]`.
///
/// Only nodes with both in- and out-edges can sit on a cycle, so the
/// candidate set is pre-filtered; candidates are visited in ascending
/// account-id order. The search halts early once either
/// `cycle_max_iterations` DFS steps have run or `cycle_max_rings` unique
/// cycles were found — partial completion is not an error.
pub fn detect_cycles(graph: &TransactionGraph, config: &DetectorConfig) -> Vec<CycleRing> {
    let mut rings: Vec<CycleRing> = Vec::new();
    let mut seen: HashSet<Vec<String>> = HashSet::new();
    let mut iterations: usize = 0;

    let candidates = graph.nodes().filter(|node| {
        graph
            .stats(node)
            .is_some_and(|stats| stats.in_degree > 0 && stats.out_degree > 0)
    });

    'search: for start in candidates {
        if rings.len() >= config.cycle_max_rings || iterations >= config.cycle_max_iterations {
            break;
        }

        let mut stack = vec![Frame {
            node: start.to_string(),
            path: vec![start.to_string()],
            visited: HashSet::from([start.to_string()]),
            next_neighbor: 0,
        }];

        while let Some(frame) = stack.pop() {
            iterations += 1;
            if iterations >= config.cycle_max_iterations || rings.len() >= config.cycle_max_rings
            {
                break 'search;
            }

            let edges = graph.outgoing_edges(&frame.node);
            let mut index = frame.next_neighbor;
            while index < edges.len() {
                let neighbor = edges[index].target.as_str();
                iterations += 1;
                if iterations >= config.cycle_max_iterations
                    || rings.len() >= config.cycle_max_rings
                {
                    break;
                }

                if neighbor == start && frame.path.len() >= config.cycle_min_length {
                    let members = normalize_rotation(&frame.path);
                    if seen.insert(members.clone()) {
                        rings.push(CycleRing {
                            length: members.len(),
                            members,
                        });
                    }
                    index += 1;
                    continue;
                }

                if !frame.visited.contains(neighbor) && frame.path.len() < config.cycle_max_length
                {
                    let mut next_path = frame.path.clone();
                    next_path.push(neighbor.to_string());
                    let mut next_visited = frame.visited.clone();
                    next_visited.insert(neighbor.to_string());

                    // Park the current node with its resume index, then
                    // descend into the neighbor.
                    stack.push(Frame {
                        node: frame.node.clone(),
                        path: frame.path.clone(),
                        visited: frame.visited.clone(),
                        next_neighbor: index + 1,
                    });
                    stack.push(Frame {
                        node: neighbor.to_string(),
                        path: next_path,
                        visited: next_visited,
                        next_neighbor: 0,
                    });
                    break;
                }

                index += 1;
            }
        }
    }

    rings
}

/// Rotate a cycle so its lexicographically smallest member comes first.
/// `A→B→C→A` and `B→C→A→B` then share one identity key.
fn normalize_rotation(cycle: &[String]) -> Vec<String> {
    let Some(min_index) = cycle
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.cmp(b.1))
        .map(|(index, _)| index)
    else {
        return Vec::new();
    };
    let mut rotated = Vec::with_capacity(cycle.len());
    rotated.extend_from_slice(&cycle[min_index..]);
    rotated.extend_from_slice(&cycle[..min_index]);
    rotated
}
