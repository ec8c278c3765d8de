//! Layered shell-network detection.
//!
//! Looks for directed chains of at least `shell_min_hops` edges whose
//! intermediate accounts sit in the shell degree band — passthrough
//! accounts with barely any other activity. Chains may terminate at a
//! non-shell endpoint or at a shell account; both forms are reported, and
//! identical paths discovered through different branches are deduplicated
//! by their exact member sequence.

use std::collections::HashSet;

use crate::graph::TransactionGraph;
use crate::types::{DetectorConfig, ShellChain};

/// Find shell chains starting from every non-shell origin. Origins are
/// visited in ascending account-id order; the search depth is bounded by
/// `shell_max_hops`.
pub fn detect_shell_chains(graph: &TransactionGraph, config: &DetectorConfig) -> Vec<ShellChain> {
    let mut results: Vec<ShellChain> = Vec::new();
    let mut seen: HashSet<Vec<String>> = HashSet::new();

    for start in graph.nodes() {
        // Shells are intermediaries, not originators.
        let shell_like = graph
            .stats(start)
            .is_some_and(|stats| config.is_shell_degree(stats.total_degree()));
        if shell_like {
            continue;
        }

        let mut walk = Walk {
            path: vec![start.to_string()],
            visited: HashSet::from([start.to_string()]),
            shells: Vec::new(),
        };
        extend_chain(graph, config, start, &mut walk, &mut results, &mut seen);
    }

    results
}

/// Mutable traversal state for one origin's DFS.
struct Walk {
    path: Vec<String>,
    visited: HashSet<String>,
    shells: Vec<String>,
}

fn extend_chain(
    graph: &TransactionGraph,
    config: &DetectorConfig,
    current: &str,
    walk: &mut Walk,
    results: &mut Vec<ShellChain>,
    seen: &mut HashSet<Vec<String>>,
) {
    // The running path is itself reportable once it is long enough and has
    // passed through at least one shell; this catches chains that end on a
    // shell account.
    let hops = walk.path.len() - 1;
    if hops >= config.shell_min_hops && !walk.shells.is_empty() {
        record_chain(&walk.path, &walk.shells, results, seen);
    }

    if hops >= config.shell_max_hops {
        return;
    }

    let neighbors: Vec<String> = graph
        .neighbors(current)
        .map(str::to_string)
        .collect();
    for neighbor in neighbors {
        if walk.visited.contains(&neighbor) {
            continue;
        }
        let Some(stats) = graph.stats(&neighbor) else {
            continue;
        };

        if config.is_shell_degree(stats.total_degree()) {
            // Extend through the shell intermediary.
            walk.visited.insert(neighbor.clone());
            walk.path.push(neighbor.clone());
            walk.shells.push(neighbor.clone());

            extend_chain(graph, config, &neighbor, walk, results, seen);

            walk.shells.pop();
            walk.path.pop();
            walk.visited.remove(&neighbor);
        } else if !walk.shells.is_empty() && hops >= config.shell_min_hops - 1 {
            // Non-shell endpoint closing a chain that already crossed at
            // least one shell. The chain is recorded but never extended
            // past the endpoint.
            walk.path.push(neighbor.clone());
            record_chain(&walk.path, &walk.shells, results, seen);
            walk.path.pop();
        }
    }
}

fn record_chain(
    path: &[String],
    shells: &[String],
    results: &mut Vec<ShellChain>,
    seen: &mut HashSet<Vec<String>>,
) {
    if seen.insert(path.to_vec()) {
        results.push(ShellChain {
            members: path.to_vec(),
            shell_accounts: shells.to_vec(),
            chain_length: path.len() - 1,
        });
    }
}
