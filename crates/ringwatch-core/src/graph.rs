//! Directed multigraph built from validated transactions.
//!
//! Each transaction becomes one forward edge under its sender and one
//! reverse edge under its receiver, so both fan-out and fan-in scans are a
//! single adjacency lookup. Parallel edges between the same ordered pair
//! are kept. After construction the graph is observed immutably; the
//! detectors share it read-only.
//!
//! Adjacency, stats, and the node set all use ordered collections so every
//! iteration over accounts is lexicographic — detector output and the
//! final report stay reproducible across runs and platforms.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Transaction;

// ==============================================================================
// Edges and Node Statistics
// ==============================================================================

/// A directed edge. `target` is the endpoint opposite the indexing side:
/// the receiver in the forward adjacency, the sender in the reverse one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub target: String,
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
    pub transaction_id: String,
}

/// Per-account degree and volume aggregates, maintained during the build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeStats {
    pub in_degree: usize,
    pub out_degree: usize,
    pub in_amount_total: f64,
    pub out_amount_total: f64,
}

impl NodeStats {
    pub fn total_degree(&self) -> usize {
        self.in_degree + self.out_degree
    }
}

// ==============================================================================
// Transaction Graph
// ==============================================================================

/// Directed multigraph over account ids with forward and reverse adjacency.
#[derive(Debug, Clone, Default)]
pub struct TransactionGraph {
    adjacency: BTreeMap<String, Vec<Edge>>,
    reverse_adjacency: BTreeMap<String, Vec<Edge>>,
    nodes: BTreeSet<String>,
    stats: BTreeMap<String, NodeStats>,
    edge_count: usize,
}

impl TransactionGraph {
    /// Build the graph from parsed transactions, in source-record order.
    /// Edge insertion order within an adjacency list equals row order.
    pub fn build(transactions: &[Transaction]) -> Self {
        let mut graph = Self::default();
        for txn in transactions {
            graph.add_transaction(txn);
        }
        graph
    }

    fn add_transaction(&mut self, txn: &Transaction) {
        let sender = &txn.sender_id;
        let receiver = &txn.receiver_id;

        self.nodes.insert(sender.clone());
        self.nodes.insert(receiver.clone());

        self.adjacency
            .entry(sender.clone())
            .or_default()
            .push(Edge {
                target: receiver.clone(),
                amount: txn.amount,
                timestamp: txn.timestamp,
                transaction_id: txn.transaction_id.clone(),
            });
        self.reverse_adjacency
            .entry(receiver.clone())
            .or_default()
            .push(Edge {
                target: sender.clone(),
                amount: txn.amount,
                timestamp: txn.timestamp,
                transaction_id: txn.transaction_id.clone(),
            });

        let sender_stats = self.stats.entry(sender.clone()).or_default();
        sender_stats.out_degree += 1;
        sender_stats.out_amount_total += txn.amount;

        let receiver_stats = self.stats.entry(receiver.clone()).or_default();
        receiver_stats.in_degree += 1;
        receiver_stats.in_amount_total += txn.amount;

        self.edge_count += 1;
    }

    /// Forward-edge targets of `node`, in insertion order, repeats included.
    pub fn neighbors<'a>(&'a self, node: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.outgoing_edges(node).iter().map(|e| e.target.as_str())
    }

    pub fn outgoing_edges(&self, node: &str) -> &[Edge] {
        self.adjacency.get(node).map_or(&[], Vec::as_slice)
    }

    /// Incoming edges via the reverse adjacency; each edge's `target` is
    /// the sender.
    pub fn incoming_edges(&self, node: &str) -> &[Edge] {
        self.reverse_adjacency.get(node).map_or(&[], Vec::as_slice)
    }

    /// All account ids, in ascending lexicographic order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    /// Accounts with outgoing edges, ascending, paired with their edges.
    pub fn adjacency(&self) -> impl Iterator<Item = (&str, &[Edge])> {
        self.adjacency
            .iter()
            .map(|(node, edges)| (node.as_str(), edges.as_slice()))
    }

    pub fn stats(&self, node: &str) -> Option<&NodeStats> {
        self.stats.get(node)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }
}
