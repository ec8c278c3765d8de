//! Shared test helpers for `ringwatch-core` unit tests.
//!
//! Consolidates builders for transactions, timestamps, and small graphs so
//! tests across modules share a single source of truth for dummy data.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};

use crate::graph::TransactionGraph;
use crate::types::Transaction;

/// Parse a `YYYY-MM-DD HH:MM:SS` literal into the engine's timestamp type.
pub fn ts(value: &str) -> DateTime<Utc> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .expect("test timestamp literal must be valid")
        .and_utc()
}

/// Build a transaction with a timestamp literal.
pub fn tx(id: &str, sender: &str, receiver: &str, amount: f64, when: &str) -> Transaction {
    tx_at(id, sender, receiver, amount, ts(when))
}

/// Build a transaction with an already-computed timestamp.
pub fn tx_at(
    id: &str,
    sender: &str,
    receiver: &str,
    amount: f64,
    when: DateTime<Utc>,
) -> Transaction {
    Transaction {
        transaction_id: id.to_string(),
        sender_id: sender.to_string(),
        receiver_id: receiver.to_string(),
        amount,
        timestamp: when,
    }
}

/// Build a graph from `(sender, receiver)` pairs with unit amounts and
/// hourly-increasing timestamps, one transaction per pair.
pub fn chain_graph(pairs: &[(&str, &str)]) -> TransactionGraph {
    let base = ts("2024-01-01 10:00:00");
    let txs: Vec<Transaction> = pairs
        .iter()
        .enumerate()
        .map(|(i, (sender, receiver))| {
            tx_at(
                &format!("T{}", i + 1),
                sender,
                receiver,
                100.0,
                base + Duration::hours(i as i64),
            )
        })
        .collect();
    TransactionGraph::build(&txs)
}

/// Hub sending to `receivers` distinct accounts, evenly spread across
/// `span_hours`.
pub fn fan_out_transactions(hub: &str, receivers: usize, span_hours: i64) -> Vec<Transaction> {
    let base = ts("2024-01-01 00:00:00");
    let step_minutes = span_hours * 60 / receivers as i64;
    (0..receivers)
        .map(|i| {
            tx_at(
                &format!("OUT{i}"),
                hub,
                &format!("R{i:02}"),
                500.0,
                base + Duration::minutes(i as i64 * step_minutes),
            )
        })
        .collect()
}

/// Many distinct senders hitting `hub`, spaced `hours_apart` apart.
pub fn fan_in_transactions(hub: &str, senders: usize, hours_apart: i64) -> Vec<Transaction> {
    let base = ts("2024-01-01 00:00:00");
    (0..senders)
        .map(|i| {
            tx_at(
                &format!("IN{i}"),
                &format!("S{i:02}"),
                hub,
                100.0,
                base + Duration::hours(i as i64 * hours_apart),
            )
        })
        .collect()
}
