//! Detector-output aggregation and ring-ID assignment.
//!
//! Consumes the three detector result sets in fixed order — cycles, then
//! smurfing, then shells — and assigns `RING_###` ids from a single
//! monotonic counter. Per-account involvement is folded into one typed
//! record instead of parallel string-keyed maps, so the scorer and the
//! formatter read from a single source.

use std::collections::{BTreeMap, BTreeSet};

use crate::detect::DetectorOutputs;
use crate::types::PatternKind;

// ==============================================================================
// Aggregates
// ==============================================================================

/// Everything the pipeline tracks about one flagged account.
#[derive(Debug, Clone, Default)]
pub struct AccountFlags {
    /// Pattern families the account participates in.
    pub families: BTreeSet<PatternKind>,
    /// Granular labels: `cycle_length_<k>`, `fan_in`, `fan_out`,
    /// `layered_shell`, `shell_intermediary`.
    pub details: BTreeSet<String>,
    /// Ring id of the most recently processed ring containing the
    /// account. Last writer wins.
    pub last_ring_id: String,
    /// Pattern of that last ring, kept consistent with `last_ring_id`.
    pub last_ring_pattern: Option<PatternKind>,
    /// Number of rings the account belongs to, across all detectors.
    pub ring_count: usize,
}

/// A ring with its assigned id, before risk scoring.
#[derive(Debug, Clone)]
pub struct RingDraft {
    pub ring_id: String,
    pub pattern: PatternKind,
    pub members: Vec<String>,
}

/// Aggregated view over all detector outputs.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    pub accounts: BTreeMap<String, AccountFlags>,
    pub rings: Vec<RingDraft>,
}

// ==============================================================================
// Aggregation
// ==============================================================================

pub fn aggregate(outputs: &DetectorOutputs) -> Aggregation {
    let mut aggregation = Aggregation::default();
    let mut ring_counter: usize = 0;

    for ring in &outputs.cycles {
        let detail = format!("cycle_length_{}", ring.length);
        record_ring(
            &mut aggregation,
            &mut ring_counter,
            PatternKind::Cycle,
            &ring.members,
            |_| detail.clone(),
        );
    }

    for ring in &outputs.smurfing {
        let detail = ring.pattern.to_string();
        record_ring(
            &mut aggregation,
            &mut ring_counter,
            PatternKind::Smurfing,
            &ring.members,
            |_| detail.clone(),
        );
    }

    for chain in &outputs.shells {
        record_ring(
            &mut aggregation,
            &mut ring_counter,
            PatternKind::LayeredShell,
            &chain.members,
            |member| {
                if chain.shell_accounts.iter().any(|s| s == member) {
                    "shell_intermediary".to_string()
                } else {
                    "layered_shell".to_string()
                }
            },
        );
    }

    aggregation
}

fn record_ring(
    aggregation: &mut Aggregation,
    ring_counter: &mut usize,
    pattern: PatternKind,
    members: &[String],
    detail_for: impl Fn(&str) -> String,
) {
    *ring_counter += 1;
    let ring_id = format!("RING_{ring_counter:03}");

    for member in members {
        let flags = aggregation.accounts.entry(member.clone()).or_default();
        flags.families.insert(pattern);
        flags.details.insert(detail_for(member));
        flags.last_ring_id = ring_id.clone();
        flags.last_ring_pattern = Some(pattern);
        flags.ring_count += 1;
    }

    aggregation.rings.push(RingDraft {
        ring_id,
        pattern,
        members: members.to_vec(),
    });
}
