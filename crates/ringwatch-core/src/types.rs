//! Domain types for Ringwatch's transaction-analysis model.
//!
//! Contains the parsed transaction record, the three detector result types
//! (`CycleRing`, `SmurfingRing`, `ShellChain`), the shared `PatternKind`
//! enum, and the `DetectorConfig` bounds that keep detection cost bounded
//! on adversarial inputs.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==============================================================================
// Transaction
// ==============================================================================

/// A single validated transaction record.
///
/// Produced by the parser and consumed by the graph builder; not retained
/// afterwards. Invariants enforced at parse time: `sender_id != receiver_id`,
/// `amount > 0`, `transaction_id` unique within the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
}

// ==============================================================================
// Pattern Classification
// ==============================================================================

/// The pattern families a ring can belong to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    Cycle,
    Smurfing,
    LayeredShell,
}

impl PatternKind {
    /// Name used in the graph snapshot, where `layered_shell` is
    /// shortened to `shell` for the frontend.
    pub fn snapshot_name(self) -> &'static str {
        match self {
            Self::Cycle => "cycle",
            Self::Smurfing => "smurfing",
            Self::LayeredShell => "shell",
        }
    }
}

impl std::fmt::Display for PatternKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cycle => write!(f, "cycle"),
            Self::Smurfing => write!(f, "smurfing"),
            Self::LayeredShell => write!(f, "layered_shell"),
        }
    }
}

/// Direction of a smurfing pattern relative to its hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FanDirection {
    FanIn,
    FanOut,
}

impl std::fmt::Display for FanDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FanIn => write!(f, "fan_in"),
            Self::FanOut => write!(f, "fan_out"),
        }
    }
}

// ==============================================================================
// Detector Results
// ==============================================================================

/// A circular routing ring: money flowing `A → B → C → A`.
///
/// `members` is rotation-normalized so the lexicographically smallest
/// account id comes first; two traversals of the same loop produce the
/// same member list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleRing {
    pub members: Vec<String>,
    pub length: usize,
}

/// A fan-in or fan-out hub together with the counterparties that hit it
/// inside the busiest rolling window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmurfingRing {
    pub hub_account: String,
    /// Distinct counterparties in the flagged window, sorted.
    pub counterparties: Vec<String>,
    pub pattern: FanDirection,
    /// Hub followed by the counterparties.
    pub members: Vec<String>,
}

/// A directed chain through low-degree passthrough accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellChain {
    /// Full path, origin through intermediaries to endpoint.
    pub members: Vec<String>,
    /// The intermediaries with shell-like degree, in path order.
    pub shell_accounts: Vec<String>,
    /// Number of hops (`members.len() - 1`).
    pub chain_length: usize,
}

// ==============================================================================
// Detector Configuration
// ==============================================================================

/// Bounds and thresholds for the detector phase.
///
/// The defaults are the engine's fixed detection rules; tests and the CLI
/// override individual fields (notably `detector_timeout`) through struct
/// update syntax.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Shortest reportable cycle. Mutual pairs (`A → B → A`) sit below this.
    pub cycle_min_length: usize,
    pub cycle_max_length: usize,
    /// Hard cap on DFS steps across the whole cycle search.
    pub cycle_max_iterations: usize,
    /// Stop after this many unique cycles.
    pub cycle_max_rings: usize,

    /// Distinct counterparties required inside one window to flag a hub.
    pub smurf_min_counterparties: usize,
    pub smurf_window_hours: i64,

    /// Inclusive total-degree band that marks an account as shell-like.
    pub shell_min_degree: usize,
    pub shell_max_degree: usize,
    /// Minimum chain length (hops) to report.
    pub shell_min_hops: usize,
    /// Depth bound on the chain search.
    pub shell_max_hops: usize,

    /// Wall-clock deadline for the detector phase as a whole. On expiry
    /// all three detector outputs are discarded and the report is built
    /// with empty results.
    pub detector_timeout: Duration,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            cycle_min_length: 3,
            cycle_max_length: 5,
            cycle_max_iterations: 100_000,
            cycle_max_rings: 50,
            smurf_min_counterparties: 10,
            smurf_window_hours: 72,
            shell_min_degree: 2,
            shell_max_degree: 3,
            shell_min_hops: 3,
            shell_max_hops: 8,
            detector_timeout: Duration::from_secs(15),
        }
    }
}

impl DetectorConfig {
    /// Whether `total_degree` falls inside the shell band.
    pub fn is_shell_degree(&self, total_degree: usize) -> bool {
        (self.shell_min_degree..=self.shell_max_degree).contains(&total_degree)
    }
}
