//! Core library for **Ringwatch** — a money-muling pattern detector for
//! tabular transaction data.
//!
//! This crate provides the full analytic pipeline the `ringwatch` server
//! binary builds on: CSV parsing and validation, directed-multigraph
//! construction, the three pattern detectors (circular routing, smurfing,
//! layered shells), scoring, and report assembly. It is intentionally
//! transport-agnostic: input is an opaque byte buffer, output a serde
//! report, so callers can sit behind HTTP, a CLI, or tests.

pub mod aggregate;
pub mod analyze;
pub mod detect;
pub mod error;
pub mod graph;
pub mod parser;
pub mod report;
pub mod score;
pub mod types;

#[cfg(test)]
pub(crate) mod test_util;

pub use analyze::analyze;
pub use error::{EngineError, ParseError};
pub use report::AnalysisReport;
pub use types::{DetectorConfig, PatternKind, Transaction};
