//! Error types for ringwatch-core.

// ==============================================================================
// Parse Errors
// ==============================================================================

/// Fatal failures at the input boundary.
///
/// Each variant captures a specific failure mode rather than collapsing
/// everything into a single `String`, which lets the HTTP layer map parse
/// failures to a 422 while treating anything else as a server fault.
/// Malformed *rows* are not errors — they are skipped silently during
/// parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("file is not valid UTF-8 encoded text")]
    InvalidUtf8,

    #[error("CSV input is empty or has no header row")]
    MissingHeader,

    #[error("missing required columns: {0}")]
    MissingColumns(String),

    #[error("no valid transactions found in the CSV input")]
    NoValidTransactions,
}

// ==============================================================================
// Engine Errors
// ==============================================================================

/// Top-level error type for the ringwatch-core crate.
///
/// A detector deadline expiry is *not* an error: the pipeline substitutes
/// empty detector outputs and still returns a complete report.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("detector task failed: {0}")]
    Detector(String),
}
