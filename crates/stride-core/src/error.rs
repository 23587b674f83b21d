//! Error types for stride-core.

use thiserror::Error;

/// Result type alias using stride-core's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while accumulating step data.
///
/// Expected outcomes (a day already tracked, a rejected negative reading,
/// a skipped restore entry) are modeled as return values on the hot path,
/// never as errors; only ledger storage failures propagate here.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error
/// variants in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The underlying day ledger failed.
    #[error("Ledger error: {0}")]
    Ledger(#[from] stride_store::Error),
}
