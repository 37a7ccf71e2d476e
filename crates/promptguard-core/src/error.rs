//! Error types for the decision core.

use thiserror::Error;

use crate::scorer::ScorerError;

/// Core error type for scan operations.
#[derive(Debug, Error)]
pub enum GuardError {
    /// An external scorer failed. The scan as a whole fails: an
    /// unscoreable prompt must never default to PASS.
    #[error("external scorer failure: {0}")]
    Scorer(#[from] ScorerError),

    /// Invalid configuration, e.g. ensemble weights not summing to 1.0.
    #[error("configuration error: {0}")]
    Config(String),
}
