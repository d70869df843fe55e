//! Error types raised while configuring or running the ranker.
#![forbid(unsafe_code)]

use thiserror::Error;
use wanderfeed_core::StoreError;

/// Errors raised by ranking configuration and store-backed recording.
#[derive(Debug, Error)]
pub enum RankerError {
    /// A tuning parameter was non-finite or outside its valid range.
    #[error("{parameter} must be finite and within range, got {value}")]
    InvalidTuning {
        /// Name of the rejected parameter.
        parameter: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// Loading or saving a preference model failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
