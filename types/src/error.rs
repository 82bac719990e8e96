//! Top-level error type shared across crates.

use thiserror::Error;

/// Errors raised while constructing core values from untrusted input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KycError {
    #[error("invalid gender code: {0}")]
    InvalidGender(String),

    #[error("invalid challenge code: {0}")]
    InvalidChallengeCode(String),
}
