//! Fundamental types for the mock KYC service.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! subject identifiers, identity records, challenge codes, and the masking
//! helpers used to redact attributes when a record is created.

pub mod error;
pub mod identifier;
pub mod mask;
pub mod record;

pub use error::KycError;
pub use identifier::Identifier;
pub use record::{ChallengeCode, ChallengeState, Gender, IdentityRecord, Profile};
