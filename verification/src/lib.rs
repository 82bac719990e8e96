//! Two-phase challenge-response verification.
//!
//! 1. **Issue**: a subject presents an identifier; an unseen identifier is
//!    auto-registered through a [`ProfilePolicy`], then a six-digit code is
//!    stored on the record (replacing any earlier one).
//! 2. **Redeem**: the identifier and code are presented together; on an exact
//!    match the stored identity attributes are released.
//!
//! All randomness flows through an injected [`RandomSource`] so tests can
//! script exact outputs.

pub mod challenge;
pub mod error;
pub mod policy;
pub mod random;
pub mod sandbox;

pub use challenge::ChallengeManager;
pub use error::VerificationError;
pub use policy::{register_with, MinimalProfilePolicy, ProfilePolicy, RichProfilePolicy};
pub use random::{OsRandom, RandomSource};
