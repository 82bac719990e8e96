//! Identity storage for the mock KYC service.
//!
//! The rest of the codebase depends only on the [`IdentityStore`] trait.
//! [`MemoryIdentityStore`] is the process-lifetime implementation used by the
//! server; nothing is persisted across restarts.

pub mod error;
pub mod identity;
pub mod memory;

pub use error::StoreError;
pub use identity::{IdentityStore, Registration};
pub use memory::MemoryIdentityStore;
