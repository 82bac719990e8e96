//! Identity store trait.

use crate::StoreError;
use kyc_types::{Identifier, IdentityRecord, Profile};

/// Result of [`IdentityStore::register_if_absent`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registration {
    /// The stored record, pre-existing or just created.
    pub record: IdentityRecord,
    /// Whether this call created the record.
    pub created: bool,
}

/// Owner of every identity record.
///
/// Each method is atomic with respect to every other call on the same store,
/// so read-modify-write sequences on one identifier never interleave.
pub trait IdentityStore: Send + Sync {
    /// Pure read.
    fn lookup(&self, identifier: &Identifier) -> Result<Option<IdentityRecord>, StoreError>;

    /// Insert a record, or replace the profile of an existing one. The live
    /// challenge of an existing record is kept.
    fn upsert(&self, identifier: &Identifier, profile: Profile) -> Result<(), StoreError>;

    /// Create a record from `factory` if none exists; return the stored record
    /// either way. The factory is not called for a known identifier.
    fn register_if_absent(
        &self,
        identifier: &Identifier,
        factory: &dyn Fn(&Identifier) -> Profile,
    ) -> Result<Registration, StoreError>;

    /// Apply `f` to the record under the store's lock. Returns `false` if the
    /// identifier is unknown (and `f` is not called).
    fn update(
        &self,
        identifier: &Identifier,
        f: &mut dyn FnMut(&mut IdentityRecord),
    ) -> Result<bool, StoreError>;

    /// Number of records held.
    fn len(&self) -> Result<usize, StoreError>;

    fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}
