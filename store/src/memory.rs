//! In-memory identity store.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use kyc_types::{Identifier, IdentityRecord, Profile};
use tracing::trace;

use crate::{IdentityStore, Registration, StoreError};

/// A thread-safe, process-lifetime identity store.
///
/// A single mutex guards the whole map, which serialises all operations and
/// therefore all operations on any one identifier.
pub struct MemoryIdentityStore {
    records: Mutex<HashMap<Identifier, IdentityRecord>>,
}

impl MemoryIdentityStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
        }
    }

    fn records(&self) -> Result<MutexGuard<'_, HashMap<Identifier, IdentityRecord>>, StoreError> {
        self.records.lock().map_err(|_| StoreError::Poisoned)
    }

    /// All identifiers currently held, sorted.
    pub fn identifiers(&self) -> Result<Vec<Identifier>, StoreError> {
        let mut ids: Vec<Identifier> = self.records()?.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}

impl Default for MemoryIdentityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityStore for MemoryIdentityStore {
    fn lookup(&self, identifier: &Identifier) -> Result<Option<IdentityRecord>, StoreError> {
        Ok(self.records()?.get(identifier).cloned())
    }

    fn upsert(&self, identifier: &Identifier, profile: Profile) -> Result<(), StoreError> {
        let mut records = self.records()?;
        match records.get_mut(identifier) {
            Some(existing) => existing.profile = profile,
            None => {
                records.insert(
                    identifier.clone(),
                    IdentityRecord::new(identifier.clone(), profile),
                );
            }
        }
        trace!(identifier = %identifier, "upserted identity");
        Ok(())
    }

    fn register_if_absent(
        &self,
        identifier: &Identifier,
        factory: &dyn Fn(&Identifier) -> Profile,
    ) -> Result<Registration, StoreError> {
        let mut records = self.records()?;
        if let Some(existing) = records.get(identifier) {
            return Ok(Registration {
                record: existing.clone(),
                created: false,
            });
        }
        let record = IdentityRecord::new(identifier.clone(), factory(identifier));
        records.insert(identifier.clone(), record.clone());
        Ok(Registration {
            record,
            created: true,
        })
    }

    fn update(
        &self,
        identifier: &Identifier,
        f: &mut dyn FnMut(&mut IdentityRecord),
    ) -> Result<bool, StoreError> {
        match self.records()?.get_mut(identifier) {
            Some(record) => {
                f(record);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn len(&self) -> Result<usize, StoreError> {
        Ok(self.records()?.len())
    }
}
