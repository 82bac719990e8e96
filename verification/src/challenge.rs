//! Challenge issuance and redemption.
//!
//! Per identity the code field moves between two states:
//! `NoChallenge --issue--> ChallengePending`, and `issue` on a pending
//! record replaces the code. A successful redeem leaves the code in place
//! unless consume-on-success is enabled.

use std::sync::Arc;

use kyc_store::IdentityStore;
use kyc_types::{ChallengeCode, ChallengeState, Identifier, IdentityRecord};
use tracing::{debug, info};

use crate::{RandomSource, VerificationError};

pub struct ChallengeManager {
    store: Arc<dyn IdentityStore>,
    random: Arc<dyn RandomSource>,
    consume_on_success: bool,
}

impl ChallengeManager {
    pub fn new(store: Arc<dyn IdentityStore>, random: Arc<dyn RandomSource>) -> Self {
        Self {
            store,
            random,
            consume_on_success: false,
        }
    }

    /// Clear the code after a successful redeem, making codes single-use.
    pub fn with_consume_on_success(mut self, consume: bool) -> Self {
        self.consume_on_success = consume;
        self
    }

    pub fn store(&self) -> &Arc<dyn IdentityStore> {
        &self.store
    }

    /// Generate a fresh code for an existing identity and store it, replacing
    /// any earlier one.
    pub fn issue(&self, identifier: &Identifier) -> Result<ChallengeCode, VerificationError> {
        let code = ChallengeCode::from_number(self.random.below(ChallengeCode::SPACE));
        let found = self
            .store
            .update(identifier, &mut |record: &mut IdentityRecord| {
                record.challenge = Some(code.clone())
            })?;
        if !found {
            return Err(VerificationError::IdentifierUnknown(identifier.to_string()));
        }
        info!(identifier = %identifier, code = %code, "challenge issued");
        Ok(code)
    }

    /// Check `presented` against the stored code and release the record on an
    /// exact match.
    pub fn redeem(
        &self,
        identifier: &Identifier,
        presented: &str,
    ) -> Result<IdentityRecord, VerificationError> {
        let consume = self.consume_on_success;
        let mut verified = None;
        let found = self.store.update(identifier, &mut |record: &mut IdentityRecord| {
            let matched = record
                .challenge
                .as_ref()
                .is_some_and(|code| code.matches(presented));
            if matched {
                verified = Some(record.clone());
                if consume {
                    record.challenge = None;
                }
            }
        })?;

        if !found {
            debug!(identifier = %identifier, "redeem for unknown identifier");
            return Err(VerificationError::IdentifierUnknown(identifier.to_string()));
        }
        match verified {
            Some(record) => {
                debug!(identifier = %identifier, consumed = consume, "challenge redeemed");
                Ok(record)
            }
            None => {
                debug!(identifier = %identifier, "challenge mismatch");
                Err(VerificationError::ChallengeMismatch(identifier.to_string()))
            }
        }
    }

    /// Current challenge state, or `None` for an unknown identifier.
    pub fn state(
        &self,
        identifier: &Identifier,
    ) -> Result<Option<ChallengeState>, VerificationError> {
        Ok(self
            .store
            .lookup(identifier)?
            .map(|record| record.challenge_state()))
    }
}
