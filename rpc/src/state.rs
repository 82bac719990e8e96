//! Shared handler state.

use std::sync::Arc;

use kyc_store::{IdentityStore, MemoryIdentityStore};
use kyc_utils::{Clock, SystemClock};
use kyc_verification::sandbox::seed_sandbox;
use kyc_verification::{
    ChallengeManager, MinimalProfilePolicy, OsRandom, ProfilePolicy, RandomSource,
    RichProfilePolicy,
};

use crate::{RpcError, ServerConfig};

/// Everything both adapters need, cheap to clone into each request.
#[derive(Clone)]
pub struct AppState {
    pub challenges: Arc<ChallengeManager>,
    /// Auto-registration for the structured-data API.
    pub rich_policy: Arc<dyn ProfilePolicy>,
    /// Auto-registration for the legacy-markup API.
    pub minimal_policy: Arc<dyn ProfilePolicy>,
    pub clock: Arc<dyn Clock>,
    pub expose_code_hint: bool,
}

impl AppState {
    /// Production wiring: in-memory store, OS randomness, wall clock.
    pub fn from_config(config: &ServerConfig) -> Result<Self, RpcError> {
        Self::with_sources(
            config,
            Arc::new(MemoryIdentityStore::new()),
            Arc::new(OsRandom),
            Arc::new(SystemClock),
        )
    }

    /// Wire the state from explicit sources. Seeds the sandbox identities
    /// into `store` when the config asks for it.
    pub fn with_sources(
        config: &ServerConfig,
        store: Arc<dyn IdentityStore>,
        random: Arc<dyn RandomSource>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, RpcError> {
        if config.seed_sandbox {
            seed_sandbox(store.as_ref())?;
        }
        let challenges = ChallengeManager::new(store, random.clone())
            .with_consume_on_success(config.consume_on_success);

        Ok(Self {
            challenges: Arc::new(challenges),
            rich_policy: Arc::new(RichProfilePolicy::new(random)),
            minimal_policy: Arc::new(MinimalProfilePolicy),
            clock,
            expose_code_hint: config.expose_code_hint,
        })
    }

    pub fn store(&self) -> &dyn IdentityStore {
        self.challenges.store().as_ref()
    }
}
