//! Auto-registration policies.
//!
//! When an identifier is referenced for the first time, a policy synthesises a
//! plausible but non-sensitive profile for it. Email and phone are masked as
//! the profile is built.

use std::sync::Arc;

use kyc_store::{IdentityStore, Registration, StoreError};
use kyc_types::mask::{mask_phone, mask_phone_suffix};
use kyc_types::{Gender, Identifier, Profile};
use tracing::info;

use crate::RandomSource;

/// Display names the rich policy draws from.
pub const NAME_POOL: [&str; 5] = [
    "Aarav Patel",
    "Vihaan Singh",
    "Aditya Sharma",
    "Sai Kumar",
    "Reyansh Gupta",
];

/// Inclusive birth-year range of the rich policy.
pub const BIRTH_YEARS: (u32, u32) = (1970, 2000);

/// Phone suffix used when there is no identifier to derive one from.
pub const PLACEHOLDER_PHONE_SUFFIX: &str = "0000";

/// Builds the profile of a newly seen identifier.
pub trait ProfilePolicy: Send + Sync {
    fn profile_for(&self, identifier: &Identifier) -> Profile;

    /// Human-readable name of this policy.
    fn name(&self) -> &'static str;
}

/// Pseudo-random name, birth year and gender; email and phone derived from the
/// identifier.
///
/// Random draws happen in the order name, year, gender.
pub struct RichProfilePolicy {
    random: Arc<dyn RandomSource>,
}

impl RichProfilePolicy {
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }
}

impl ProfilePolicy for RichProfilePolicy {
    fn profile_for(&self, identifier: &Identifier) -> Profile {
        let name = NAME_POOL[self.random.below(NAME_POOL.len() as u32) as usize];
        let (first_year, last_year) = BIRTH_YEARS;
        let year = first_year + self.random.below(last_year - first_year + 1);
        let gender = Gender::ALL[self.random.below(Gender::ALL.len() as u32) as usize];

        Profile::new(
            name,
            format!("{year}-01-01"),
            gender,
            &format!("user{}@example.com", identifier.prefix()),
            mask_phone(identifier),
        )
    }

    fn name(&self) -> &'static str {
        "rich"
    }
}

/// Fixed placeholder profile; only the phone suffix depends on the identifier.
#[derive(Clone, Copy, Debug, Default)]
pub struct MinimalProfilePolicy;

impl ProfilePolicy for MinimalProfilePolicy {
    fn profile_for(&self, identifier: &Identifier) -> Profile {
        let mobile = if identifier.is_absent() {
            mask_phone_suffix(PLACEHOLDER_PHONE_SUFFIX)
        } else {
            mask_phone(identifier)
        };
        Profile::new(
            "Dynamic User",
            "1990-01-01",
            Gender::Male,
            "dynamic@example.com",
            mobile,
        )
    }

    fn name(&self) -> &'static str {
        "minimal"
    }
}

/// Ensure `identifier` has a record, creating one through `policy` if needed.
pub fn register_with(
    store: &dyn IdentityStore,
    identifier: &Identifier,
    policy: &dyn ProfilePolicy,
) -> Result<Registration, StoreError> {
    let registration =
        store.register_if_absent(identifier, &|id: &Identifier| policy.profile_for(id))?;
    if registration.created {
        info!(
            identifier = %identifier,
            policy = policy.name(),
            "auto-registered new identity"
        );
    }
    Ok(registration)
}
