//! Pre-registered sandbox identities.

use kyc_store::{IdentityStore, StoreError};
use kyc_types::{Gender, Identifier, Profile};
use tracing::info;

struct SandboxIdentity {
    identifier: &'static str,
    name: &'static str,
    dob: &'static str,
    gender: Gender,
    email: &'static str,
    mobile: &'static str,
}

const SANDBOX: [SandboxIdentity; 3] = [
    SandboxIdentity {
        identifier: "999941057058",
        name: "Shivshankar Choudhury",
        dob: "1968-05-13",
        gender: Gender::Male,
        email: "s****y@dummyemail.com",
        mobile: "******6979",
    },
    SandboxIdentity {
        identifier: "123456789012",
        name: "Priya Sharma",
        dob: "1990-08-25",
        gender: Gender::Female,
        email: "p****a@email.com",
        mobile: "******1234",
    },
    SandboxIdentity {
        identifier: "987654321098",
        name: "Rajesh Kumar",
        dob: "1985-03-15",
        gender: Gender::Male,
        email: "r****h@email.com",
        mobile: "******5678",
    },
];

/// The sandbox identities with their (already masked) profiles.
pub fn sandbox_profiles() -> Vec<(Identifier, Profile)> {
    SANDBOX
        .iter()
        .map(|s| {
            (
                Identifier::new(s.identifier),
                Profile::new(s.name, s.dob, s.gender, s.email, s.mobile),
            )
        })
        .collect()
}

/// Upsert every sandbox identity into `store`. Returns the identifiers seeded.
pub fn seed_sandbox(store: &dyn IdentityStore) -> Result<Vec<Identifier>, StoreError> {
    let mut seeded = Vec::with_capacity(SANDBOX.len());
    for (identifier, profile) in sandbox_profiles() {
        info!(identifier = %identifier, name = %profile.name, "seeded sandbox identity");
        store.upsert(&identifier, profile)?;
        seeded.push(identifier);
    }
    Ok(seeded)
}
