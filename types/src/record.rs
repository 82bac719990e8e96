//! Identity records and the challenge code stored on them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{mask, Identifier, KycError};

/// Gender code carried on a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn as_code(&self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

impl FromStr for Gender {
    type Err = KycError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" => Ok(Self::Male),
            "F" => Ok(Self::Female),
            other => Err(KycError::InvalidGender(other.to_string())),
        }
    }
}

/// A six-digit, zero-padded one-time code.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChallengeCode(String);

impl ChallengeCode {
    pub const DIGITS: usize = 6;

    /// Exclusive upper bound of the numeric code space.
    pub const SPACE: u32 = 1_000_000;

    /// Build a code from a number, reduced into `000000..=999999`.
    pub fn from_number(n: u32) -> Self {
        Self(format!("{:06}", n % Self::SPACE))
    }

    /// Parse a code, requiring exactly six ASCII digits.
    pub fn new(raw: impl Into<String>) -> Result<Self, KycError> {
        let raw = raw.into();
        if raw.len() == Self::DIGITS && raw.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(raw))
        } else {
            Err(KycError::InvalidChallengeCode(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exact string comparison against a caller-presented code. No trimming
    /// or numeric normalisation.
    pub fn matches(&self, presented: &str) -> bool {
        self.0 == presented
    }
}

impl fmt::Display for ChallengeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ChallengeCode {
    type Error = KycError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ChallengeCode> for String {
    fn from(code: ChallengeCode) -> Self {
        code.0
    }
}

/// The profile attributes of a subject. Email and mobile are stored already
/// masked.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    /// `YYYY-MM-DD`.
    pub dob: String,
    pub gender: Gender,
    pub email: String,
    pub mobile: String,
}

impl Profile {
    /// Build a profile, masking the email. `mobile` must already be masked.
    pub fn new(
        name: impl Into<String>,
        dob: impl Into<String>,
        gender: Gender,
        email: &str,
        mobile: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            dob: dob.into(),
            gender,
            email: mask::mask_email(email),
            mobile: mobile.into(),
        }
    }
}

/// Whether a record currently has a redeemable code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChallengeState {
    NoChallenge,
    ChallengePending,
}

/// One subject known to the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    pub identifier: Identifier,
    pub profile: Profile,
    /// The live code, if one has been issued and not consumed.
    pub challenge: Option<ChallengeCode>,
}

impl IdentityRecord {
    /// A freshly registered record starts with no challenge.
    pub fn new(identifier: Identifier, profile: Profile) -> Self {
        Self {
            identifier,
            profile,
            challenge: None,
        }
    }

    pub fn challenge_state(&self) -> ChallengeState {
        match self.challenge {
            Some(_) => ChallengeState::ChallengePending,
            None => ChallengeState::NoChallenge,
        }
    }

    /// The identifier in `XXXX-XXXX-1234` form.
    pub fn masked_identifier(&self) -> String {
        mask::mask_identifier(&self.identifier)
    }
}
