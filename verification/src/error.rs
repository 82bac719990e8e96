use kyc_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("identifier is required")]
    IdentifierMissing,

    #[error("unknown identifier: {0}")]
    IdentifierUnknown(String),

    #[error("challenge code mismatch for {0}")]
    ChallengeMismatch(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl VerificationError {
    /// Stable token reported to callers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::IdentifierMissing => "UID_REQUIRED",
            Self::IdentifierUnknown(_) => "UID_INVALID",
            Self::ChallengeMismatch(_) => "OTP_INVALID",
            Self::Store(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the fault lies with the caller's input.
    pub fn is_caller_fault(&self) -> bool {
        !matches!(self, Self::Store(_))
    }
}
