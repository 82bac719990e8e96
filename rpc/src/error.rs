//! RPC error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use kyc_store::StoreError;
use kyc_verification::VerificationError;
use thiserror::Error;

use crate::structured::FailureResponse;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error(transparent)]
    Verification(#[from] VerificationError),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StoreError> for RpcError {
    fn from(e: StoreError) -> Self {
        RpcError::Verification(VerificationError::Store(e))
    }
}

impl RpcError {
    pub fn status(&self) -> StatusCode {
        match self {
            RpcError::Verification(e) if e.is_caller_fault() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Caller-facing message of the structured-data failure envelope.
    pub fn public_message(&self) -> &'static str {
        match self {
            RpcError::Verification(VerificationError::IdentifierMissing) => {
                "Aadhaar number is required"
            }
            RpcError::Verification(VerificationError::IdentifierUnknown(_)) => {
                "Invalid Aadhaar number"
            }
            RpcError::Verification(VerificationError::ChallengeMismatch(_)) => "Invalid OTP",
            _ => "Internal server error",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            RpcError::Verification(e) => e.code(),
            _ => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = FailureResponse {
            success: false,
            error: self.public_message(),
            code: self.code(),
        };
        (status, Json(body)).into_response()
    }
}
