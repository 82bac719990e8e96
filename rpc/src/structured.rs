//! Structured-data (JSON) adapter.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use kyc_types::Identifier;
use kyc_verification::{register_with, VerificationError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::projection::KycView;
use crate::{AppState, RpcError};

pub const OTP_SENT_MESSAGE: &str = "OTP sent to registered mobile number";

// ── Requests ─────────────────────────────────────────────────────────────

/// Body of `POST /api/otp/request`. The identifier may arrive as `aadhaar`
/// or `uid`; the first non-empty one wins.
#[derive(Debug, Default, Deserialize)]
pub struct OtpRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub aadhaar: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub uid: Option<String>,
}

impl OtpRequest {
    pub fn identifier(&self) -> Option<Identifier> {
        first_present(&self.aadhaar, &self.uid)
    }
}

/// Body of `POST /api/otp/verify`.
#[derive(Debug, Default, Deserialize)]
pub struct VerifyRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub aadhaar: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub uid: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub otp: Option<String>,
}

impl VerifyRequest {
    pub fn identifier(&self) -> Option<Identifier> {
        first_present(&self.aadhaar, &self.uid)
    }
}

fn first_present(a: &Option<String>, b: &Option<String>) -> Option<Identifier> {
    [a, b]
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
        .map(|s| Identifier::new(s.as_str()))
}

/// Accept strings and numbers; anything else counts as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// A missing or malformed body is treated as an empty object.
fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> T {
    if body.is_empty() {
        return T::default();
    }
    serde_json::from_slice(body).unwrap_or_else(|e| {
        debug!(error = %e, "unparseable JSON body, treating as empty");
        T::default()
    })
}

// ── Responses ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct OtpResponse {
    pub success: bool,
    pub message: &'static str,
    /// Echoes the issued code. Test convenience only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub success: bool,
    pub verified: bool,
    pub kyc: KycView,
}

#[derive(Debug, Serialize)]
pub struct FailureResponse {
    pub success: bool,
    pub error: &'static str,
    pub code: &'static str,
}

// ── Handlers ─────────────────────────────────────────────────────────────

/// `POST /api/otp/request`
pub async fn request_otp(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<OtpResponse>, RpcError> {
    let request: OtpRequest = parse_body(&body);
    let identifier = request
        .identifier()
        .ok_or(VerificationError::IdentifierMissing)?;

    register_with(state.store(), &identifier, state.rich_policy.as_ref())?;
    let code = state.challenges.issue(&identifier)?;

    Ok(Json(OtpResponse {
        success: true,
        message: OTP_SENT_MESSAGE,
        hint: state
            .expose_code_hint
            .then(|| format!("For testing, OTP is: {code}")),
    }))
}

/// `POST /api/otp/verify`
pub async fn verify_otp(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<VerifyResponse>, RpcError> {
    let request: VerifyRequest = parse_body(&body);
    let identifier = request
        .identifier()
        .ok_or_else(|| VerificationError::IdentifierUnknown(String::new()))?;

    let record = state
        .challenges
        .redeem(&identifier, request.otp.as_deref().unwrap_or_default())?;

    Ok(Json(VerifyResponse {
        success: true,
        verified: true,
        kyc: KycView::from(&record),
    }))
}
