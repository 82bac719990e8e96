//! Legacy-markup (XML) adapter.
//!
//! Requests are form-encoded; responses are XML documents. The two path
//! tokens after the `2.5` version segment are accepted but not interpreted.
//! A missing `uid` maps to the empty identifier, which is auto-registered
//! with a placeholder profile like any other identifier.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Form;
use kyc_types::Identifier;
use kyc_utils::format_timestamp;
use kyc_verification::{register_with, VerificationError};
use serde::Deserialize;
use tracing::{debug, error};

use crate::projection::{kyc_document, kyc_failure, otp_failure, OTP_ACCEPTED};
use crate::AppState;

/// Token reported for every caller-facing redeem failure.
pub const OTP_INVALID: &str = "OTP_INVALID";

const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

#[derive(Debug, Deserialize)]
pub struct LegacyTokens {
    pub version: String,
    pub variant: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct LegacyForm {
    pub uid: Option<String>,
    pub otp: Option<String>,
}

impl LegacyForm {
    fn identifier(&self) -> Identifier {
        self.uid.clone().map(Identifier::from).unwrap_or_default()
    }
}

fn xml(status: StatusCode, body: String) -> Response {
    (status, [(header::CONTENT_TYPE, "application/xml")], body).into_response()
}

/// `POST /uidotp/2.5/{version}/{variant}`
pub async fn generate_otp(
    State(state): State<AppState>,
    Path(tokens): Path<LegacyTokens>,
    form: Option<Form<LegacyForm>>,
) -> Response {
    let form = form.map(|Form(f)| f).unwrap_or_default();
    let identifier = form.identifier();
    debug!(
        version = %tokens.version,
        variant = %tokens.variant,
        absent = identifier.is_absent(),
        "legacy otp request"
    );

    let issued = register_with(state.store(), &identifier, state.minimal_policy.as_ref())
        .map_err(VerificationError::from)
        .and_then(|_| state.challenges.issue(&identifier));

    match issued {
        Ok(_) => xml(StatusCode::OK, OTP_ACCEPTED.to_string()),
        Err(e) => {
            error!(error = %e, "legacy otp request failed");
            xml(StatusCode::INTERNAL_SERVER_ERROR, otp_failure(INTERNAL_ERROR))
        }
    }
}

/// `POST /uidkyc/kyc/2.5/{version}/{variant}`
pub async fn ekyc(
    State(state): State<AppState>,
    Path(tokens): Path<LegacyTokens>,
    form: Option<Form<LegacyForm>>,
) -> Response {
    let form = form.map(|Form(f)| f).unwrap_or_default();
    let identifier = form.identifier();
    debug!(version = %tokens.version, variant = %tokens.variant, "legacy kyc request");

    match state
        .challenges
        .redeem(&identifier, form.otp.as_deref().unwrap_or_default())
    {
        Ok(record) => {
            let ts = format_timestamp(state.clock.now());
            xml(StatusCode::OK, kyc_document(&record, &ts))
        }
        Err(e) if e.is_caller_fault() => xml(StatusCode::BAD_REQUEST, kyc_failure(OTP_INVALID)),
        Err(e) => {
            error!(error = %e, "legacy kyc request failed");
            xml(StatusCode::INTERNAL_SERVER_ERROR, kyc_failure(INTERNAL_ERROR))
        }
    }
}
