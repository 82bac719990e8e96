//! Response projection of identity records.
//!
//! Records hold their email and phone already masked, so this layer only
//! reshapes stored values for each wire format. The identifier is the one
//! attribute masked here, as `XXXX-XXXX-1234`.

use kyc_types::{Gender, IdentityRecord};
use serde::Serialize;

/// The `kyc` object of a structured-data verify response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct KycView {
    pub name: String,
    pub dob: String,
    pub gender: Gender,
    pub email: String,
    pub mobile: String,
    pub aadhaar_masked: String,
}

impl From<&IdentityRecord> for KycView {
    fn from(record: &IdentityRecord) -> Self {
        let profile = &record.profile;
        Self {
            name: profile.name.clone(),
            dob: profile.dob.clone(),
            gender: profile.gender,
            email: profile.email.clone(),
            mobile: profile.mobile.clone(),
            aadhaar_masked: record.masked_identifier(),
        }
    }
}

/// Legacy issue acknowledgement.
pub const OTP_ACCEPTED: &str = "<OtpRes ret='y'/>";

/// Legacy failure document carrying `err`.
pub fn kyc_failure(err: &str) -> String {
    format!("<KycRes ret='n' err='{}'/>", escape_xml(err))
}

/// Legacy issue failure carrying `err`.
pub fn otp_failure(err: &str) -> String {
    format!("<OtpRes ret='n' err='{}'/>", escape_xml(err))
}

/// Legacy success document for a verified record, stamped with `ts`.
pub fn kyc_document(record: &IdentityRecord, ts: &str) -> String {
    let p = &record.profile;
    format!(
        "<KycRes ret=\"y\" ts=\"{ts}\">\n  <UidData>\n    <Poi name=\"{name}\" dob=\"{dob}\" gender=\"{gender}\"/>\n    <Contact email=\"{email}\" mobile=\"{mobile}\"/>\n  </UidData>\n</KycRes>",
        ts = escape_xml(ts),
        name = escape_xml(&p.name),
        dob = escape_xml(&p.dob),
        gender = p.gender.as_code(),
        email = escape_xml(&p.email),
        mobile = escape_xml(&p.mobile),
    )
}

/// Escape a value for use inside an XML attribute.
pub fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}
