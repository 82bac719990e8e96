//! Irreversible attribute redaction.
//!
//! Masking is applied once, when a record is created. Responses reuse the
//! stored values verbatim.

use crate::Identifier;

/// Fixed prefix placed in front of the visible phone digits.
pub const PHONE_MASK: &str = "******";

/// Fixed prefix placed in front of the visible identifier digits.
pub const IDENTIFIER_MASK: &str = "XXXX-XXXX-";

/// Run of asterisks replacing the hidden part of an email local part.
pub const EMAIL_MASK: &str = "****";

/// `******` followed by the identifier's last four characters.
pub fn mask_phone(identifier: &Identifier) -> String {
    mask_phone_suffix(identifier.suffix())
}

/// `******` followed by the given suffix, used by fixtures and placeholders.
pub fn mask_phone_suffix(suffix: &str) -> String {
    format!("{PHONE_MASK}{suffix}")
}

/// `XXXX-XXXX-` followed by the identifier's last four characters.
pub fn mask_identifier(identifier: &Identifier) -> String {
    format!("{IDENTIFIER_MASK}{}", identifier.suffix())
}

/// Keep the first and last character of the local part, hide the rest.
///
/// `dynamic@example.com` becomes `d****c@example.com`. Applying the mask to
/// an already masked address returns it unchanged.
pub fn mask_email(email: &str) -> String {
    let (local, domain) = match email.rsplit_once('@') {
        Some((local, domain)) => (local, Some(domain)),
        None => (email, None),
    };

    let mut chars = local.chars();
    let masked_local = match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) => format!("{first}{EMAIL_MASK}{last}"),
        (Some(only), None) => format!("{only}{EMAIL_MASK}{only}"),
        _ => EMAIL_MASK.to_string(),
    };

    match domain {
        Some(domain) => format!("{masked_local}@{domain}"),
        None => masked_local,
    }
}
