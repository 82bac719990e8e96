//! Subject identifier (the national-ID-like key every record hangs off).

use serde::{Deserialize, Serialize};
use std::fmt;

/// The unique key of an identity record.
///
/// Identifiers are opaque strings. The empty identifier is a legal key: the
/// legacy markup API maps a missing `uid` field onto it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Identifier(String);

impl Identifier {
    /// Number of characters used when deriving prefixes and suffixes.
    pub const AFFIX_LEN: usize = 4;

    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The key used when a caller supplied no identifier at all.
    pub fn absent() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_absent(&self) -> bool {
        self.0.is_empty()
    }

    /// The first [`Self::AFFIX_LEN`] characters, or the whole identifier if it
    /// is shorter.
    pub fn prefix(&self) -> &str {
        first_chars(&self.0, Self::AFFIX_LEN)
    }

    /// The last [`Self::AFFIX_LEN`] characters, or the whole identifier if it
    /// is shorter.
    pub fn suffix(&self) -> &str {
        last_chars(&self.0, Self::AFFIX_LEN)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Identifier {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// Character-based so multi-byte input never splits a code point.

fn first_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

fn last_chars(s: &str, n: usize) -> &str {
    let count = s.chars().count();
    if count <= n {
        return s;
    }
    match s.char_indices().nth(count - n) {
        Some((idx, _)) => &s[idx..],
        None => s,
    }
}
