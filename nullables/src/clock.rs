//! Nullable clock — deterministic time for testing.

use chrono::{DateTime, Duration, TimeZone, Utc};
use kyc_utils::Clock;
use std::sync::Mutex;

/// A deterministic clock for testing.
///
/// Time only advances when you tell it to.
pub struct NullClock {
    current: Mutex<DateTime<Utc>>,
}

impl NullClock {
    pub fn new(initial: DateTime<Utc>) -> Self {
        Self {
            current: Mutex::new(initial),
        }
    }

    /// A clock starting at the given Unix second.
    pub fn from_unix_secs(secs: i64) -> Self {
        Self::new(Utc.timestamp_opt(secs, 0).single().unwrap_or_default())
    }

    /// Advance time by a number of seconds.
    pub fn advance(&self, secs: i64) {
        if let Ok(mut current) = self.current.lock() {
            *current += Duration::seconds(secs);
        }
    }

    /// Set the time to a specific value.
    pub fn set(&self, at: DateTime<Utc>) {
        if let Ok(mut current) = self.current.lock() {
            *current = at;
        }
    }
}

impl Clock for NullClock {
    fn now(&self) -> DateTime<Utc> {
        self.current.lock().map(|c| *c).unwrap_or_default()
    }
}
