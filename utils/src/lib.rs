//! Shared utilities for the mock KYC service.

pub mod logging;
pub mod time;

pub use logging::{init_logging, LogFormat, UnknownLogFormat};
pub use time::{format_timestamp, Clock, SystemClock};
