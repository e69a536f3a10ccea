//! Common type definitions and utilities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wall-clock timestamp type alias
pub type Timestamp = DateTime<Utc>;

/// Milliseconds on a monotonic clock.
///
/// Lockout deadlines are expressed on this clock rather than wall time, so a
/// deadline survives wall-clock changes. By convention a value of zero means
/// "no deadline".
pub type MonotonicMillis = u64;

/// Device-local user slot identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub u32);

impl UserId {
    /// The primary user slot
    pub const PRIMARY: UserId = UserId(0);
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for UserId {
    fn from(value: u32) -> Self {
        UserId(value)
    }
}
