//! Lockout state entity tracking the active deadline.

use serde::{Deserialize, Serialize};

use kg_shared::types::MonotonicMillis;
use kg_shared::utils::time::{ceil_seconds_remaining, remaining_ms};

/// Lockout window state for one controller.
///
/// The deadline is a monotonic timestamp. Once armed it can only be replaced
/// by a later deadline; it is cleared by expiry or an explicit reset, never
/// decreased.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockoutState {
    deadline: Option<MonotonicMillis>,
}

impl LockoutState {
    /// State with no active lockout
    pub fn none() -> Self {
        Self { deadline: None }
    }

    /// Arm the lockout at `deadline`. An already armed later deadline wins,
    /// so the window never shrinks.
    pub fn arm(&mut self, deadline: MonotonicMillis) {
        self.deadline = Some(match self.deadline {
            Some(current) => current.max(deadline),
            None => deadline,
        });
    }

    /// Clear the lockout (expiry or explicit reset)
    pub fn clear(&mut self) {
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<MonotonicMillis> {
        self.deadline
    }

    /// Whether a lockout is enforced at `now`
    pub fn is_active(&self, now: MonotonicMillis) -> bool {
        self.remaining_ms(now) > 0
    }

    /// Milliseconds remaining at `now`; zero when not armed or expired
    pub fn remaining_ms(&self, now: MonotonicMillis) -> u64 {
        self.deadline.map(|d| remaining_ms(d, now)).unwrap_or(0)
    }

    /// Whole seconds remaining at `now`, rounded up
    pub fn remaining_seconds(&self, now: MonotonicMillis) -> u32 {
        self.deadline
            .map(|d| ceil_seconds_remaining(d, now))
            .unwrap_or(0)
    }
}
