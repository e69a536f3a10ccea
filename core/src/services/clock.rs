//! Monotonic clock seam used for deadline arithmetic and countdowns.

use kg_shared::types::MonotonicMillis;

/// Monotonic "now" source.
///
/// Lockout deadlines must survive wall-clock changes, so every time read in
/// this crate goes through this trait rather than the system clock.
pub trait Clock: Send + Sync + 'static {
    /// Milliseconds elapsed on the monotonic clock
    fn now_millis(&self) -> MonotonicMillis;
}

/// Production clock, anchored when constructed.
///
/// Built on `tokio::time::Instant`, so code running under a paused test
/// runtime observes virtual time consistently with timers.
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    origin: tokio::time::Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: tokio::time::Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_millis(&self) -> MonotonicMillis {
        self.origin.elapsed().as_millis() as u64
    }
}
