//! Lockout enforcement policy.

use std::fmt;
use std::sync::Arc;

use kg_shared::types::MonotonicMillis;

/// Decides whether a persisted deadline still enforces a lockout.
///
/// The default treats any non-zero deadline as enforcing. A concrete
/// deployment may weaken this (a PIN-only build may ignore deadlines written
/// by other credential kinds), but the default stays the baseline contract.
#[derive(Clone)]
pub struct LockoutPolicy {
    predicate: Arc<dyn Fn(MonotonicMillis) -> bool + Send + Sync>,
}

impl LockoutPolicy {
    pub fn new(predicate: impl Fn(MonotonicMillis) -> bool + Send + Sync + 'static) -> Self {
        Self {
            predicate: Arc::new(predicate),
        }
    }

    pub fn should_lockout(&self, deadline: MonotonicMillis) -> bool {
        (self.predicate)(deadline)
    }
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self::new(|deadline| deadline != 0)
    }
}

impl fmt::Debug for LockoutPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LockoutPolicy")
    }
}
