//! Attempt evaluation entities: outcomes, phases, and audit records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kg_shared::types::UserId;

/// Minimum entry length before an attempt is handed to the verifier.
///
/// Entries shorter than this still count as failed attempts but never reach
/// the credential store, so incidental input (pocket presses, stray touches)
/// cannot provoke a lockout.
pub const MINIMUM_LENGTH_BEFORE_REPORT: usize = 3;

/// Result of one credential verification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationOutcome {
    /// Whether the credential matched the stored one
    pub matched: bool,
    /// Duration of the new lockout window in milliseconds; zero when the
    /// failure carries no lockout. Unused when `matched` is true.
    pub lockout_timeout_ms: u64,
}

impl VerificationOutcome {
    /// Outcome for a matched credential
    pub fn matched() -> Self {
        Self {
            matched: true,
            lockout_timeout_ms: 0,
        }
    }

    /// Outcome for a normal failed attempt with no new lockout
    pub fn mismatch() -> Self {
        Self {
            matched: false,
            lockout_timeout_ms: 0,
        }
    }

    /// Outcome for a failed attempt that starts a lockout window
    pub fn lockout(timeout_ms: u64) -> Self {
        Self {
            matched: false,
            lockout_timeout_ms: timeout_ms,
        }
    }

    /// Whether this outcome starts a new lockout window
    pub fn triggers_lockout(&self) -> bool {
        !self.matched && self.lockout_timeout_ms > 0
    }
}

/// Externally observable controller phase. Exactly one holds at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptPhase {
    /// Accepting input; no verification in flight
    Idle,
    /// A verification request is pending
    Verifying,
    /// Attempts are disallowed until the lockout deadline passes
    LockedOut,
}

/// Audit record of one evaluated attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptRecord {
    /// Unique identifier for the record
    pub id: Uuid,

    /// User slot the attempt was made against
    pub user_id: UserId,

    /// Whether the credential matched
    pub succeeded: bool,

    /// Lockout window the attempt triggered, zero for none
    pub lockout_timeout_ms: u64,

    /// Wall-clock timestamp of the evaluation
    pub occurred_at: DateTime<Utc>,
}

impl AttemptRecord {
    /// Record a successful attempt
    pub fn success(user_id: UserId) -> Self {
        Self::new(user_id, true, 0)
    }

    /// Record a failed attempt, with the lockout window it triggered (if any)
    pub fn failure(user_id: UserId, lockout_timeout_ms: u64) -> Self {
        Self::new(user_id, false, lockout_timeout_ms)
    }

    fn new(user_id: UserId, succeeded: bool, lockout_timeout_ms: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            succeeded,
            lockout_timeout_ms,
            occurred_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matched_outcome_never_triggers_lockout() {
        let outcome = VerificationOutcome::matched();
        assert!(outcome.matched);
        assert!(!outcome.triggers_lockout());
    }

    #[test]
    fn test_mismatch_with_zero_timeout_is_plain_failure() {
        let outcome = VerificationOutcome::mismatch();
        assert!(!outcome.matched);
        assert_eq!(outcome.lockout_timeout_ms, 0);
        assert!(!outcome.triggers_lockout());
    }

    #[test]
    fn test_positive_timeout_triggers_lockout() {
        let outcome = VerificationOutcome::lockout(30_000);
        assert!(!outcome.matched);
        assert!(outcome.triggers_lockout());
    }

    #[test]
    fn test_failure_record_carries_timeout() {
        let record = AttemptRecord::failure(UserId(3), 30_000);
        assert!(!record.succeeded);
        assert_eq!(record.lockout_timeout_ms, 30_000);
        assert_eq!(record.user_id, UserId(3));
    }

    #[test]
    fn test_success_record() {
        let record = AttemptRecord::success(UserId::PRIMARY);
        assert!(record.succeeded);
        assert_eq!(record.lockout_timeout_ms, 0);
    }
}
