//! Credential store trait defining the persistence seam for verification.

use async_trait::async_trait;

use crate::domain::entities::attempt::VerificationOutcome;
use crate::domain::value_objects::Credential;
use crate::errors::DomainError;
use kg_shared::types::{MonotonicMillis, UserId};

/// Persistence and comparison seam for credentials and lockout deadlines.
///
/// The store owns credential comparison (hashing, pattern matching) and the
/// durable lockout state; the controller only reads and writes through these
/// calls and never caches across process restarts. Writes are ordered: a
/// deadline read always observes the most recent write for that user from
/// the same process.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Read the persisted lockout deadline for `user_id`.
    ///
    /// Returns zero when no lockout is in force, including when a previously
    /// persisted deadline has already passed.
    async fn lockout_deadline(&self, user_id: UserId) -> Result<MonotonicMillis, DomainError>;

    /// Persist a lockout window of `timeout_ms` starting now.
    ///
    /// # Returns
    ///
    /// The resulting deadline timestamp on the monotonic clock.
    async fn set_lockout_deadline(
        &self,
        user_id: UserId,
        timeout_ms: u64,
    ) -> Result<MonotonicMillis, DomainError>;

    /// Compare `credential` against the stored credential for `user_id`.
    ///
    /// The outcome folds store-side policy in: a mismatch may carry a
    /// positive lockout timeout when the store decides a cooldown is due.
    async fn check_credential(
        &self,
        credential: &Credential,
        user_id: UserId,
    ) -> Result<VerificationOutcome, DomainError>;

    /// Number of failed attempts recorded since the last successful match
    async fn failed_attempt_count(&self, user_id: UserId) -> Result<u32, DomainError>;
}
