//! In-memory credential store for device-local use and tests.

use async_trait::async_trait;
use constant_time_eq::constant_time_eq;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::domain::entities::attempt::{AttemptRecord, VerificationOutcome};
use crate::domain::value_objects::Credential;
use crate::errors::DomainError;
use crate::services::clock::Clock;
use kg_shared::types::{MonotonicMillis, UserId};

use super::r#trait::CredentialStore;

/// Store-side lockout policy for the in-memory implementation
#[derive(Debug, Clone)]
pub struct InMemoryStoreConfig {
    /// Every Nth consecutive failure makes the mismatch carry a lockout window
    pub failures_before_lockout: u32,
    /// Lockout window reported when the failure threshold is hit, in milliseconds
    pub lockout_timeout_ms: u64,
}

impl Default for InMemoryStoreConfig {
    fn default() -> Self {
        Self {
            failures_before_lockout: 5,
            lockout_timeout_ms: 30_000,
        }
    }
}

#[derive(Default)]
struct UserSlot {
    expected: Option<String>,
    deadline: MonotonicMillis,
    failures: Vec<AttemptRecord>,
}

/// In-memory implementation of [`CredentialStore`].
///
/// Keeps one slot per user with the enrolled credential, the persisted
/// lockout deadline, and the failed-attempt log backing
/// [`CredentialStore::failed_attempt_count`]. Comparison is constant-time.
pub struct InMemoryCredentialStore<K: Clock> {
    clock: Arc<K>,
    config: InMemoryStoreConfig,
    slots: RwLock<HashMap<UserId, UserSlot>>,
}

impl<K: Clock> InMemoryCredentialStore<K> {
    /// Create a new store with the given lockout policy
    pub fn new(clock: Arc<K>, config: InMemoryStoreConfig) -> Self {
        Self {
            clock,
            config,
            slots: RwLock::new(HashMap::new()),
        }
    }

    /// Create a new store with the default lockout policy
    pub fn with_defaults(clock: Arc<K>) -> Self {
        Self::new(clock, InMemoryStoreConfig::default())
    }

    /// Enroll the expected credential for `user_id`, replacing any previous one
    pub async fn enroll(&self, user_id: UserId, credential: &Credential) {
        let mut slots = self.slots.write().await;
        let slot = slots.entry(user_id).or_default();
        slot.expected = Some(credential.expose().to_string());
        slot.failures.clear();
        debug!(user_id = %user_id, "Enrolled credential");
    }
}

#[async_trait]
impl<K: Clock> CredentialStore for InMemoryCredentialStore<K> {
    async fn lockout_deadline(&self, user_id: UserId) -> Result<MonotonicMillis, DomainError> {
        let slots = self.slots.read().await;
        let deadline = slots.get(&user_id).map(|slot| slot.deadline).unwrap_or(0);

        // A passed deadline reads as "no lockout"
        if deadline <= self.clock.now_millis() {
            Ok(0)
        } else {
            Ok(deadline)
        }
    }

    async fn set_lockout_deadline(
        &self,
        user_id: UserId,
        timeout_ms: u64,
    ) -> Result<MonotonicMillis, DomainError> {
        let deadline = self.clock.now_millis() + timeout_ms;
        let mut slots = self.slots.write().await;
        slots.entry(user_id).or_default().deadline = deadline;

        debug!(
            user_id = %user_id,
            timeout_ms = timeout_ms,
            deadline = deadline,
            "Persisted lockout deadline"
        );
        Ok(deadline)
    }

    async fn check_credential(
        &self,
        credential: &Credential,
        user_id: UserId,
    ) -> Result<VerificationOutcome, DomainError> {
        let mut slots = self.slots.write().await;
        let slot = slots.entry(user_id).or_default();

        let matched = match &slot.expected {
            Some(expected) => {
                constant_time_eq(expected.as_bytes(), credential.expose().as_bytes())
            }
            None => false,
        };

        if matched {
            slot.failures.clear();
            return Ok(VerificationOutcome::matched());
        }

        let failures = slot.failures.len() as u32 + 1;
        let outcome = if failures % self.config.failures_before_lockout == 0 {
            VerificationOutcome::lockout(self.config.lockout_timeout_ms)
        } else {
            VerificationOutcome::mismatch()
        };
        slot.failures
            .push(AttemptRecord::failure(user_id, outcome.lockout_timeout_ms));

        warn!(
            user_id = %user_id,
            failures = failures,
            lockout_timeout_ms = outcome.lockout_timeout_ms,
            "Credential mismatch recorded"
        );
        Ok(outcome)
    }

    async fn failed_attempt_count(&self, user_id: UserId) -> Result<u32, DomainError> {
        let slots = self.slots.read().await;
        Ok(slots
            .get(&user_id)
            .map(|slot| slot.failures.len() as u32)
            .unwrap_or(0))
    }
}
