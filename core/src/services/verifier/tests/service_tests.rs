//! Tests for cancellable verification requests

use async_trait::async_trait;
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;
use uuid::Uuid;

use crate::domain::entities::attempt::VerificationOutcome;
use crate::domain::value_objects::Credential;
use crate::errors::{DomainError, StoreError};
use crate::repositories::CredentialStore;
use crate::services::verifier::{CredentialVerifier, OutcomeSink};
use kg_shared::types::{MonotonicMillis, UserId};

/// Scriptable store: fixed outcome, optional delay, optional failure
struct ScriptedStore {
    outcome: VerificationOutcome,
    delay: Option<Duration>,
    fail: bool,
}

impl ScriptedStore {
    fn resolving(outcome: VerificationOutcome) -> Self {
        Self {
            outcome,
            delay: None,
            fail: false,
        }
    }

    fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    fn failing() -> Self {
        Self {
            outcome: VerificationOutcome::mismatch(),
            delay: None,
            fail: true,
        }
    }
}

#[async_trait]
impl CredentialStore for ScriptedStore {
    async fn lockout_deadline(&self, _user_id: UserId) -> Result<MonotonicMillis, DomainError> {
        Ok(0)
    }

    async fn set_lockout_deadline(
        &self,
        _user_id: UserId,
        _timeout_ms: u64,
    ) -> Result<MonotonicMillis, DomainError> {
        Ok(0)
    }

    async fn check_credential(
        &self,
        _credential: &Credential,
        _user_id: UserId,
    ) -> Result<VerificationOutcome, DomainError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(StoreError::Unavailable {
                message: "scripted failure".to_string(),
            }
            .into());
        }
        Ok(self.outcome)
    }

    async fn failed_attempt_count(&self, _user_id: UserId) -> Result<u32, DomainError> {
        Ok(0)
    }
}

/// Sink recording every delivery
#[derive(Default)]
struct RecordingSink {
    deliveries: Mutex<Vec<(Uuid, VerificationOutcome)>>,
}

impl RecordingSink {
    fn delivered(&self) -> Vec<(Uuid, VerificationOutcome)> {
        self.deliveries.lock().unwrap().clone()
    }
}

#[async_trait]
impl OutcomeSink for RecordingSink {
    async fn on_outcome(
        &self,
        request_id: Uuid,
        _credential: Credential,
        outcome: VerificationOutcome,
    ) {
        self.deliveries.lock().unwrap().push((request_id, outcome));
    }
}

/// Coerce a concrete sink handle into a `Weak<dyn OutcomeSink>` without
/// leaving an extra strong reference alive.
fn weak_sink(sink: &Arc<RecordingSink>) -> Weak<dyn OutcomeSink> {
    let dyn_sink: Arc<dyn OutcomeSink> = sink.clone();
    Arc::downgrade(&dyn_sink)
}

async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}

#[tokio::test(start_paused = true)]
async fn test_outcome_delivered_exactly_once() {
    let verifier = CredentialVerifier::new(Arc::new(ScriptedStore::resolving(
        VerificationOutcome::matched(),
    )));
    let sink = Arc::new(RecordingSink::default());

    let pending = verifier.check(
        Credential::new("1234"),
        UserId::PRIMARY,
        weak_sink(&sink),
    );
    settle().await;

    let delivered = sink.delivered();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].0, pending.request_id());
    assert!(delivered[0].1.matched);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_suppresses_delivery() {
    let verifier = CredentialVerifier::new(Arc::new(
        ScriptedStore::resolving(VerificationOutcome::matched())
            .with_delay(Duration::from_millis(500)),
    ));
    let sink = Arc::new(RecordingSink::default());

    let pending = verifier.check(
        Credential::new("1234"),
        UserId::PRIMARY,
        weak_sink(&sink),
    );
    pending.cancel();

    tokio::time::sleep(Duration::from_millis(1000)).await;
    assert!(sink.delivered().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_cancel_is_idempotent() {
    let verifier = CredentialVerifier::new(Arc::new(
        ScriptedStore::resolving(VerificationOutcome::matched())
            .with_delay(Duration::from_millis(500)),
    ));
    let sink = Arc::new(RecordingSink::default());

    let pending = verifier.check(
        Credential::new("1234"),
        UserId::PRIMARY,
        weak_sink(&sink),
    );
    pending.cancel();
    pending.cancel();

    tokio::time::sleep(Duration::from_millis(1000)).await;
    assert!(sink.delivered().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_store_failure_folds_into_mismatch() {
    let verifier = CredentialVerifier::new(Arc::new(ScriptedStore::failing()));
    let sink = Arc::new(RecordingSink::default());

    verifier.check(
        Credential::new("1234"),
        UserId::PRIMARY,
        weak_sink(&sink),
    );
    settle().await;

    let delivered = sink.delivered();
    assert_eq!(delivered.len(), 1);
    assert!(!delivered[0].1.matched);
    assert_eq!(delivered[0].1.lockout_timeout_ms, 0);
}

#[tokio::test(start_paused = true)]
async fn test_dropped_sink_is_skipped() {
    let verifier = CredentialVerifier::new(Arc::new(ScriptedStore::resolving(
        VerificationOutcome::matched(),
    )));
    let sink = Arc::new(RecordingSink::default());
    let weak = weak_sink(&sink);
    drop(sink);

    verifier.check(Credential::new("1234"), UserId::PRIMARY, weak);
    settle().await;
    // nothing to assert beyond the task not panicking
}
