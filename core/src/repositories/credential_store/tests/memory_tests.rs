//! Tests for the in-memory credential store

use std::sync::Arc;
use std::time::Duration;

use crate::domain::value_objects::Credential;
use crate::repositories::credential_store::{
    CredentialStore, InMemoryCredentialStore, InMemoryStoreConfig,
};
use crate::services::clock::MonotonicClock;
use kg_shared::types::UserId;

fn store() -> InMemoryCredentialStore<MonotonicClock> {
    InMemoryCredentialStore::with_defaults(Arc::new(MonotonicClock::new()))
}

#[tokio::test]
async fn test_enrolled_credential_matches() {
    let store = store();
    let user = UserId::PRIMARY;
    store.enroll(user, &Credential::new("1234")).await;

    let outcome = store
        .check_credential(&Credential::new("1234"), user)
        .await
        .unwrap();
    assert!(outcome.matched);
    assert_eq!(store.failed_attempt_count(user).await.unwrap(), 0);
}

#[tokio::test]
async fn test_mismatch_increments_failure_log() {
    let store = store();
    let user = UserId::PRIMARY;
    store.enroll(user, &Credential::new("1234")).await;

    let outcome = store
        .check_credential(&Credential::new("9999"), user)
        .await
        .unwrap();
    assert!(!outcome.matched);
    assert_eq!(outcome.lockout_timeout_ms, 0);
    assert_eq!(store.failed_attempt_count(user).await.unwrap(), 1);
}

#[tokio::test]
async fn test_success_clears_failure_log() {
    let store = store();
    let user = UserId::PRIMARY;
    store.enroll(user, &Credential::new("1234")).await;

    store
        .check_credential(&Credential::new("0000"), user)
        .await
        .unwrap();
    store
        .check_credential(&Credential::new("1111"), user)
        .await
        .unwrap();
    assert_eq!(store.failed_attempt_count(user).await.unwrap(), 2);

    store
        .check_credential(&Credential::new("1234"), user)
        .await
        .unwrap();
    assert_eq!(store.failed_attempt_count(user).await.unwrap(), 0);
}

#[tokio::test]
async fn test_threshold_failure_carries_lockout_timeout() {
    let config = InMemoryStoreConfig {
        failures_before_lockout: 3,
        lockout_timeout_ms: 30_000,
    };
    let store = InMemoryCredentialStore::new(Arc::new(MonotonicClock::new()), config);
    let user = UserId::PRIMARY;
    store.enroll(user, &Credential::new("1234")).await;

    for _ in 0..2 {
        let outcome = store
            .check_credential(&Credential::new("0000"), user)
            .await
            .unwrap();
        assert!(!outcome.triggers_lockout());
    }

    let outcome = store
        .check_credential(&Credential::new("0000"), user)
        .await
        .unwrap();
    assert!(outcome.triggers_lockout());
    assert_eq!(outcome.lockout_timeout_ms, 30_000);
}

#[tokio::test]
async fn test_unenrolled_user_never_matches() {
    let store = store();
    let outcome = store
        .check_credential(&Credential::new("1234"), UserId(9))
        .await
        .unwrap();
    assert!(!outcome.matched);
}

#[tokio::test(start_paused = true)]
async fn test_deadline_roundtrip_and_expiry() {
    let store = store();
    let user = UserId::PRIMARY;
    assert_eq!(store.lockout_deadline(user).await.unwrap(), 0);

    let deadline = store.set_lockout_deadline(user, 5000).await.unwrap();
    assert_eq!(store.lockout_deadline(user).await.unwrap(), deadline);

    tokio::time::advance(Duration::from_millis(4999)).await;
    assert_eq!(store.lockout_deadline(user).await.unwrap(), deadline);

    tokio::time::advance(Duration::from_millis(1)).await;
    assert_eq!(store.lockout_deadline(user).await.unwrap(), 0);
}
