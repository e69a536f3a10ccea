//! Cancellable asynchronous verification requests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::entities::attempt::VerificationOutcome;
use crate::domain::value_objects::Credential;
use crate::repositories::CredentialStore;
use kg_shared::types::UserId;

/// Receiver for verification outcomes.
///
/// Invoked at most once per request, never for a cancelled one. The sink is
/// responsible for serializing delivery with its other operations.
#[async_trait]
pub trait OutcomeSink: Send + Sync {
    async fn on_outcome(
        &self,
        request_id: Uuid,
        credential: Credential,
        outcome: VerificationOutcome,
    );
}

/// Handle to one in-flight verification request.
///
/// Dropping the handle does not cancel the request; call [`cancel`] to
/// suppress delivery.
///
/// [`cancel`]: PendingVerification::cancel
#[derive(Debug)]
pub struct PendingVerification {
    request_id: Uuid,
    cancelled: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl PendingVerification {
    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    /// Suppress outcome delivery for this request.
    ///
    /// The sink will not fire after this returns. The store-side comparison
    /// may still run to completion; only delivery is guaranteed suppressed.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.task.abort();
        debug!(
            request_id = %self.request_id,
            event = "verification_cancelled",
            "Cancelled pending verification"
        );
    }
}

/// Thin asynchronous boundary to the credential store.
///
/// Comparison work happens off the caller's context in a spawned task; the
/// outcome is handed back through the [`OutcomeSink`].
pub struct CredentialVerifier<S: CredentialStore + 'static> {
    store: Arc<S>,
}

impl<S: CredentialStore + 'static> CredentialVerifier<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Start one out-of-band comparison for `credential`.
    ///
    /// Returns a cancellable handle immediately. The outcome is delivered to
    /// `sink` exactly once unless the handle is cancelled first or the sink
    /// has been dropped. A store failure is folded into a mismatch outcome;
    /// distinguishing "wrong credential" from "store malfunction" is the
    /// store layer's concern.
    pub fn check(
        &self,
        credential: Credential,
        user_id: UserId,
        sink: Weak<dyn OutcomeSink>,
    ) -> PendingVerification {
        let request_id = Uuid::new_v4();
        let cancelled = Arc::new(AtomicBool::new(false));
        let store = Arc::clone(&self.store);
        let task_cancelled = Arc::clone(&cancelled);

        debug!(
            request_id = %request_id,
            user_id = %user_id,
            event = "verification_started",
            "Issued credential check"
        );

        let task = tokio::spawn(async move {
            let outcome = match store.check_credential(&credential, user_id).await {
                Ok(outcome) => outcome,
                Err(error) => {
                    warn!(
                        request_id = %request_id,
                        error = %error,
                        "Credential check failed; treating as mismatch"
                    );
                    VerificationOutcome::mismatch()
                }
            };

            if task_cancelled.load(Ordering::SeqCst) {
                return;
            }
            let Some(sink) = sink.upgrade() else {
                return;
            };
            sink.on_outcome(request_id, credential, outcome).await;
        });

        PendingVerification {
            request_id,
            cancelled,
            task,
        }
    }
}
