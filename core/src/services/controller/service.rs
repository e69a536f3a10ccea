//! Main attempt controller implementation.

use async_trait::async_trait;
use std::sync::{Arc, Weak};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::entities::attempt::{AttemptPhase, VerificationOutcome};
use crate::domain::entities::lockout::LockoutState;
use crate::domain::value_objects::Credential;
use crate::errors::{AttemptError, DomainResult};
use crate::repositories::CredentialStore;
use crate::services::clock::Clock;
use crate::services::scheduler::{CountdownObserver, LockoutScheduler};
use crate::services::verifier::{CredentialVerifier, OutcomeSink, PendingVerification};
use kg_shared::config::CountdownConfig;
use kg_shared::types::{MonotonicMillis, SecurityMessage, UserId};

use super::config::AttemptControllerConfig;
use super::policy::LockoutPolicy;
use super::traits::{EntryView, MessageDisplay, SecurityCallback};

struct ControllerState {
    phase: AttemptPhase,
    lockout: LockoutState,
    pending: Option<PendingVerification>,
    initialized: bool,
}

impl ControllerState {
    fn new() -> Self {
        Self {
            phase: AttemptPhase::Idle,
            lockout: LockoutState::none(),
            pending: None,
            initialized: false,
        }
    }

    /// Cancel and drop the pending request, if any. Returns whether one existed.
    fn cancel_pending(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                pending.cancel();
                true
            }
            None => false,
        }
    }
}

struct ControllerInner<S, V, M, C, K>
where
    S: CredentialStore + 'static,
    V: EntryView + 'static,
    M: MessageDisplay + 'static,
    C: SecurityCallback + 'static,
    K: Clock,
{
    store: Arc<S>,
    view: Arc<V>,
    messages: Arc<M>,
    callback: Arc<C>,
    clock: Arc<K>,
    verifier: CredentialVerifier<S>,
    scheduler: LockoutScheduler<K>,
    user_id: UserId,
    config: AttemptControllerConfig,
    policy: LockoutPolicy,
    state: Mutex<ControllerState>,
    weak_self: Weak<Self>,
}

impl<S, V, M, C, K> ControllerInner<S, V, M, C, K>
where
    S: CredentialStore + 'static,
    V: EntryView + 'static,
    M: MessageDisplay + 'static,
    C: SecurityCallback + 'static,
    K: Clock,
{
    async fn reset(&self) -> DomainResult<()> {
        // start fresh
        self.view.reset_entry(false);

        let deadline = self.store.lockout_deadline(self.user_id).await?;
        let now = self.clock.now_millis();

        let mut state = self.state.lock().await;
        state.initialized = true;

        // if the user is currently locked out, enforce it
        if self.policy.should_lockout(deadline) && deadline > now {
            self.enter_lockout(&mut state, deadline).await;
        } else {
            state.lockout.clear();
            state.phase = AttemptPhase::Idle;
            self.view.set_input_enabled(true);
            self.view.reset_state();
        }
        Ok(())
    }

    async fn submit_attempt(&self, credential: Credential) -> DomainResult<()> {
        let mut state = self.state.lock().await;

        if !state.initialized {
            warn!(
                user_id = %self.user_id,
                event = "attempt_rejected",
                "Attempt submitted before the first reset"
            );
            return Err(AttemptError::NotReset.into());
        }
        if state.phase == AttemptPhase::LockedOut {
            let remaining_ms = state.lockout.remaining_ms(self.clock.now_millis());
            warn!(
                user_id = %self.user_id,
                remaining_ms = remaining_ms,
                event = "attempt_rejected",
                "Attempt submitted during lockout; input should be disabled"
            );
            return Err(AttemptError::SubmittedWhileLockedOut { remaining_ms }.into());
        }

        self.view.set_input_enabled(false);
        state.cancel_pending();

        if credential.len() < self.config.min_length_before_report {
            // Too short to be a real entry, so it never reaches the store and
            // cannot provoke a lockout. It still counts as a failed attempt.
            debug!(
                user_id = %self.user_id,
                length = credential.len(),
                event = "attempt_too_short",
                "Skipping verifier for short entry"
            );
            return self
                .process_outcome(&mut state, credential, VerificationOutcome::mismatch())
                .await;
        }

        let sink: Weak<dyn OutcomeSink> = self.weak_self.clone();
        let pending = self.verifier.check(credential, self.user_id, sink);
        debug!(
            user_id = %self.user_id,
            request_id = %pending.request_id(),
            event = "attempt_submitted",
            "Verification issued"
        );
        state.pending = Some(pending);
        state.phase = AttemptPhase::Verifying;
        Ok(())
    }

    /// Apply one evaluated outcome. Runs with the state lock held, so it can
    /// never interleave with another controller operation.
    async fn process_outcome(
        &self,
        state: &mut ControllerState,
        credential: Credential,
        outcome: VerificationOutcome,
    ) -> DomainResult<()> {
        self.view.set_input_enabled(true);
        state.pending = None;

        if outcome.matched {
            info!(
                user_id = %self.user_id,
                event = "attempt_matched",
                "Credential matched; requesting unlock"
            );
            state.phase = AttemptPhase::Idle;
            self.callback.on_attempt_result(true, 0);
            self.callback.on_unlock();
        } else {
            self.callback
                .on_attempt_result(false, outcome.lockout_timeout_ms);

            let failed_attempts = self
                .store
                .failed_attempt_count(self.user_id)
                .await
                .unwrap_or_default();
            warn!(
                user_id = %self.user_id,
                failed_attempts = failed_attempts,
                lockout_timeout_ms = outcome.lockout_timeout_ms,
                event = "attempt_failed",
                "Credential mismatch"
            );

            if outcome.triggers_lockout() {
                let deadline = self
                    .store
                    .set_lockout_deadline(self.user_id, outcome.lockout_timeout_ms)
                    .await?;
                self.enter_lockout(state, deadline).await;
            } else {
                state.phase = AttemptPhase::Idle;
            }
            self.messages.show_message(SecurityMessage::WrongCredential);
        }

        self.view.reset_entry(true);
        drop(credential);
        Ok(())
    }

    /// Prevent further entry until the deadline passes and start the countdown
    async fn enter_lockout(&self, state: &mut ControllerState, deadline: MonotonicMillis) {
        state.phase = AttemptPhase::LockedOut;
        state.lockout.arm(deadline);
        self.view.set_input_enabled(false);

        let now = self.clock.now_millis();
        info!(
            user_id = %self.user_id,
            deadline = deadline,
            remaining_ms = state.lockout.remaining_ms(now),
            event = "lockout_started",
            "Enforcing attempt lockout"
        );

        let observer: Weak<dyn CountdownObserver> = self.weak_self.clone();
        self.scheduler.start(deadline, observer).await;
    }

    async fn on_pause(&self) {
        let mut state = self.state.lock().await;
        if state.cancel_pending() {
            debug!(
                user_id = %self.user_id,
                event = "attempt_paused",
                "Cancelled pending verification on pause"
            );
        }
    }

    fn notify_user_input(&self) {
        self.callback.on_user_activity();
        self.messages.clear_message();
    }

    async fn phase(&self) -> AttemptPhase {
        self.state.lock().await.phase
    }
}

#[async_trait]
impl<S, V, M, C, K> OutcomeSink for ControllerInner<S, V, M, C, K>
where
    S: CredentialStore + 'static,
    V: EntryView + 'static,
    M: MessageDisplay + 'static,
    C: SecurityCallback + 'static,
    K: Clock,
{
    async fn on_outcome(
        &self,
        request_id: Uuid,
        credential: Credential,
        outcome: VerificationOutcome,
    ) {
        let mut state = self.state.lock().await;

        // Only the currently pending request may deliver; anything else was
        // superseded or cancelled while delivery was already in flight.
        let current = state.pending.as_ref().map(PendingVerification::request_id);
        if current != Some(request_id) {
            debug!(
                request_id = %request_id,
                event = "outcome_discarded",
                "Discarding stale verification outcome"
            );
            return;
        }

        if let Err(error) = self.process_outcome(&mut state, credential, outcome).await {
            warn!(
                request_id = %request_id,
                error = %error,
                "Failed to process verification outcome"
            );
        }
    }
}

#[async_trait]
impl<S, V, M, C, K> CountdownObserver for ControllerInner<S, V, M, C, K>
where
    S: CredentialStore + 'static,
    V: EntryView + 'static,
    M: MessageDisplay + 'static,
    C: SecurityCallback + 'static,
    K: Clock,
{
    async fn on_countdown_tick(&self, seconds_remaining: u32) {
        let state = self.state.lock().await;
        if state.phase != AttemptPhase::LockedOut {
            return;
        }
        self.messages
            .show_message(SecurityMessage::LockoutCountdown { seconds_remaining });
    }

    async fn on_countdown_expired(&self) {
        let mut state = self.state.lock().await;
        if state.phase != AttemptPhase::LockedOut {
            return;
        }
        state.lockout.clear();
        state.phase = AttemptPhase::Idle;
        self.messages.clear_message();
        self.view.set_input_enabled(true);
        self.view.reset_state();

        info!(
            user_id = %self.user_id,
            event = "lockout_expired",
            "Lockout expired; attempts allowed again"
        );
    }
}

/// Single authority over attempt submission, lockout enforcement, and phase
/// transitions for one credential-entry screen.
///
/// All public operations are serialized against each other and against
/// asynchronous outcome and countdown delivery, so callers observe one
/// consistent phase at a time. `reset` must be called once before the first
/// `submit_attempt`.
pub struct AttemptController<S, V, M, C, K>
where
    S: CredentialStore + 'static,
    V: EntryView + 'static,
    M: MessageDisplay + 'static,
    C: SecurityCallback + 'static,
    K: Clock,
{
    inner: Arc<ControllerInner<S, V, M, C, K>>,
}

impl<S, V, M, C, K> Clone for AttemptController<S, V, M, C, K>
where
    S: CredentialStore + 'static,
    V: EntryView + 'static,
    M: MessageDisplay + 'static,
    C: SecurityCallback + 'static,
    K: Clock,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S, V, M, C, K> AttemptController<S, V, M, C, K>
where
    S: CredentialStore + 'static,
    V: EntryView + 'static,
    M: MessageDisplay + 'static,
    C: SecurityCallback + 'static,
    K: Clock,
{
    /// Create a new controller with the default lockout policy
    ///
    /// # Arguments
    ///
    /// * `store` - Credential store owning comparison and durable lockout state
    /// * `view` - Credential-entry surface hooks
    /// * `messages` - Security message area
    /// * `callback` - Security event callbacks
    /// * `clock` - Monotonic time source
    /// * `user_id` - User slot this controller verifies against
    /// * `config` - Controller configuration
    pub fn new(
        store: Arc<S>,
        view: Arc<V>,
        messages: Arc<M>,
        callback: Arc<C>,
        clock: Arc<K>,
        user_id: UserId,
        config: AttemptControllerConfig,
    ) -> Self {
        Self::with_policy(
            store,
            view,
            messages,
            callback,
            clock,
            user_id,
            config,
            LockoutPolicy::default(),
        )
    }

    /// Create a new controller with a custom lockout policy
    #[allow(clippy::too_many_arguments)]
    pub fn with_policy(
        store: Arc<S>,
        view: Arc<V>,
        messages: Arc<M>,
        callback: Arc<C>,
        clock: Arc<K>,
        user_id: UserId,
        config: AttemptControllerConfig,
        policy: LockoutPolicy,
    ) -> Self {
        let inner = Arc::new_cyclic(|weak_self: &Weak<ControllerInner<S, V, M, C, K>>| {
            ControllerInner {
                verifier: CredentialVerifier::new(Arc::clone(&store)),
                scheduler: LockoutScheduler::new(
                    Arc::clone(&clock),
                    CountdownConfig {
                        tick_interval_ms: config.tick_interval_ms,
                    },
                ),
                store,
                view,
                messages,
                callback,
                clock,
                user_id,
                config,
                policy,
                state: Mutex::new(ControllerState::new()),
                weak_self: weak_self.clone(),
            }
        });
        Self { inner }
    }

    /// Clear the entry display and enforce any persisted lockout.
    ///
    /// Reads the persisted deadline for this user: if the policy says it
    /// still enforces a lockout and it lies in the future, the controller
    /// enters `LockedOut` and the countdown starts from the remaining time;
    /// otherwise it enters `Idle` and the per-screen state hook runs.
    pub async fn reset(&self) -> DomainResult<()> {
        self.inner.reset().await
    }

    /// Evaluate one credential entry.
    ///
    /// Returns immediately; the outcome arrives through the callbacks. A
    /// pending verification is cancelled first, so at most one is ever in
    /// flight. Entries shorter than the configured minimum are reported as
    /// failed attempts without reaching the store.
    ///
    /// # Errors
    ///
    /// * [`AttemptError::NotReset`] if `reset` has never run
    /// * [`AttemptError::SubmittedWhileLockedOut`] during a lockout window
    pub async fn submit_attempt(&self, credential: Credential) -> DomainResult<()> {
        self.inner.submit_attempt(credential).await
    }

    /// Cancel any pending verification. Idempotent; lockout state and the
    /// running countdown are untouched.
    pub async fn on_pause(&self) {
        self.inner.on_pause().await
    }

    /// Equivalent to [`reset`](AttemptController::reset)
    pub async fn on_resume(&self) -> DomainResult<()> {
        self.inner.reset().await
    }

    /// Report a raw input event: forwards user activity and clears any
    /// visible message
    pub fn notify_user_input(&self) {
        self.inner.notify_user_input()
    }

    /// Currently observable phase
    pub async fn phase(&self) -> AttemptPhase {
        self.inner.phase().await
    }
}
