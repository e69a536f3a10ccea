//! Periodic countdown notifications toward a lockout deadline.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::services::clock::Clock;
use kg_shared::config::CountdownConfig;
use kg_shared::types::MonotonicMillis;
use kg_shared::utils::time::ceil_seconds_remaining;

/// Observer of countdown progress
#[async_trait]
pub trait CountdownObserver: Send + Sync {
    /// Periodic notification with whole seconds remaining, rounded up
    async fn on_countdown_tick(&self, seconds_remaining: u32);

    /// Fired once when the deadline passes. Never fired after `stop`.
    async fn on_countdown_expired(&self);
}

struct CountdownHandle {
    stopped: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl CountdownHandle {
    fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
        self.task.abort();
    }
}

/// Emits per-second countdown notifications until a lockout deadline passes.
///
/// At most one countdown runs per scheduler: `start` stops any countdown
/// still running before spawning the new one, so repeated resets while
/// locked out cannot stack timers.
pub struct LockoutScheduler<K: Clock> {
    clock: Arc<K>,
    config: CountdownConfig,
    active: tokio::sync::Mutex<Option<CountdownHandle>>,
}

impl<K: Clock> LockoutScheduler<K> {
    /// Create a new scheduler with the given cadence
    pub fn new(clock: Arc<K>, config: CountdownConfig) -> Self {
        Self {
            clock,
            config,
            active: tokio::sync::Mutex::new(None),
        }
    }

    /// Create a new scheduler ticking once per second
    pub fn with_defaults(clock: Arc<K>) -> Self {
        Self::new(clock, CountdownConfig::default())
    }

    /// Begin a countdown toward `deadline`.
    ///
    /// The first notification fires immediately; each carries
    /// `ceil((deadline - now) / 1000)` seconds remaining. Once `now` reaches
    /// the deadline a single expiry notification fires and the countdown
    /// stops. Any previously running countdown is stopped first.
    ///
    /// The observer is held weakly; the countdown exits quietly if it goes
    /// away.
    pub async fn start(&self, deadline: MonotonicMillis, observer: Weak<dyn CountdownObserver>) {
        let mut active = self.active.lock().await;
        if let Some(previous) = active.take() {
            previous.stop();
            debug!(event = "countdown_replaced", "Replaced running countdown");
        }

        let stopped = Arc::new(AtomicBool::new(false));
        let task_stopped = Arc::clone(&stopped);
        let clock = Arc::clone(&self.clock);
        let tick = Duration::from_millis(self.config.tick_interval_ms);

        info!(
            deadline = deadline,
            event = "countdown_started",
            "Starting lockout countdown"
        );

        let task = tokio::spawn(async move {
            loop {
                if task_stopped.load(Ordering::SeqCst) {
                    return;
                }
                let Some(observer) = observer.upgrade() else {
                    return;
                };

                let now = clock.now_millis();
                if now >= deadline {
                    debug!(
                        deadline = deadline,
                        event = "countdown_expired",
                        "Lockout countdown expired"
                    );
                    observer.on_countdown_expired().await;
                    return;
                }

                observer
                    .on_countdown_tick(ceil_seconds_remaining(deadline, now))
                    .await;
                drop(observer);

                tokio::time::sleep(tick).await;
            }
        });

        *active = Some(CountdownHandle { stopped, task });
    }

    /// Halt the running countdown without firing expiry. Idempotent.
    pub async fn stop(&self) {
        if let Some(handle) = self.active.lock().await.take() {
            handle.stop();
            debug!(event = "countdown_stopped", "Stopped lockout countdown");
        }
    }
}
