//! Business services: the attempt controller and the leaves it composes.

pub mod clock;
pub mod controller;
pub mod scheduler;
pub mod verifier;

// Re-export commonly used types
pub use clock::{Clock, MonotonicClock};
pub use controller::{
    AttemptController, AttemptControllerConfig, EntryView, LockoutPolicy, MessageDisplay,
    SecurityCallback,
};
pub use scheduler::{CountdownObserver, LockoutScheduler};
pub use verifier::{CredentialVerifier, OutcomeSink, PendingVerification};
