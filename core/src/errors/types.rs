//! Error type definitions for attempt handling and the credential store seam.
//!
//! Verification failures themselves are not errors; a mismatch or a triggered
//! lockout is an ordinary outcome. The types here cover caller contract
//! violations and store-level faults.

use thiserror::Error;

/// Attempt submission contract violations
///
/// These indicate an integration error in the caller rather than a
/// user-facing failure.
#[derive(Error, Debug)]
pub enum AttemptError {
    /// `submit_attempt` was invoked while locked out. Input must be disabled
    /// for the whole lockout window, so a submission in that phase is a
    /// caller bug; the attempt is rejected with this diagnostic.
    #[error("attempt submitted during lockout ({remaining_ms} ms remaining)")]
    SubmittedWhileLockedOut { remaining_ms: u64 },

    /// `submit_attempt` was invoked before the first `reset`. The controller
    /// must observe the persisted lockout deadline before accepting input.
    #[error("attempt submitted before the controller was reset")]
    NotReset,
}

/// Credential store errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("credential store unavailable: {message}")]
    Unavailable { message: String },

    #[error("unknown user slot: {user_id}")]
    UnknownUser { user_id: String },
}
