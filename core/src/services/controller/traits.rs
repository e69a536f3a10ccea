//! Collaborator capability traits driven by the attempt controller.
//!
//! Implementations are injected at construction. Every method is invoked on
//! the controller's execution context and must return quickly; rendering and
//! animation belong to the implementor.

use kg_shared::types::SecurityMessage;

/// Credential-entry surface hooks
pub trait EntryView: Send + Sync {
    /// Clear the entered-credential display
    fn reset_entry(&self, animate: bool);

    /// Enable or disable credential input. Input stays disabled while a
    /// verification is pending and for the whole lockout window.
    fn set_input_enabled(&self, enabled: bool);

    /// Reset per-screen state on a fresh session or after leaving lockout
    fn reset_state(&self);
}

/// Security event callbacks
pub trait SecurityCallback: Send + Sync {
    /// Reported for every evaluated attempt, including synthesized
    /// short-entry ones
    fn on_attempt_result(&self, success: bool, lockout_timeout_ms: u64);

    /// Invoked exactly once, only on a matched credential
    fn on_unlock(&self);

    /// Invoked on any raw input event, independent of attempt evaluation
    fn on_user_activity(&self);
}

/// Security message area
pub trait MessageDisplay: Send + Sync {
    fn show_message(&self, message: SecurityMessage);

    fn clear_message(&self);
}
