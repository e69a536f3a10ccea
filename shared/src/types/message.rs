//! Display hints surfaced to the security message area.

use serde::{Deserialize, Serialize};

/// Display hint driven by the attempt controller.
///
/// The message area collaborator decides how each hint is rendered and
/// localized; the controller only reports the kind and its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SecurityMessage {
    /// The submitted credential did not match
    WrongCredential,
    /// Attempts are disallowed until the countdown reaches zero
    LockoutCountdown { seconds_remaining: u32 },
}

impl SecurityMessage {
    /// Whether this message reports countdown progress
    pub fn is_countdown(&self) -> bool {
        matches!(self, SecurityMessage::LockoutCountdown { .. })
    }
}
