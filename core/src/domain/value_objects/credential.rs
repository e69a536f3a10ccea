//! Credential value object for attempt submission.

use secrecy::{ExposeSecret, SecretString};
use std::fmt;

/// Transient credential entry (PIN, password, or serialized pattern).
///
/// The entry bytes are zeroized when the value is dropped and never appear in
/// `Debug` output. The controller owns a credential only for the duration of
/// one attempt and drops it as soon as the outcome has been processed.
pub struct Credential {
    entry: SecretString,
    length: usize,
}

impl Credential {
    pub fn new(entry: impl Into<String>) -> Self {
        let entry: String = entry.into();
        let length = entry.chars().count();
        Self {
            entry: SecretString::from(entry),
            length,
        }
    }

    /// Number of input symbols in the entry
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Expose the raw entry for comparison by a credential store.
    ///
    /// Store implementations are the only intended callers; the entry must
    /// not be copied out of the comparison path.
    pub fn expose(&self) -> &str {
        self.entry.expose_secret()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential(length={})", self.length)
    }
}

impl From<&str> for Credential {
    fn from(entry: &str) -> Self {
        Self::new(entry)
    }
}
