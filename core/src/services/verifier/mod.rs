//! Asynchronous credential verification boundary.

mod service;

#[cfg(test)]
mod tests;

pub use service::{CredentialVerifier, OutcomeSink, PendingVerification};
