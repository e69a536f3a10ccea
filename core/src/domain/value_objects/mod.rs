//! Value objects for attempt submission.

pub mod credential;

pub use credential::Credential;
