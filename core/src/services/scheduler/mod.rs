//! Deadline-driven lockout countdown.

mod service;

#[cfg(test)]
mod tests;

pub use service::{CountdownObserver, LockoutScheduler};
