//! # KeyGate Core
//!
//! Core attempt-verification and lockout-enforcement logic for KeyGate.
//! This crate contains domain entities, the attempt controller and the leaf
//! services it composes, repository interfaces, and error types.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
