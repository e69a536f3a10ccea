//! Domain entities representing attempt evaluation and lockout state.

pub mod attempt;
pub mod lockout;

// Re-export commonly used types
pub use attempt::{
    AttemptPhase, AttemptRecord, VerificationOutcome, MINIMUM_LENGTH_BEFORE_REPORT,
};
pub use lockout::LockoutState;
