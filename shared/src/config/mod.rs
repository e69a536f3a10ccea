//! Configuration module with security-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `attempt` - Attempt evaluation policy
//! - `countdown` - Lockout countdown cadence

pub mod attempt;
pub mod countdown;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use attempt::AttemptPolicyConfig;
pub use countdown::CountdownConfig;

/// Complete security configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SecurityConfig {
    /// Attempt evaluation policy
    #[serde(default)]
    pub attempt: AttemptPolicyConfig,

    /// Lockout countdown cadence
    #[serde(default)]
    pub countdown: CountdownConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_yields_defaults() {
        let config: SecurityConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.attempt.min_length_before_report, 3);
        assert_eq!(config.countdown.tick_interval_ms, 1000);
    }

    #[test]
    fn test_partial_override() {
        let config: SecurityConfig =
            serde_json::from_str(r#"{"attempt": {"min_length_before_report": 4}}"#).unwrap();
        assert_eq!(config.attempt.min_length_before_report, 4);
        assert_eq!(config.countdown.tick_interval_ms, 1000);
    }
}
