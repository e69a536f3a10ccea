//! Attempt controller configuration.

use kg_shared::config::SecurityConfig;

/// Runtime configuration for the attempt controller
#[derive(Debug, Clone)]
pub struct AttemptControllerConfig {
    /// Minimum entry length before an attempt reaches the verifier
    pub min_length_before_report: usize,
    /// Countdown notification interval in milliseconds
    pub tick_interval_ms: u64,
}

impl Default for AttemptControllerConfig {
    fn default() -> Self {
        Self::from(&SecurityConfig::default())
    }
}

impl From<&SecurityConfig> for AttemptControllerConfig {
    fn from(config: &SecurityConfig) -> Self {
        Self {
            min_length_before_report: config.attempt.min_length_before_report,
            tick_interval_ms: config.countdown.tick_interval_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::attempt::MINIMUM_LENGTH_BEFORE_REPORT;

    #[test]
    fn test_defaults_follow_security_config() {
        let config = AttemptControllerConfig::default();
        assert_eq!(config.min_length_before_report, MINIMUM_LENGTH_BEFORE_REPORT);
        assert_eq!(config.tick_interval_ms, 1000);
    }
}
