//! Lockout countdown configuration module

use serde::{Deserialize, Serialize};

/// Lockout countdown cadence configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CountdownConfig {
    /// Interval between seconds-remaining notifications in milliseconds
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

fn default_tick_interval_ms() -> u64 {
    1000
}
