//! Attempt policy configuration module

use serde::{Deserialize, Serialize};

/// Attempt evaluation policy configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AttemptPolicyConfig {
    /// Minimum entry length before an attempt is handed to the verifier.
    /// Shorter entries still count as failed attempts but are never checked,
    /// so incidental input cannot provoke a lockout.
    #[serde(default = "default_min_length_before_report")]
    pub min_length_before_report: usize,
}

impl Default for AttemptPolicyConfig {
    fn default() -> Self {
        Self {
            min_length_before_report: default_min_length_before_report(),
        }
    }
}

fn default_min_length_before_report() -> usize {
    3
}
