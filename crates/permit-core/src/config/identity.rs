//! Identity provisioning configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Settling and retry parameters for principal + profile provisioning.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct IdentityConfig {
    /// Wait after principal creation before the first profile write, in
    /// milliseconds. Covers the auth store → relational store visibility lag.
    #[serde(default = "default_commit_delay")]
    pub commit_delay_ms: u64,
    /// Base delay of the exponential backoff between profile writes.
    #[serde(default = "default_retry_base")]
    pub retry_base_delay_ms: u64,
    /// Total profile write attempts, including the first.
    #[serde(default = "default_max_attempts")]
    #[validate(range(min = 1, max = 10))]
    pub max_attempts: u32,
}

impl IdentityConfig {
    /// Settling interval as a [`Duration`].
    pub fn commit_delay(&self) -> Duration {
        Duration::from_millis(self.commit_delay_ms)
    }

    /// Backoff after the given failed attempt (1-based): `base * 2^(attempt-1)`.
    pub fn backoff_after(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1).min(16);
        Duration::from_millis(self.retry_base_delay_ms.saturating_mul(1u64 << exp))
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            commit_delay_ms: default_commit_delay(),
            retry_base_delay_ms: default_retry_base(),
            max_attempts: default_max_attempts(),
        }
    }
}

fn default_commit_delay() -> u64 {
    1000
}

fn default_retry_base() -> u64 {
    500
}

fn default_max_attempts() -> u32 {
    5
}
