//! Recovery-link wait configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Escalating waits for a recovery token to materialize after navigation.
///
/// The initial check runs immediately. The waits are cumulative: the
/// fallback check runs `fallback_check_ms` after page load and the final
/// check a further `final_check_ms` after that, so the defaults give up at
/// 3s. Each wait listens for an auth event meanwhile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoveryConfig {
    /// Wait before the fallback check, in milliseconds.
    #[serde(default = "default_fallback")]
    pub fallback_check_ms: u64,
    /// Wait between the fallback and final checks, in milliseconds.
    #[serde(default = "default_final")]
    pub final_check_ms: u64,
}

impl RecoveryConfig {
    /// Fallback wait as a [`Duration`].
    pub fn fallback_wait(&self) -> Duration {
        Duration::from_millis(self.fallback_check_ms)
    }

    /// Final wait as a [`Duration`].
    pub fn final_wait(&self) -> Duration {
        Duration::from_millis(self.final_check_ms)
    }

    /// Time from page load until the waiter gives up.
    pub fn total_wait(&self) -> Duration {
        self.fallback_wait() + self.final_wait()
    }
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            fallback_check_ms: default_fallback(),
            final_check_ms: default_final(),
        }
    }
}

fn default_fallback() -> u64 {
    1000
}

fn default_final() -> u64 {
    2000
}
