//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Credential policy and recovery-token settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for recovery token signing (HMAC-SHA256).
    #[serde(default = "default_recovery_secret")]
    pub recovery_secret: String,
    /// Recovery token TTL in minutes.
    #[serde(default = "default_recovery_ttl")]
    pub recovery_ttl_minutes: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Reject passwords with a zxcvbn score below three.
    #[serde(default)]
    pub require_strong_password: bool,
    /// Page the recovery email links back to.
    #[serde(default = "default_reset_redirect")]
    pub reset_redirect_url: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            recovery_secret: default_recovery_secret(),
            recovery_ttl_minutes: default_recovery_ttl(),
            password_min_length: default_password_min(),
            require_strong_password: false,
            reset_redirect_url: default_reset_redirect(),
        }
    }
}

fn default_recovery_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_recovery_ttl() -> u64 {
    60
}

fn default_password_min() -> usize {
    6
}

fn default_reset_redirect() -> String {
    "http://localhost:3000/reset-password".to_string()
}
