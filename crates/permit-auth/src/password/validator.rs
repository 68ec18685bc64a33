//! Password policy for registration and password reset.

use permit_core::config::AuthConfig;
use permit_core::error::AppError;

/// Checks new passwords before anything is sent to the auth subsystem.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
    require_strong: bool,
}

impl PasswordValidator {
    /// Creates a validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
            require_strong: config.require_strong_password,
        }
    }

    /// Validate a password and its confirmation.
    ///
    /// Mismatch is reported before length so the user fixes the typo first.
    pub fn validate_confirmation(&self, password: &str, confirm: &str) -> Result<(), AppError> {
        if password != confirm {
            return Err(AppError::validation("Passwords do not match"));
        }
        self.validate(password)
    }

    /// Validate a single password against the configured policy.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        if self.require_strong {
            let estimate = zxcvbn::zxcvbn(password, &[]);
            if estimate.score() < zxcvbn::Score::Three {
                return Err(AppError::validation(
                    "Password is too weak. Please use a longer or less common password.",
                ));
            }
        }

        Ok(())
    }
}
