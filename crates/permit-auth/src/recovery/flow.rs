//! Forgot-password and reset-password flow.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use permit_core::config::{AuthConfig, PortalConfig, RecoveryConfig};
use permit_core::error::AppError;
use permit_core::result::AppResult;
use permit_entity::Principal;

use super::waiter::{RecoveryState, RecoveryWaiter};
use crate::password::PasswordValidator;
use crate::provider::AuthProvider;

/// Drives a password reset from request to re-login.
pub struct PasswordResetFlow {
    auth: Arc<dyn AuthProvider>,
    validator: PasswordValidator,
    waiter: RecoveryWaiter,
    redirect_url: String,
    login_route: String,
}

impl PasswordResetFlow {
    /// Creates the flow over the auth boundary.
    pub fn new(
        auth: Arc<dyn AuthProvider>,
        auth_config: &AuthConfig,
        recovery: RecoveryConfig,
        portal: &PortalConfig,
    ) -> Self {
        Self {
            waiter: RecoveryWaiter::new(Arc::clone(&auth), recovery),
            auth,
            validator: PasswordValidator::new(auth_config),
            redirect_url: auth_config.reset_redirect_url.clone(),
            login_route: portal.login_route.clone(),
        }
    }

    /// Ask the auth subsystem to email a recovery link.
    ///
    /// Succeeds for unknown addresses too; the caller shows the same
    /// confirmation either way.
    pub async fn request(&self, email: &str) -> AppResult<()> {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::validation("Please enter a valid email address"));
        }
        self.auth
            .reset_password_for_email(email, &self.redirect_url)
            .await
    }

    /// Wait for the recovery session behind the current page's link.
    pub async fn verify_link(&self, fragment: Option<&str>) -> AppResult<Principal> {
        self.waiter.wait(fragment).await
    }

    /// Observe the waiter's state.
    pub fn state(&self) -> watch::Receiver<RecoveryState> {
        self.waiter.state()
    }

    /// Set the new password, end the recovery session and return the
    /// route to send the user to.
    pub async fn complete(&self, new_password: &str, confirm_password: &str) -> AppResult<String> {
        self.validator
            .validate_confirmation(new_password, confirm_password)?;

        self.auth.update_password(new_password).await?;
        self.auth.sign_out().await?;

        info!("Password reset completed");
        Ok(self.login_route.clone())
    }

    /// Route the user lands on after a reset.
    pub fn login_route(&self) -> &str {
        &self.login_route
    }
}
