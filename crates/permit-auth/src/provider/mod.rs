//! The auth boundary consumed by the portal core.

pub mod local;

use async_trait::async_trait;
use tokio::sync::broadcast;

use permit_core::events::AuthEvent;
use permit_core::result::AppResult;
use permit_entity::Principal;

pub use local::{LocalAuthProvider, RecoveryLink};

/// Authentication subsystem holding principals and the current session.
///
/// Implementations broadcast an [`AuthEvent`] for every session change.
/// Dropping a receiver returned by [`subscribe`](Self::subscribe) is the
/// unsubscribe.
#[async_trait]
pub trait AuthProvider: Send + Sync + 'static {
    /// Create a principal and start a session for it.
    async fn sign_up(&self, email: &str, password: &str, username: &str) -> AppResult<Principal>;

    /// Start a session with email and password.
    async fn sign_in_with_password(&self, email: &str, password: &str) -> AppResult<Principal>;

    /// End the current session. A no-op without one.
    async fn sign_out(&self) -> AppResult<()>;

    /// Send a recovery link to the email, if an account exists.
    async fn reset_password_for_email(&self, email: &str, redirect_to: &str) -> AppResult<()>;

    /// Exchange a recovery token for a session.
    async fn exchange_recovery_token(&self, token: &str) -> AppResult<Principal>;

    /// Change the current principal's password.
    async fn update_password(&self, new_password: &str) -> AppResult<()>;

    /// The principal owning the current session. `Ok(None)` without one.
    async fn get_user(&self) -> AppResult<Option<Principal>>;

    /// Listen for session changes.
    fn subscribe(&self) -> broadcast::Receiver<AuthEvent>;
}
