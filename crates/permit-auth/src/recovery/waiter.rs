//! Bounded wait for a recovery session to materialize after navigation.
//!
//! The reset page may load before the auth subsystem has processed the
//! link. The waiter checks immediately, then twice more after escalating
//! delays, listening for an auth event in between. Any successful path
//! ends the wait and drops the listener; exhausting all stages is the
//! single failure transition to [`RecoveryState::InvalidLink`].

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use permit_core::config::RecoveryConfig;
use permit_core::error::AppError;
use permit_core::events::AuthEvent;
use permit_core::result::AppResult;
use permit_entity::Principal;

use super::fragment::RecoveryFragment;
use crate::provider::AuthProvider;

/// Escalation stage of the wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryStage {
    /// Immediate check on page load.
    Initial,
    /// Check after the fallback delay.
    Fallback,
    /// Check after the final delay.
    Final,
}

/// Observable state of the waiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoveryState {
    /// Not started.
    Idle,
    /// Waiting at the given stage.
    Checking(RecoveryStage),
    /// A recovery session exists for this principal.
    Ready(Principal),
    /// The link never produced a session.
    InvalidLink,
}

/// Waits for a recovery session with escalating checks.
pub struct RecoveryWaiter {
    auth: Arc<dyn AuthProvider>,
    config: RecoveryConfig,
    state: watch::Sender<RecoveryState>,
}

impl RecoveryWaiter {
    /// Creates a waiter over the auth boundary.
    pub fn new(auth: Arc<dyn AuthProvider>, config: RecoveryConfig) -> Self {
        let (state, _) = watch::channel(RecoveryState::Idle);
        Self {
            auth,
            config,
            state,
        }
    }

    /// Observe state transitions.
    pub fn state(&self) -> watch::Receiver<RecoveryState> {
        self.state.subscribe()
    }

    /// Wait for a recovery session, given the page's URL fragment.
    pub async fn wait(&self, fragment: Option<&str>) -> AppResult<Principal> {
        // Subscribe before the first check so no event slips between them.
        let mut events = self.auth.subscribe();

        self.enter(RecoveryState::Checking(RecoveryStage::Initial));
        match fragment.map(RecoveryFragment::parse) {
            Some(RecoveryFragment::Error(description)) => {
                return Err(self.fail(description));
            }
            Some(RecoveryFragment::Token(token)) => {
                return match self.auth.exchange_recovery_token(&token).await {
                    Ok(principal) => Ok(self.ready(principal)),
                    Err(e) => {
                        self.enter(RecoveryState::InvalidLink);
                        Err(e)
                    }
                };
            }
            Some(RecoveryFragment::Empty) | None => {}
        }
        if let Some(principal) = self.auth.get_user().await? {
            return Ok(self.ready(principal));
        }

        let stages = [
            (RecoveryStage::Fallback, self.config.fallback_wait()),
            (RecoveryStage::Final, self.config.final_wait()),
        ];
        for (stage, wait) in stages {
            self.enter(RecoveryState::Checking(stage));
            if let Some(principal) = self.listen(&mut events, wait).await? {
                return Ok(self.ready(principal));
            }
            if let Some(principal) = self.auth.get_user().await? {
                return Ok(self.ready(principal));
            }
        }

        Err(self.fail("Invalid or expired password reset link".to_string()))
    }

    /// Wait up to `wait` for an event that establishes a session.
    async fn listen(
        &self,
        events: &mut broadcast::Receiver<AuthEvent>,
        wait: Duration,
    ) -> AppResult<Option<Principal>> {
        let deadline = tokio::time::sleep(wait);
        tokio::pin!(deadline);

        loop {
            tokio::select! {
                _ = &mut deadline => return Ok(None),
                event = events.recv() => match event {
                    Ok(event) if event.session_principal().is_some() => {
                        return self.auth.get_user().await;
                    }
                    Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => {
                        (&mut deadline).await;
                        return Ok(None);
                    }
                },
            }
        }
    }

    fn enter(&self, state: RecoveryState) {
        debug!(state = ?state, "Recovery waiter transition");
        self.state.send_replace(state);
    }

    fn ready(&self, principal: Principal) -> Principal {
        info!(principal_id = %principal.id, "Recovery session ready");
        self.enter(RecoveryState::Ready(principal.clone()));
        principal
    }

    fn fail(&self, reason: String) -> AppError {
        warn!(reason = %reason, "Recovery link did not produce a session");
        self.enter(RecoveryState::InvalidLink);
        AppError::invalid_link(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use permit_core::config::AuthConfig;
    use permit_core::error::ErrorKind;

    use crate::provider::LocalAuthProvider;

    async fn signed_out_provider() -> Arc<LocalAuthProvider> {
        let auth = Arc::new(LocalAuthProvider::new(&AuthConfig::default()));
        auth.sign_up("nena@example.com", "secret1", "nena").await.unwrap();
        auth.sign_out().await.unwrap();
        auth
    }

    async fn recovery_token(auth: &LocalAuthProvider) -> String {
        auth.reset_password_for_email("nena@example.com", "https://portal/reset")
            .await
            .unwrap();
        let url = auth.sent_recovery_links().await.remove(0).url;
        let (_, fragment) = url.split_once('#').unwrap();
        match RecoveryFragment::parse(fragment) {
            RecoveryFragment::Token(token) => token,
            other => panic!("unexpected fragment {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_token_in_fragment_is_ready_immediately() {
        let auth = signed_out_provider().await;
        let token = recovery_token(&auth).await;
        let waiter = RecoveryWaiter::new(auth.clone(), RecoveryConfig::default());

        let fragment = format!("#access_token={token}&type=recovery");
        let before = tokio::time::Instant::now();
        let principal = waiter.wait(Some(&fragment)).await.unwrap();

        assert_eq!(principal.email, "nena@example.com");
        assert_eq!(before.elapsed(), Duration::ZERO);
        assert!(matches!(*waiter.state().borrow(), RecoveryState::Ready(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_fragment_fails_without_waiting() {
        let auth = signed_out_provider().await;
        let waiter = RecoveryWaiter::new(auth, RecoveryConfig::default());
        let before = tokio::time::Instant::now();

        let err = waiter
            .wait(Some("#error=access_denied&error_description=Link+expired"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidLink);
        assert_eq!(err.message, "Link expired");
        assert_eq!(before.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_final_check() {
        let auth = signed_out_provider().await;
        let waiter = RecoveryWaiter::new(auth, RecoveryConfig::default());
        let before = tokio::time::Instant::now();

        let err = waiter.wait(None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidLink);
        assert_eq!(before.elapsed(), Duration::from_millis(3000));
        assert_eq!(*waiter.state().borrow(), RecoveryState::InvalidLink);
    }

    #[tokio::test(start_paused = true)]
    async fn test_final_wait_starts_after_fallback_check() {
        let auth = signed_out_provider().await;
        let config = RecoveryConfig {
            fallback_check_ms: 100,
            final_check_ms: 250,
        };
        let waiter = RecoveryWaiter::new(auth, config.clone());
        let before = tokio::time::Instant::now();

        waiter.wait(None).await.unwrap_err();
        assert_eq!(before.elapsed(), config.total_wait());
        assert_eq!(before.elapsed(), Duration::from_millis(350));
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_token_arrival_is_picked_up_by_listener() {
        let auth = signed_out_provider().await;
        let token = recovery_token(&auth).await;
        let waiter = RecoveryWaiter::new(auth.clone(), RecoveryConfig::default());

        let late = auth.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(1500)).await;
            late.exchange_recovery_token(&token).await.unwrap();
        });

        let before = tokio::time::Instant::now();
        let principal = waiter.wait(Some("")).await.unwrap();
        assert_eq!(principal.email, "nena@example.com");
        assert_eq!(before.elapsed(), Duration::from_millis(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_token_for_unknown_account_is_invalid_link() {
        let auth = signed_out_provider().await;
        let waiter = RecoveryWaiter::new(auth, RecoveryConfig::default());
        let codec = super::super::token::RecoveryTokenCodec::new(&AuthConfig::default());
        let orphan = codec
            .issue(&Principal {
                id: permit_core::types::PrincipalId::new(),
                email: "ghost@example.com".into(),
                username: "ghost".into(),
            })
            .unwrap();

        let err = waiter
            .wait(Some(&format!("#access_token={orphan}&type=recovery")))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidLink);
        assert_eq!(*waiter.state().borrow(), RecoveryState::InvalidLink);
    }
}
