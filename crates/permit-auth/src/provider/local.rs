//! In-process auth backend with Argon2id credentials and signed recovery links.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, broadcast};
use tracing::{debug, error, info, warn};

use permit_core::config::AuthConfig;
use permit_core::error::AppError;
use permit_core::events::AuthEvent;
use permit_core::result::AppResult;
use permit_core::types::PrincipalId;
use permit_database::PrincipalDirectory;
use permit_entity::Principal;

use super::AuthProvider;
use crate::password::PasswordHasher;
use crate::recovery::RecoveryTokenCodec;

/// Capacity of the auth event channel.
const EVENT_CAPACITY: usize = 64;

/// A recovery link this backend "emailed".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryLink {
    /// Recipient address.
    pub email: String,
    /// Full link, token in the fragment.
    pub url: String,
}

#[derive(Debug)]
struct Account {
    principal: Principal,
    password_hash: String,
}

#[derive(Debug, Default)]
struct State {
    /// Keyed by lowercased email.
    accounts: HashMap<String, Account>,
    current: Option<PrincipalId>,
    outbox: Vec<RecoveryLink>,
}

impl State {
    fn principal(&self, id: PrincipalId) -> Option<&Principal> {
        self.accounts
            .values()
            .map(|a| &a.principal)
            .find(|p| p.id == id)
    }

    fn account_mut(&mut self, id: PrincipalId) -> Option<&mut Account> {
        self.accounts.values_mut().find(|a| a.principal.id == id)
    }
}

/// Auth backend holding principals in memory.
///
/// Holds a single current session, like one browser client. When a
/// principal directory is attached, each new principal is published to it
/// after `lag`, modelling the delay before the relational store sees it.
pub struct LocalAuthProvider {
    state: Mutex<State>,
    hasher: PasswordHasher,
    tokens: RecoveryTokenCodec,
    events: broadcast::Sender<AuthEvent>,
    directory: Option<(Arc<dyn PrincipalDirectory>, Duration)>,
}

impl std::fmt::Debug for LocalAuthProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalAuthProvider")
            .field("tokens", &self.tokens)
            .field("has_directory", &self.directory.is_some())
            .finish()
    }
}

impl LocalAuthProvider {
    /// Creates a backend from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            state: Mutex::new(State::default()),
            hasher: PasswordHasher::new(),
            tokens: RecoveryTokenCodec::new(config),
            events,
            directory: None,
        }
    }

    /// Publish new principals to `directory` after `lag`.
    pub fn with_principal_directory(
        mut self,
        directory: Arc<dyn PrincipalDirectory>,
        lag: Duration,
    ) -> Self {
        self.directory = Some((directory, lag));
        self
    }

    /// Recovery links sent so far, oldest first.
    pub async fn sent_recovery_links(&self) -> Vec<RecoveryLink> {
        self.state.lock().await.outbox.clone()
    }

    fn emit(&self, event: AuthEvent) {
        // No receivers is fine: nobody is listening yet.
        let _ = self.events.send(event);
    }

    fn publish_principal(&self, principal: &Principal) {
        let Some((directory, lag)) = self.directory.clone() else {
            return;
        };
        let principal = principal.clone();
        tokio::spawn(async move {
            tokio::time::sleep(lag).await;
            if let Err(e) = directory.register_principal(&principal).await {
                error!(principal_id = %principal.id, error = %e, "Failed to publish principal");
            }
        });
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait]
impl AuthProvider for LocalAuthProvider {
    async fn sign_up(&self, email: &str, password: &str, username: &str) -> AppResult<Principal> {
        let key = normalize_email(email);
        let password_hash = self.hasher.hash_password(password)?;

        let principal = {
            let mut state = self.state.lock().await;
            if state.accounts.contains_key(&key) {
                return Err(AppError::conflict("An account with this email already exists"));
            }
            let principal = Principal {
                id: PrincipalId::new(),
                email: key.clone(),
                username: username.to_string(),
            };
            state.accounts.insert(
                key,
                Account {
                    principal: principal.clone(),
                    password_hash,
                },
            );
            state.current = Some(principal.id);
            principal
        };

        info!(principal_id = %principal.id, "Principal created");
        self.publish_principal(&principal);
        self.emit(AuthEvent::SignedIn {
            principal_id: principal.id,
        });
        Ok(principal)
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> AppResult<Principal> {
        let mut state = self.state.lock().await;
        let account = state
            .accounts
            .get(&normalize_email(email))
            .ok_or_else(|| AppError::authentication("Invalid login credentials"))?;

        if !self
            .hasher
            .verify_password(password, &account.password_hash)?
        {
            warn!(principal_id = %account.principal.id, "Rejected sign-in");
            return Err(AppError::authentication("Invalid login credentials"));
        }

        let principal = account.principal.clone();
        state.current = Some(principal.id);
        drop(state);

        self.emit(AuthEvent::SignedIn {
            principal_id: principal.id,
        });
        Ok(principal)
    }

    async fn sign_out(&self) -> AppResult<()> {
        let previous = self.state.lock().await.current.take();
        if previous.is_some() {
            self.emit(AuthEvent::SignedOut);
        }
        Ok(())
    }

    async fn reset_password_for_email(&self, email: &str, redirect_to: &str) -> AppResult<()> {
        let mut state = self.state.lock().await;
        let Some(account) = state.accounts.get(&normalize_email(email)) else {
            debug!("Recovery requested for unknown email");
            return Ok(());
        };

        let token = self.tokens.issue(&account.principal)?;
        let link = RecoveryLink {
            email: account.principal.email.clone(),
            url: format!("{redirect_to}#access_token={token}&type=recovery"),
        };
        info!(principal_id = %account.principal.id, "Recovery link issued");
        state.outbox.push(link);
        Ok(())
    }

    async fn exchange_recovery_token(&self, token: &str) -> AppResult<Principal> {
        let claims = self.tokens.verify(token)?;

        let mut state = self.state.lock().await;
        let principal = state
            .principal(claims.sub)
            .cloned()
            .ok_or_else(|| AppError::invalid_link("Recovery link refers to an unknown account"))?;
        state.current = Some(principal.id);
        drop(state);

        self.emit(AuthEvent::PasswordRecovery {
            principal_id: principal.id,
        });
        Ok(principal)
    }

    async fn update_password(&self, new_password: &str) -> AppResult<()> {
        let password_hash = self.hasher.hash_password(new_password)?;

        let mut state = self.state.lock().await;
        let current = state
            .current
            .ok_or_else(|| AppError::authentication("Auth session missing"))?;
        let account = state
            .account_mut(current)
            .ok_or_else(|| AppError::authentication("Auth session missing"))?;
        account.password_hash = password_hash;
        drop(state);

        info!(principal_id = %current, "Password updated");
        self.emit(AuthEvent::UserUpdated {
            principal_id: current,
        });
        Ok(())
    }

    async fn get_user(&self) -> AppResult<Option<Principal>> {
        let state = self.state.lock().await;
        Ok(state
            .current
            .and_then(|id| state.principal(id))
            .cloned())
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }
}
