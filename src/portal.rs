//! Top-level wiring of every portal component.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use permit_auth::{
    AccessGate, AuthProvider, IdentityProvisioner, LocalAuthProvider, PasswordResetFlow,
    PasswordValidator, SessionResolver,
};
use permit_core::config::AppConfig;
use permit_core::result::AppResult;
use permit_database::repositories::PrincipalRepository;
use permit_database::{DatabasePool, migration};
use permit_entity::Role;
use permit_service::{ActionDispatcher, PermitBoard, PermitStatusAggregator, ReviewService};

use crate::backends::PortalBackends;

/// The assembled portal.
pub struct Portal {
    config: AppConfig,
    auth: Arc<dyn AuthProvider>,
    session: SessionResolver,
    gate: AccessGate,
    provisioner: IdentityProvisioner,
    password_reset: PasswordResetFlow,
    board: PermitBoard,
    dispatcher: ActionDispatcher,
    review: ReviewService,
    pool: Option<DatabasePool>,
}

impl Portal {
    /// Wire all components over `backends`.
    pub fn new(config: AppConfig, backends: PortalBackends) -> Self {
        let session = SessionResolver::new(backends.auth.clone(), backends.profiles.clone());

        let gate = AccessGate::new(session.clone(), config.portal.clone());
        let provisioner = IdentityProvisioner::new(
            backends.auth.clone(),
            backends.profiles.clone(),
            PasswordValidator::new(&config.auth),
            config.identity.clone(),
        );
        let password_reset = PasswordResetFlow::new(
            backends.auth.clone(),
            &config.auth,
            config.recovery.clone(),
            &config.portal,
        );
        let board = PermitBoard::new(PermitStatusAggregator::new(
            backends.permits.clone(),
            backends.payments.clone(),
            backends.uploads.clone(),
        ));
        let dispatcher = ActionDispatcher::new(
            session.clone(),
            backends.permits.clone(),
            backends.notifications.clone(),
            backends.documents.clone(),
        );
        let review = ReviewService::new(session.clone(), backends.permits.clone());

        Self {
            config,
            auth: backends.auth,
            session,
            gate,
            provisioner,
            password_reset,
            board,
            dispatcher,
            review,
            pool: None,
        }
    }

    /// Connect to PostgreSQL, run migrations, and use an in-process auth
    /// subsystem that publishes principals to the `principals` table.
    pub async fn connect_postgres(config: AppConfig) -> AppResult<Self> {
        let pool = DatabasePool::connect(&config.database).await?;
        let auth = Arc::new(
            LocalAuthProvider::new(&config.auth).with_principal_directory(
                Arc::new(PrincipalRepository::new(pool.pool().clone())),
                Duration::ZERO,
            ),
        );
        Self::connect_postgres_with(config, pool, auth).await
    }

    /// Run migrations on `pool` and wire PostgreSQL stores with an external
    /// auth subsystem.
    pub async fn connect_postgres_with(
        config: AppConfig,
        pool: DatabasePool,
        auth: Arc<dyn AuthProvider>,
    ) -> AppResult<Self> {
        migration::run_migrations(pool.pool()).await?;
        let backends = PortalBackends::postgres(&config, &pool, auth);
        let mut portal = Self::new(config, backends);
        portal.pool = Some(pool);
        Ok(portal)
    }

    /// Sign in and return the route for the user's role.
    pub async fn sign_in(&self, email: &str, password: &str) -> AppResult<String> {
        let principal = self.auth.sign_in_with_password(email, password).await?;
        let role = self
            .session
            .profile_of(principal.id)
            .await?
            .map(|p| p.role)
            .unwrap_or(Role::Citizen);

        info!(principal_id = %principal.id, role = %role, "Signed in");
        Ok(self.gate.home_for(role).to_string())
    }

    /// End the current session and return the login route.
    pub async fn sign_out(&self) -> AppResult<String> {
        self.auth.sign_out().await?;
        Ok(self.config.portal.login_route.clone())
    }

    /// Close the database pool, if any.
    pub async fn shutdown(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }

    /// Portal configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Current principal and profile resolution.
    pub fn session(&self) -> &SessionResolver {
        &self.session
    }

    /// Page access decisions.
    pub fn gate(&self) -> &AccessGate {
        &self.gate
    }

    /// Registration.
    pub fn provisioner(&self) -> &IdentityProvisioner {
        &self.provisioner
    }

    /// Forgot-password and reset flow.
    pub fn password_reset(&self) -> &PasswordResetFlow {
        &self.password_reset
    }

    /// Approved-permit working set.
    pub fn board(&self) -> &PermitBoard {
        &self.board
    }

    /// Notify and print.
    pub fn dispatcher(&self) -> &ActionDispatcher {
        &self.dispatcher
    }

    /// Approve and reject.
    pub fn review(&self) -> &ReviewService {
        &self.review
    }
}
