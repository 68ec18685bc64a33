//! Principal + profile provisioning under cross-store commit lag.
//!
//! The auth subsystem commits the principal before the relational store can
//! see it. Profile writes keyed to a not-yet-visible principal fail with a
//! foreign-key violation, which is retried with exponential backoff. Every
//! other store failure aborts at once.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use validator::Validate;

use permit_core::config::IdentityConfig;
use permit_core::error::{AppError, ErrorKind};
use permit_core::result::AppResult;
use permit_database::ProfileStore;
use permit_entity::{Principal, Profile, ProfileFields, Role};

use crate::password::PasswordValidator;
use crate::provider::AuthProvider;

/// Registration input as submitted by the sign-up form.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegistrationForm {
    /// Sign-in email.
    #[validate(email)]
    pub email: String,
    /// Chosen password.
    pub password: String,
    /// Repeated password.
    pub confirm_password: String,
    /// Profile fields.
    #[validate(nested)]
    pub fields: ProfileFields,
    /// Requested role.
    #[serde(default)]
    pub role: Role,
}

/// Creates principals and their profile rows.
pub struct IdentityProvisioner {
    auth: Arc<dyn AuthProvider>,
    profiles: Arc<dyn ProfileStore>,
    validator: PasswordValidator,
    config: IdentityConfig,
}

impl IdentityProvisioner {
    /// Creates a provisioner.
    pub fn new(
        auth: Arc<dyn AuthProvider>,
        profiles: Arc<dyn ProfileStore>,
        validator: PasswordValidator,
        config: IdentityConfig,
    ) -> Self {
        Self {
            auth,
            profiles,
            validator,
            config,
        }
    }

    /// Validate a registration form, then provision.
    ///
    /// Nothing reaches the auth subsystem unless the form is valid.
    pub async fn register(&self, form: RegistrationForm) -> AppResult<Principal> {
        self.validator
            .validate_confirmation(&form.password, &form.confirm_password)?;
        form.validate()?;

        self.provision(&form.email, &form.password, &form.fields, form.role)
            .await
    }

    /// Create the principal, wait for it to settle, then upsert its profile.
    ///
    /// On `ProvisioningFailed` the principal still exists.
    pub async fn provision(
        &self,
        email: &str,
        password: &str,
        fields: &ProfileFields,
        role: Role,
    ) -> AppResult<Principal> {
        let principal = self
            .auth
            .sign_up(email, password, &fields.username)
            .await?;

        tokio::time::sleep(self.config.commit_delay()).await;

        let profile = Profile::for_principal(&principal, fields, role);
        self.commit_profile(&profile).await?;

        info!(principal_id = %principal.id, role = %role, "Identity provisioned");
        Ok(principal)
    }

    async fn commit_profile(&self, profile: &Profile) -> AppResult<Profile> {
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match self.profiles.upsert(profile).await {
                Ok(row) => return Ok(row),
                Err(e) if e.is_foreign_key_violation() && attempt < max_attempts => {
                    let delay = self.config.backoff_after(attempt);
                    warn!(
                        principal_id = %profile.id,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "Principal not yet visible, retrying profile write"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) if e.is_foreign_key_violation() => {
                    error!(
                        principal_id = %profile.id,
                        attempts = attempt,
                        "Profile write retries exhausted"
                    );
                    return Err(AppError::with_source(
                        ErrorKind::ProvisioningFailed,
                        format!("Failed to create profile after {attempt} attempts"),
                        e,
                    ));
                }
                Err(e) => {
                    error!(principal_id = %profile.id, error = %e, "Profile write failed");
                    return Err(e.into());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use permit_core::config::AuthConfig;
    use permit_core::store::{StoreError, StoreErrorKind, StoreResult};
    use permit_core::types::PrincipalId;
    use permit_database::memory::MemoryProfileStore;

    use crate::provider::LocalAuthProvider;

    /// Fails the first `failures` writes with `kind`, then stores.
    struct ScriptedProfileStore {
        failures: u32,
        kind: StoreErrorKind,
        attempts: AtomicU32,
        rows: Mutex<Vec<Profile>>,
    }

    impl ScriptedProfileStore {
        fn new(failures: u32, kind: StoreErrorKind) -> Self {
            Self {
                failures,
                kind,
                attempts: AtomicU32::new(0),
                rows: Mutex::new(Vec::new()),
            }
        }

        fn attempts(&self) -> u32 {
            self.attempts.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ProfileStore for ScriptedProfileStore {
        async fn upsert(&self, profile: &Profile) -> StoreResult<Profile> {
            let n = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
            if n <= self.failures {
                return Err(StoreError::new(self.kind, "scripted failure"));
            }
            self.rows.lock().unwrap().push(profile.clone());
            Ok(profile.clone())
        }

        async fn find_by_id(&self, id: PrincipalId) -> StoreResult<Option<Profile>> {
            Ok(self.rows.lock().unwrap().iter().find(|p| p.id == id).cloned())
        }
    }

    fn fields() -> ProfileFields {
        ProfileFields {
            username: "jdelacruz".into(),
            first_name: "Juan".into(),
            middle_name: None,
            last_name: "Dela Cruz".into(),
            phone: None,
            address: Some("Poblacion".into()),
        }
    }

    fn form() -> RegistrationForm {
        RegistrationForm {
            email: "juan@example.com".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
            fields: fields(),
            role: Role::Citizen,
        }
    }

    fn provisioner(
        auth: Arc<LocalAuthProvider>,
        profiles: Arc<dyn ProfileStore>,
    ) -> IdentityProvisioner {
        IdentityProvisioner::new(
            auth,
            profiles,
            PasswordValidator::new(&AuthConfig::default()),
            IdentityConfig::default(),
        )
    }

    fn auth() -> Arc<LocalAuthProvider> {
        Arc::new(LocalAuthProvider::new(&AuthConfig::default()))
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_on_last_allowed_attempt() {
        let store = Arc::new(ScriptedProfileStore::new(
            4,
            StoreErrorKind::ForeignKeyViolation,
        ));
        let p = provisioner(auth(), store.clone());

        let before = tokio::time::Instant::now();
        let principal = p.register(form()).await.unwrap();

        assert_eq!(store.attempts(), 5);
        assert!(store.find_by_id(principal.id).await.unwrap().is_some());
        // 1000 settle + 500 + 1000 + 2000 + 4000 backoff
        assert_eq!(before.elapsed(), Duration::from_millis(8500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_retries_fail_after_five_attempts() {
        let store = Arc::new(ScriptedProfileStore::new(
            6,
            StoreErrorKind::ForeignKeyViolation,
        ));
        let auth = auth();
        let p = provisioner(auth.clone(), store.clone());

        let err = p.register(form()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::ProvisioningFailed);
        assert_eq!(store.attempts(), 5);
        // The principal is not rolled back.
        assert!(auth.get_user().await.unwrap().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_other_store_errors_abort_immediately() {
        let store = Arc::new(ScriptedProfileStore::new(1, StoreErrorKind::Unavailable));
        let p = provisioner(auth(), store.clone());

        let err = p.register(form()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Database);
        assert_eq!(store.attempts(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_validation_happens_before_sign_up() {
        let store = Arc::new(ScriptedProfileStore::new(0, StoreErrorKind::Other));
        let auth = auth();
        let p = provisioner(auth.clone(), store.clone());

        let mut mismatch = form();
        mismatch.confirm_password = "secret2".into();
        let err = p.register(mismatch).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.message, "Passwords do not match");

        let mut bad_email = form();
        bad_email.email = "juan-at-example".into();
        let err = p.register(bad_email).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        assert_eq!(auth.get_user().await.unwrap(), None);
        assert_eq!(store.attempts(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_registration_survives_commit_lag() {
        let store = Arc::new(MemoryProfileStore::new());
        // Visible only after the settle delay plus the first backoff.
        let auth = Arc::new(
            LocalAuthProvider::new(&AuthConfig::default())
                .with_principal_directory(store.clone(), Duration::from_millis(1200)),
        );
        let p = provisioner(auth, store.clone());

        let principal = p.register(form()).await.unwrap();
        let profile = store.find_by_id(principal.id).await.unwrap().unwrap();
        assert_eq!(profile.username, "jdelacruz");
        assert_eq!(profile.role, Role::Citizen);
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_upsert_keeps_one_row_with_latest_fields() {
        let store = Arc::new(MemoryProfileStore::new());
        let auth = Arc::new(
            LocalAuthProvider::new(&AuthConfig::default())
                .with_principal_directory(store.clone(), Duration::ZERO),
        );
        let p = provisioner(auth, store.clone());
        let principal = p.register(form()).await.unwrap();

        let mut retry = fields();
        retry.phone = Some("09170000000".into());
        let again = Profile::for_principal(&principal, &retry, Role::Citizen);
        p.commit_profile(&again).await.unwrap();

        assert_eq!(store.len().await, 1);
        let row = store.find_by_id(principal.id).await.unwrap().unwrap();
        assert_eq!(row.phone.as_deref(), Some("09170000000"));
    }
}
