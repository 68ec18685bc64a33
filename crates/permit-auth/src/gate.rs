//! Route access decisions by session and role.

use permit_core::config::PortalConfig;
use permit_core::result::AppResult;
use permit_entity::{Principal, Profile, Role};
use tracing::debug;

use crate::session::SessionResolver;

/// Resolution state of a gated page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// Session lookup in progress.
    Resolving,
    /// No session.
    Unauthenticated,
    /// Signed in, but no profile carries a role yet.
    AuthenticatedNoRole,
    /// Signed in with a role other than the page requires.
    AuthenticatedWrongRole,
    /// Allowed to render.
    Authorized,
}

/// What the page should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateAction {
    /// Render the requested page.
    Render,
    /// Navigate to the given route instead.
    Redirect(String),
}

/// Result of one resolution cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct GateOutcome {
    /// Terminal state reached.
    pub state: GateState,
    /// Exactly one action, taken once.
    pub action: GateAction,
    /// Resolved principal, if any.
    pub principal: Option<Principal>,
    /// Resolved profile, if looked up and present.
    pub profile: Option<Profile>,
}

/// Decides whether a page renders or redirects.
#[derive(Clone)]
pub struct AccessGate {
    session: SessionResolver,
    portal: PortalConfig,
}

impl AccessGate {
    /// Creates a gate.
    pub fn new(session: SessionResolver, portal: PortalConfig) -> Self {
        Self { session, portal }
    }

    /// Home route for a role.
    pub fn home_for(&self, role: Role) -> &str {
        match role {
            Role::Admin => &self.portal.admin_home,
            Role::Citizen => &self.portal.citizen_home,
        }
    }

    /// Resolve the session and decide, given the page's required role.
    pub async fn enter(&self, required_role: Option<Role>) -> AppResult<GateOutcome> {
        debug!(required_role = ?required_role, state = ?GateState::Resolving, "Gate entered");

        let Some(principal) = self.session.current_principal().await? else {
            return Ok(self.outcome(
                GateState::Unauthenticated,
                GateAction::Redirect(self.portal.login_route.clone()),
                None,
                None,
            ));
        };

        let Some(required) = required_role else {
            return Ok(self.outcome(
                GateState::Authorized,
                GateAction::Render,
                Some(principal),
                None,
            ));
        };

        let profile = self.session.profile_of(principal.id).await?;
        let (state, action) = match &profile {
            // No role falls back to the citizen home, which then renders
            // in place so the page can prompt for the missing profile.
            None if required == Role::Citizen => {
                (GateState::AuthenticatedNoRole, GateAction::Render)
            }
            None => (
                GateState::AuthenticatedNoRole,
                GateAction::Redirect(self.portal.citizen_home.clone()),
            ),
            Some(p) if p.role != required => (
                GateState::AuthenticatedWrongRole,
                GateAction::Redirect(self.home_for(p.role).to_string()),
            ),
            Some(_) => (GateState::Authorized, GateAction::Render),
        };

        Ok(self.outcome(state, action, Some(principal), profile))
    }

    fn outcome(
        &self,
        state: GateState,
        action: GateAction,
        principal: Option<Principal>,
        profile: Option<Profile>,
    ) -> GateOutcome {
        debug!(state = ?state, action = ?action, "Gate resolved");
        GateOutcome {
            state,
            action,
            principal,
            profile,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use permit_core::config::AuthConfig;
    use permit_database::memory::MemoryProfileStore;
    use permit_database::{PrincipalDirectory, ProfileStore};
    use permit_entity::ProfileFields;

    use crate::provider::{AuthProvider, LocalAuthProvider};

    async fn gate_with(role: Option<Role>, signed_in: bool) -> AccessGate {
        let auth = Arc::new(LocalAuthProvider::new(&AuthConfig::default()));
        let store = Arc::new(MemoryProfileStore::new());
        let principal = auth.sign_up("ben@example.com", "secret1", "ben").await.unwrap();
        if let Some(role) = role {
            store.register_principal(&principal).await.unwrap();
            let fields = ProfileFields {
                username: "ben".into(),
                first_name: "Ben".into(),
                last_name: "Cruz".into(),
                ..Default::default()
            };
            store
                .upsert(&Profile::for_principal(&principal, &fields, role))
                .await
                .unwrap();
        }
        if !signed_in {
            auth.sign_out().await.unwrap();
        }
        AccessGate::new(SessionResolver::new(auth, store), PortalConfig::default())
    }

    #[tokio::test]
    async fn test_unauthenticated_redirects_to_login() {
        let gate = gate_with(Some(Role::Admin), false).await;
        let out = gate.enter(Some(Role::Admin)).await.unwrap();
        assert_eq!(out.state, GateState::Unauthenticated);
        assert_eq!(out.action, GateAction::Redirect("/login".into()));
    }

    #[tokio::test]
    async fn test_citizen_on_admin_page_goes_to_citizen_home() {
        let gate = gate_with(Some(Role::Citizen), true).await;
        let out = gate.enter(Some(Role::Admin)).await.unwrap();
        assert_eq!(out.state, GateState::AuthenticatedWrongRole);
        assert_eq!(out.action, GateAction::Redirect("/citizen/dashboard".into()));
    }

    #[tokio::test]
    async fn test_admin_on_citizen_page_goes_to_admin_home() {
        let gate = gate_with(Some(Role::Admin), true).await;
        let out = gate.enter(Some(Role::Citizen)).await.unwrap();
        assert_eq!(out.action, GateAction::Redirect("/admin/dashboard".into()));
    }

    #[tokio::test]
    async fn test_matching_role_renders() {
        let gate = gate_with(Some(Role::Admin), true).await;
        let out = gate.enter(Some(Role::Admin)).await.unwrap();
        assert_eq!(out.state, GateState::Authorized);
        assert_eq!(out.action, GateAction::Render);
        assert_eq!(out.profile.map(|p| p.role), Some(Role::Admin));
    }

    #[tokio::test]
    async fn test_no_requirement_ignores_profile() {
        let gate = gate_with(None, true).await;
        let out = gate.enter(None).await.unwrap();
        assert_eq!(out.state, GateState::Authorized);
        assert!(out.principal.is_some());
        assert!(out.profile.is_none());
    }

    #[tokio::test]
    async fn test_missing_profile_on_admin_page_goes_to_citizen_home() {
        let gate = gate_with(None, true).await;
        let out = gate.enter(Some(Role::Admin)).await.unwrap();
        assert_eq!(out.state, GateState::AuthenticatedNoRole);
        assert_eq!(out.action, GateAction::Redirect("/citizen/dashboard".into()));
    }

    #[tokio::test]
    async fn test_missing_profile_on_citizen_page_renders_without_loop() {
        let gate = gate_with(None, true).await;
        let out = gate.enter(Some(Role::Citizen)).await.unwrap();
        assert_eq!(out.state, GateState::AuthenticatedNoRole);
        assert_eq!(out.action, GateAction::Render);
        assert!(out.principal.is_some());
        assert!(out.profile.is_none());
    }

    #[test]
    fn test_home_routes() {
        let auth: Arc<dyn AuthProvider> =
            Arc::new(LocalAuthProvider::new(&AuthConfig::default()));
        let gate = AccessGate::new(
            SessionResolver::new(auth, Arc::new(MemoryProfileStore::new())),
            PortalConfig::default(),
        );
        assert_eq!(gate.home_for(Role::Admin), "/admin/dashboard");
        assert_eq!(gate.home_for(Role::Citizen), "/citizen/dashboard");
    }
}
