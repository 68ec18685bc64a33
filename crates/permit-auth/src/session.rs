//! Current principal and profile resolution.
//!
//! Every call goes back to the auth subsystem and the profile store; a role
//! change takes effect on the next protected call.

use std::sync::Arc;

use permit_core::error::AppError;
use permit_core::result::AppResult;
use permit_core::types::PrincipalId;
use permit_database::ProfileStore;
use permit_entity::{Principal, Profile};

use crate::provider::AuthProvider;

/// The acting staff member or citizen, resolved for one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// Authenticated principal.
    pub principal: Principal,
    /// Profile row, absent while provisioning is incomplete.
    pub profile: Option<Profile>,
}

impl Actor {
    /// Whether the actor's profile carries the admin role.
    pub fn is_admin(&self) -> bool {
        self.profile.as_ref().is_some_and(|p| p.role.is_admin())
    }
}

/// Resolves who is acting.
#[derive(Clone)]
pub struct SessionResolver {
    auth: Arc<dyn AuthProvider>,
    profiles: Arc<dyn ProfileStore>,
}

impl SessionResolver {
    /// Creates a resolver.
    pub fn new(auth: Arc<dyn AuthProvider>, profiles: Arc<dyn ProfileStore>) -> Self {
        Self { auth, profiles }
    }

    /// The signed-in principal. `None` when signed out; errors only on
    /// transport failure.
    pub async fn current_principal(&self) -> AppResult<Option<Principal>> {
        self.auth.get_user().await
    }

    /// Profile row for `id`, if one exists.
    pub async fn profile_of(&self, id: PrincipalId) -> AppResult<Option<Profile>> {
        Ok(self.profiles.find_by_id(id).await?)
    }

    /// Principal and profile together.
    pub async fn current_actor(&self) -> AppResult<Option<Actor>> {
        let Some(principal) = self.current_principal().await? else {
            return Ok(None);
        };
        let profile = self.profile_of(principal.id).await?;
        Ok(Some(Actor { principal, profile }))
    }

    /// The current actor, who must be signed in.
    pub async fn require_actor(&self) -> AppResult<Actor> {
        self.current_actor()
            .await?
            .ok_or_else(|| AppError::authentication("You must be signed in"))
    }

    /// The current actor, who must be an admin.
    pub async fn require_admin(&self) -> AppResult<Actor> {
        let actor = self.require_actor().await?;
        if !actor.is_admin() {
            return Err(AppError::authorization("Admin access required"));
        }
        Ok(actor)
    }
}
