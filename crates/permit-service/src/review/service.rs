//! Approve and reject permits on behalf of an admin.

use std::sync::Arc;

use tracing::info;

use permit_auth::SessionResolver;
use permit_core::error::AppError;
use permit_core::result::AppResult;
use permit_core::types::PermitId;
use permit_database::PermitStore;
use permit_entity::{Permit, PermitStatus};

/// Moves permits through review.
#[derive(Clone)]
pub struct ReviewService {
    session: SessionResolver,
    permits: Arc<dyn PermitStore>,
}

impl ReviewService {
    /// Creates a new review service.
    pub fn new(session: SessionResolver, permits: Arc<dyn PermitStore>) -> Self {
        Self { session, permits }
    }

    /// Approve a permit.
    pub async fn approve(&self, id: PermitId) -> AppResult<Permit> {
        self.transition(id, PermitStatus::Approved).await
    }

    /// Reject a permit.
    pub async fn reject(&self, id: PermitId) -> AppResult<Permit> {
        self.transition(id, PermitStatus::Rejected).await
    }

    /// Mark a permit as being reviewed.
    pub async fn start_review(&self, id: PermitId) -> AppResult<Permit> {
        self.transition(id, PermitStatus::UnderReview).await
    }

    async fn transition(&self, id: PermitId, target: PermitStatus) -> AppResult<Permit> {
        let actor = self.session.require_admin().await?;

        let current = self
            .permits
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Permit {id} not found")))?;

        if !current.status.can_transition_to(target) {
            return Err(AppError::conflict(format!(
                "Cannot move permit from {} to {}",
                current.status, target
            )));
        }

        let updated = self
            .permits
            .update_status(id, current.status, target, actor.principal.id)
            .await?;

        info!(
            permit_id = %id,
            from = %current.status,
            to = %target,
            reviewer = %actor.principal.id,
            "Permit status changed"
        );
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use permit_auth::{AuthProvider, LocalAuthProvider};
    use permit_core::config::AuthConfig;
    use permit_core::error::ErrorKind;
    use permit_database::memory::{MemoryPermitStore, MemoryProfileStore};
    use permit_database::{PrincipalDirectory, ProfileStore};
    use permit_entity::{DetailedPermit, Profile, ProfileFields, Role};

    async fn service(role: Role) -> (ReviewService, Arc<MemoryPermitStore>) {
        let permits = Arc::new(MemoryPermitStore::new());
        (service_over(role, permits.clone()).await, permits)
    }

    async fn service_over(role: Role, permits: Arc<dyn PermitStore>) -> ReviewService {
        let auth = Arc::new(LocalAuthProvider::new(&AuthConfig::default()));
        let profiles = Arc::new(MemoryProfileStore::new());
        let principal = auth.sign_up("staff@example.com", "secret1", "staff").await.unwrap();
        profiles.register_principal(&principal).await.unwrap();
        let fields = ProfileFields {
            username: "staff".into(),
            first_name: "Lorna".into(),
            last_name: "Diaz".into(),
            ..Default::default()
        };
        profiles
            .upsert(&Profile::for_principal(&principal, &fields, role))
            .await
            .unwrap();

        let session = SessionResolver::new(auth, profiles);
        ReviewService::new(session, permits)
    }

    /// Pauses after every read so concurrent reviews interleave.
    struct SlowReads {
        inner: Arc<MemoryPermitStore>,
    }

    #[async_trait::async_trait]
    impl PermitStore for SlowReads {
        async fn list_by_status(
            &self,
            status: PermitStatus,
        ) -> permit_core::store::StoreResult<Vec<Permit>> {
            self.inner.list_by_status(status).await
        }

        async fn find_by_id(
            &self,
            id: PermitId,
        ) -> permit_core::store::StoreResult<Option<Permit>> {
            let permit = self.inner.find_by_id(id).await;
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            permit
        }

        async fn find_detailed(
            &self,
            id: PermitId,
        ) -> permit_core::store::StoreResult<Option<DetailedPermit>> {
            self.inner.find_detailed(id).await
        }

        async fn update_status(
            &self,
            id: PermitId,
            expected: PermitStatus,
            status: PermitStatus,
            reviewer: permit_core::types::PrincipalId,
        ) -> permit_core::store::StoreResult<Permit> {
            self.inner.update_status(id, expected, status, reviewer).await
        }
    }

    async fn pending(permits: &MemoryPermitStore) -> PermitId {
        let now = Utc::now();
        let id = PermitId::new();
        permits
            .insert(DetailedPermit {
                permit: Permit {
                    id,
                    applicant_id: None,
                    applicant: None,
                    permit_type: None,
                    status: PermitStatus::Pending,
                    address: None,
                    created_at: now,
                    updated_at: now,
                },
                applicant_email: None,
                applicant_phone: None,
                applicant_address: None,
                business_name: None,
                purpose: None,
                reviewed_by: None,
                approved_at: None,
                form_data: serde_json::json!({}),
            })
            .await;
        id
    }

    #[tokio::test]
    async fn test_admin_approves_pending_permit() {
        let (svc, permits) = service(Role::Admin).await;
        let id = pending(&permits).await;

        let permit = svc.approve(id).await.unwrap();
        assert_eq!(permit.status, PermitStatus::Approved);
        let stored = permits.find_detailed(id).await.unwrap().unwrap();
        assert!(stored.approved_at.is_some());
        assert!(stored.reviewed_by.is_some());
    }

    #[tokio::test]
    async fn test_terminal_status_is_conflict() {
        let (svc, permits) = service(Role::Admin).await;
        let id = pending(&permits).await;
        svc.reject(id).await.unwrap();

        let err = svc.approve(id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_citizen_cannot_review() {
        let (svc, permits) = service(Role::Citizen).await;
        let id = pending(&permits).await;
        let err = svc.start_review(id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }

    #[tokio::test]
    async fn test_unknown_permit_is_not_found() {
        let (svc, _) = service(Role::Admin).await;
        let err = svc.approve(PermitId::new()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_approve_and_reject_has_one_winner() {
        let inner = Arc::new(MemoryPermitStore::new());
        let id = pending(&inner).await;
        let svc = service_over(Role::Admin, Arc::new(SlowReads { inner: inner.clone() })).await;

        let (approved, rejected) = tokio::join!(svc.approve(id), svc.reject(id));

        let winner = match (approved, rejected) {
            (Ok(permit), Err(err)) | (Err(err), Ok(permit)) => {
                assert_eq!(err.kind, ErrorKind::Conflict);
                permit.status
            }
            (a, b) => panic!("expected exactly one winner, got {a:?} and {b:?}"),
        };
        let stored = inner.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.status, winner);
    }
}
