//! In-memory permit store.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use permit_core::store::{StoreError, StoreResult};
use permit_core::types::{PermitId, PrincipalId};
use permit_entity::{DetailedPermit, Permit, PermitStatus};

use crate::store::PermitStore;

/// Detailed permit records in insertion order.
#[derive(Debug, Default)]
pub struct MemoryPermitStore {
    permits: RwLock<Vec<DetailedPermit>>,
}

impl MemoryPermitStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a permit record.
    pub async fn insert(&self, permit: DetailedPermit) {
        let mut permits = self.permits.write().await;
        match permits.iter_mut().find(|p| p.permit.id == permit.permit.id) {
            Some(slot) => *slot = permit,
            None => permits.push(permit),
        }
    }
}

#[async_trait]
impl PermitStore for MemoryPermitStore {
    async fn list_by_status(&self, status: PermitStatus) -> StoreResult<Vec<Permit>> {
        Ok(self
            .permits
            .read()
            .await
            .iter()
            .filter(|p| p.permit.status == status)
            .map(|p| p.permit.clone())
            .collect())
    }

    async fn find_by_id(&self, id: PermitId) -> StoreResult<Option<Permit>> {
        Ok(self
            .permits
            .read()
            .await
            .iter()
            .find(|p| p.permit.id == id)
            .map(|p| p.permit.clone()))
    }

    async fn find_detailed(&self, id: PermitId) -> StoreResult<Option<DetailedPermit>> {
        Ok(self
            .permits
            .read()
            .await
            .iter()
            .find(|p| p.permit.id == id)
            .cloned())
    }

    async fn update_status(
        &self,
        id: PermitId,
        expected: PermitStatus,
        status: PermitStatus,
        reviewer: PrincipalId,
    ) -> StoreResult<Permit> {
        let mut permits = self.permits.write().await;
        let record = permits
            .iter_mut()
            .find(|p| p.permit.id == id)
            .ok_or_else(|| StoreError::not_found(format!("Permit {id} not found")))?;

        if record.permit.status != expected {
            return Err(StoreError::conflict(format!(
                "Permit {id} is {}, not {expected}",
                record.permit.status
            )));
        }

        let now = Utc::now();
        record.permit.status = status;
        record.permit.updated_at = now;
        record.reviewed_by = Some(reviewer);
        if status == PermitStatus::Approved {
            record.approved_at = Some(now);
        }
        Ok(record.permit.clone())
    }
}
