//! Uploaded image repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use permit_core::store::StoreResult;
use permit_core::types::PermitId;
use permit_entity::UploadedImage;

use crate::error::store_error;
use crate::store::UploadStore;

/// Uploaded image rows in PostgreSQL.
#[derive(Debug, Clone)]
pub struct UploadRepository {
    pool: PgPool,
}

impl UploadRepository {
    /// Create a new upload repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UploadStore for UploadRepository {
    async fn list_for_permits(&self, permit_ids: &[PermitId]) -> StoreResult<Vec<UploadedImage>> {
        if permit_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = permit_ids.iter().map(|id| id.into_uuid()).collect();
        sqlx::query_as::<_, UploadedImage>(
            "SELECT id, permit_id, category, public_url, uploaded_at \
             FROM uploaded_images WHERE permit_id = ANY($1) ORDER BY uploaded_at",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| store_error("Failed to list uploaded images", e))
    }
}
