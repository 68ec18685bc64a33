//! Notification repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use permit_core::store::StoreResult;
use permit_core::types::PrincipalId;
use permit_entity::NotificationRecord;

use crate::error::store_error;
use crate::store::NotificationStore;

/// Notification rows in PostgreSQL; inserting a row is delivery.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationStore for NotificationRepository {
    async fn send(&self, notification: &NotificationRecord) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO notifications (id, recipient_id, permit_id, title, body, kind, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(notification.id)
        .bind(notification.recipient_id)
        .bind(notification.permit_id)
        .bind(&notification.title)
        .bind(&notification.body)
        .bind(notification.kind)
        .bind(notification.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| store_error("Failed to send notification", e))?;
        Ok(())
    }

    async fn list_for_recipient(
        &self,
        recipient_id: PrincipalId,
    ) -> StoreResult<Vec<NotificationRecord>> {
        sqlx::query_as::<_, NotificationRecord>(
            "SELECT id, recipient_id, permit_id, title, body, kind, created_at \
             FROM notifications WHERE recipient_id = $1 ORDER BY created_at DESC",
        )
        .bind(recipient_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| store_error("Failed to list notifications", e))
    }
}
