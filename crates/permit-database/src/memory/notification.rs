//! In-memory notification store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use permit_core::store::StoreResult;
use permit_core::types::PrincipalId;
use permit_entity::NotificationRecord;

use crate::store::NotificationStore;

/// Delivered notifications in send order.
#[derive(Debug, Default)]
pub struct MemoryNotificationStore {
    sent: RwLock<Vec<NotificationRecord>>,
}

impl MemoryNotificationStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything sent so far, oldest first.
    pub async fn sent(&self) -> Vec<NotificationRecord> {
        self.sent.read().await.clone()
    }
}

#[async_trait]
impl NotificationStore for MemoryNotificationStore {
    async fn send(&self, notification: &NotificationRecord) -> StoreResult<()> {
        self.sent.write().await.push(notification.clone());
        Ok(())
    }

    async fn list_for_recipient(
        &self,
        recipient_id: PrincipalId,
    ) -> StoreResult<Vec<NotificationRecord>> {
        let mut records: Vec<_> = self
            .sent
            .read()
            .await
            .iter()
            .filter(|n| n.recipient_id == recipient_id)
            .cloned()
            .collect();
        records.reverse();
        Ok(records)
    }
}
