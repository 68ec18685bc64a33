//! In-memory payment store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use permit_core::store::StoreResult;
use permit_core::types::PermitId;
use permit_entity::Payment;

use crate::store::PaymentStore;

/// Payment records in insertion order.
#[derive(Debug, Default)]
pub struct MemoryPaymentStore {
    payments: RwLock<Vec<Payment>>,
}

impl MemoryPaymentStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a payment attempt.
    pub async fn record(&self, payment: Payment) {
        self.payments.write().await.push(payment);
    }
}

#[async_trait]
impl PaymentStore for MemoryPaymentStore {
    async fn list_for_permits(&self, permit_ids: &[PermitId]) -> StoreResult<Vec<Payment>> {
        Ok(self
            .payments
            .read()
            .await
            .iter()
            .filter(|p| permit_ids.contains(&p.permit_id))
            .cloned()
            .collect())
    }
}
