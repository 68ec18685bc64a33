//! Payment repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use permit_core::store::StoreResult;
use permit_core::types::PermitId;
use permit_entity::Payment;

use crate::error::store_error;
use crate::store::PaymentStore;

/// Payment rows in PostgreSQL.
#[derive(Debug, Clone)]
pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    /// Create a new payment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a payment attempt.
    pub async fn create(&self, payment: &Payment) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO payments (id, permit_id, payment_status, reference, amount_cents, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(payment.id)
        .bind(payment.permit_id)
        .bind(payment.payment_status)
        .bind(&payment.reference)
        .bind(payment.amount_cents)
        .bind(payment.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| store_error("Failed to record payment", e))?;
        Ok(())
    }
}

#[async_trait]
impl PaymentStore for PaymentRepository {
    async fn list_for_permits(&self, permit_ids: &[PermitId]) -> StoreResult<Vec<Payment>> {
        if permit_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = permit_ids.iter().map(|id| id.into_uuid()).collect();
        sqlx::query_as::<_, Payment>(
            "SELECT id, permit_id, payment_status, reference, amount_cents, created_at \
             FROM payments WHERE permit_id = ANY($1) ORDER BY created_at",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| store_error("Failed to list payments", e))
    }
}
