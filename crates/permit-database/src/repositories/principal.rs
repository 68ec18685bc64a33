//! Principal mirror repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use permit_core::store::StoreResult;
use permit_entity::Principal;

use crate::error::store_error;
use crate::store::PrincipalDirectory;

/// Principal mirror rows in PostgreSQL.
#[derive(Debug, Clone)]
pub struct PrincipalRepository {
    pool: PgPool,
}

impl PrincipalRepository {
    /// Create a new principal repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PrincipalDirectory for PrincipalRepository {
    async fn register_principal(&self, principal: &Principal) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO principals (id, email, username) VALUES ($1, $2, $3) \
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(principal.id)
        .bind(&principal.email)
        .bind(&principal.username)
        .execute(&self.pool)
        .await
        .map_err(|e| store_error("Failed to register principal", e))?;
        Ok(())
    }
}
