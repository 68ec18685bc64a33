//! Profile repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use permit_core::store::StoreResult;
use permit_core::types::PrincipalId;
use permit_entity::Profile;

use crate::error::store_error;
use crate::store::ProfileStore;

/// Profile rows in PostgreSQL.
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    /// Create a new profile repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for ProfileRepository {
    async fn upsert(&self, profile: &Profile) -> StoreResult<Profile> {
        sqlx::query_as::<_, Profile>(
            r#"INSERT INTO profiles
               (id, username, email, first_name, middle_name, last_name, role, phone, address,
                created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
               ON CONFLICT (id) DO UPDATE SET
                   username = EXCLUDED.username,
                   email = EXCLUDED.email,
                   first_name = EXCLUDED.first_name,
                   middle_name = EXCLUDED.middle_name,
                   last_name = EXCLUDED.last_name,
                   role = EXCLUDED.role,
                   phone = EXCLUDED.phone,
                   address = EXCLUDED.address,
                   updated_at = EXCLUDED.updated_at
               RETURNING *"#,
        )
        .bind(profile.id)
        .bind(&profile.username)
        .bind(&profile.email)
        .bind(&profile.first_name)
        .bind(&profile.middle_name)
        .bind(&profile.last_name)
        .bind(profile.role)
        .bind(&profile.phone)
        .bind(&profile.address)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| store_error("Failed to upsert profile", e))
    }

    async fn find_by_id(&self, id: PrincipalId) -> StoreResult<Option<Profile>> {
        sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error("Failed to find profile", e))
    }
}
