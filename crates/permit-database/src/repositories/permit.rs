//! Permit repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use permit_core::store::{StoreError, StoreResult};
use permit_core::types::{PermitId, PermitTypeId, PrincipalId};
use permit_entity::{ApplicantName, DetailedPermit, Permit, PermitStatus, PermitType};

use crate::error::store_error;
use crate::store::PermitStore;

const SUMMARY_COLUMNS: &str = r#"
    p.id, p.applicant_id, p.status, p.address, p.created_at, p.updated_at,
    pr.first_name AS applicant_first_name, pr.last_name AS applicant_last_name,
    pt.id AS permit_type_id, pt.title AS permit_type_title, pt.slug AS permit_type_slug
"#;

const JOINS: &str = r#"
    FROM permits p
    LEFT JOIN profiles pr ON pr.id = p.applicant_id
    LEFT JOIN permit_types pt ON pt.id = p.permit_type_id
"#;

/// Joined summary row.
#[derive(Debug, FromRow)]
struct PermitRow {
    id: PermitId,
    applicant_id: Option<PrincipalId>,
    status: PermitStatus,
    address: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    applicant_first_name: Option<String>,
    applicant_last_name: Option<String>,
    permit_type_id: Option<PermitTypeId>,
    permit_type_title: Option<String>,
    permit_type_slug: Option<String>,
}

impl From<PermitRow> for Permit {
    fn from(row: PermitRow) -> Self {
        let applicant = row.applicant_id.map(|_| ApplicantName {
            first_name: row.applicant_first_name,
            last_name: row.applicant_last_name,
        });
        let permit_type = match (row.permit_type_id, row.permit_type_title) {
            (Some(id), Some(title)) => Some(PermitType {
                id,
                title,
                slug: row.permit_type_slug.unwrap_or_default(),
            }),
            _ => None,
        };
        Permit {
            id: row.id,
            applicant_id: row.applicant_id,
            applicant,
            permit_type,
            status: row.status,
            address: row.address,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Joined detail row.
#[derive(Debug, FromRow)]
struct DetailedPermitRow {
    #[sqlx(flatten)]
    summary: PermitRow,
    applicant_email: Option<String>,
    applicant_phone: Option<String>,
    applicant_address: Option<String>,
    business_name: Option<String>,
    purpose: Option<String>,
    reviewed_by: Option<PrincipalId>,
    approved_at: Option<DateTime<Utc>>,
    form_data: serde_json::Value,
}

impl From<DetailedPermitRow> for DetailedPermit {
    fn from(row: DetailedPermitRow) -> Self {
        DetailedPermit {
            permit: row.summary.into(),
            applicant_email: row.applicant_email,
            applicant_phone: row.applicant_phone,
            applicant_address: row.applicant_address,
            business_name: row.business_name,
            purpose: row.purpose,
            reviewed_by: row.reviewed_by,
            approved_at: row.approved_at,
            form_data: row.form_data,
        }
    }
}

/// Permit rows in PostgreSQL.
#[derive(Debug, Clone)]
pub struct PermitRepository {
    pool: PgPool,
}

impl PermitRepository {
    /// Create a new permit repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PermitStore for PermitRepository {
    async fn list_by_status(&self, status: PermitStatus) -> StoreResult<Vec<Permit>> {
        let sql = format!(
            "SELECT {SUMMARY_COLUMNS} {JOINS} WHERE p.status = $1 ORDER BY p.updated_at DESC"
        );
        let rows = sqlx::query_as::<_, PermitRow>(&sql)
            .bind(status)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| store_error("Failed to list permits", e))?;
        Ok(rows.into_iter().map(Permit::from).collect())
    }

    async fn find_by_id(&self, id: PermitId) -> StoreResult<Option<Permit>> {
        let sql = format!("SELECT {SUMMARY_COLUMNS} {JOINS} WHERE p.id = $1");
        let row = sqlx::query_as::<_, PermitRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error("Failed to find permit", e))?;
        Ok(row.map(Permit::from))
    }

    async fn find_detailed(&self, id: PermitId) -> StoreResult<Option<DetailedPermit>> {
        let sql = format!(
            "SELECT {SUMMARY_COLUMNS},
                 pr.email AS applicant_email, pr.phone AS applicant_phone,
                 pr.address AS applicant_address,
                 p.business_name, p.purpose, p.reviewed_by, p.approved_at, p.form_data
             {JOINS} WHERE p.id = $1"
        );
        let row = sqlx::query_as::<_, DetailedPermitRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error("Failed to load permit details", e))?;
        Ok(row.map(DetailedPermit::from))
    }

    async fn update_status(
        &self,
        id: PermitId,
        expected: PermitStatus,
        status: PermitStatus,
        reviewer: PrincipalId,
    ) -> StoreResult<Permit> {
        let approved_at = (status == PermitStatus::Approved).then(Utc::now);
        let result = sqlx::query(
            "UPDATE permits SET status = $2, reviewed_by = $3, \
             approved_at = COALESCE($4, approved_at), updated_at = NOW() \
             WHERE id = $1 AND status = $5",
        )
        .bind(id)
        .bind(status)
        .bind(reviewer)
        .bind(approved_at)
        .bind(expected)
        .execute(&self.pool)
        .await
        .map_err(|e| store_error("Failed to update permit status", e))?;

        if result.rows_affected() == 0 {
            return Err(match self.find_by_id(id).await? {
                Some(current) => StoreError::conflict(format!(
                    "Permit {id} is {}, not {expected}",
                    current.status
                )),
                None => StoreError::not_found(format!("Permit {id} not found")),
            });
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| StoreError::not_found(format!("Permit {id} not found")))
    }
}
