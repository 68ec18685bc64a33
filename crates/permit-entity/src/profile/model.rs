//! Principal and profile models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use permit_core::types::PrincipalId;

use super::role::Role;

/// An authenticated identity, owned by the auth subsystem.
///
/// Immutable once committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Identity id; also the id of the principal's profile.
    pub id: PrincipalId,
    /// Sign-in email.
    pub email: String,
    /// Username captured at sign-up.
    pub username: String,
}

/// Business-facing user record keyed to a [`Principal`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Profile {
    /// Equals the owning principal's id.
    pub id: PrincipalId,
    /// Unique login name.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Middle name (optional).
    pub middle_name: Option<String>,
    /// Family name.
    pub last_name: String,
    /// Portal role.
    pub role: Role,
    /// Contact number (optional).
    pub phone: Option<String>,
    /// Postal address (optional).
    pub address: Option<String>,
    /// When the row was first written.
    pub created_at: DateTime<Utc>,
    /// When the row was last written.
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Build a profile row for a freshly created principal.
    pub fn for_principal(principal: &Principal, fields: &ProfileFields, role: Role) -> Self {
        let now = Utc::now();
        Self {
            id: principal.id,
            username: fields.username.clone(),
            email: principal.email.clone(),
            first_name: fields.first_name.clone(),
            middle_name: fields.middle_name.clone(),
            last_name: fields.last_name.clone(),
            role,
            phone: fields.phone.clone(),
            address: fields.address.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    /// `first last`, trimmed.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Profile data collected at registration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProfileFields {
    /// Desired username.
    #[validate(length(min = 3, max = 64))]
    pub username: String,
    /// Given name.
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    /// Middle name (optional).
    pub middle_name: Option<String>,
    /// Family name.
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    /// Contact number (optional).
    pub phone: Option<String>,
    /// Postal address (optional).
    pub address: Option<String>,
}
