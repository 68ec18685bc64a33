//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use permit_core::types::{NotificationId, PermitId, PrincipalId};

/// Category of a portal notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// The permit is approved and can be collected.
    ReadyForPickup,
    /// The permit status changed.
    StatusUpdate,
}

/// A notification addressed to an applicant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct NotificationRecord {
    /// Unique notification identifier.
    pub id: NotificationId,
    /// Addressed profile.
    pub recipient_id: PrincipalId,
    /// Permit the notification is about.
    pub permit_id: PermitId,
    /// Short heading.
    pub title: String,
    /// Message text.
    pub body: String,
    /// Category.
    pub kind: NotificationKind,
    /// When it was sent.
    pub created_at: DateTime<Utc>,
}

impl NotificationRecord {
    /// Create a new notification stamped now.
    pub fn new(
        recipient_id: PrincipalId,
        permit_id: PermitId,
        title: impl Into<String>,
        body: impl Into<String>,
        kind: NotificationKind,
    ) -> Self {
        Self {
            id: NotificationId::new(),
            recipient_id,
            permit_id,
            title: title.into(),
            body: body.into(),
            kind,
            created_at: Utc::now(),
        }
    }
}
