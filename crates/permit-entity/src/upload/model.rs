//! Uploaded image entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use permit_core::types::{ImageId, PermitId};

use super::category::ImageCategory;

/// An image attached to a permit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UploadedImage {
    /// Unique image identifier.
    pub id: ImageId,
    /// Owning permit.
    pub permit_id: PermitId,
    /// What the image evidences.
    pub category: ImageCategory,
    /// Public URL of the stored object.
    pub public_url: String,
    /// Upload time.
    pub uploaded_at: DateTime<Utc>,
}
