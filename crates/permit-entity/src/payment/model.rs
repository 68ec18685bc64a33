//! Payment entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use permit_core::types::{PaymentId, PermitId};

use super::status::PaymentStatus;

/// One payment attempt against a permit. A permit may have many.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Payment {
    /// Unique payment identifier.
    pub id: PaymentId,
    /// The permit being paid for.
    pub permit_id: PermitId,
    /// Settlement state.
    pub payment_status: PaymentStatus,
    /// Gateway or official-receipt reference.
    pub reference: Option<String>,
    /// Amount in centavos.
    pub amount_cents: Option<i64>,
    /// When the attempt was recorded.
    pub created_at: DateTime<Utc>,
}
