//! Payment status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Settlement state of a payment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Awaiting confirmation.
    Pending,
    /// Settled.
    Completed,
    /// Declined or errored.
    Failed,
    /// Returned to the payer.
    Refunded,
}

impl PaymentStatus {
    /// Check if this payment counts as settled.
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
