//! Uploaded image category enumeration.

use serde::{Deserialize, Serialize};

/// What an uploaded image evidences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "image_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ImageCategory {
    /// Photo or scan of a payment receipt.
    ProofOfPayment,
    /// A document required by the permit type.
    Requirement,
    /// Anything else.
    Other,
}

impl ImageCategory {
    /// Check if this image counts as payment evidence.
    pub fn is_payment_proof(&self) -> bool {
        matches!(self, Self::ProofOfPayment)
    }
}
