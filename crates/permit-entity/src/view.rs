//! Read-time derived permit view.

use serde::{Deserialize, Serialize};

use crate::payment::Payment;
use crate::permit::Permit;

/// A permit combined with its reconciled payment status.
///
/// Computed on every load and never stored. `has_completed_payment` is true
/// iff a completed payment or a proof-of-payment image exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedPermitView {
    /// The underlying permit.
    pub permit: Permit,
    /// Whether any payment evidence exists.
    pub has_completed_payment: bool,
    /// Most recent completed payment record, if any.
    pub last_completed_payment: Option<Payment>,
}
