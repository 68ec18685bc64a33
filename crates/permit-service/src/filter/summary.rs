//! Paid/unpaid counts over a filtered set.

use serde::{Deserialize, Serialize};

use permit_entity::DerivedPermitView;

/// Counts over the currently filtered permits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermitSummary {
    /// Permits in the set.
    pub total: usize,
    /// Permits with payment evidence.
    pub paid: usize,
    /// `total - paid`.
    pub unpaid: usize,
}

/// Summarize a filtered set.
pub fn summarize(views: &[&DerivedPermitView]) -> PermitSummary {
    let total = views.len();
    let paid = views.iter().filter(|v| v.has_completed_payment).count();
    PermitSummary {
        total,
        paid,
        unpaid: total.saturating_sub(paid),
    }
}
