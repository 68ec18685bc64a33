//! Merges permit, payment, and upload records into derived views.
//!
//! Two evidence channels count as payment: a completed [`Payment`] row, or
//! an uploaded image in the proof-of-payment category. Either is enough.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use permit_core::result::AppResult;
use permit_core::types::PermitId;
use permit_database::{PaymentStore, PermitStore, UploadStore};
use permit_entity::{DerivedPermitView, Payment, Permit, PermitStatus, UploadedImage};

/// Derive one view per permit, preserving input order.
pub fn aggregate(
    permits: Vec<Permit>,
    payments: &[Payment],
    images: &[UploadedImage],
) -> Vec<DerivedPermitView> {
    let mut payments_by_permit: HashMap<PermitId, Vec<&Payment>> = HashMap::new();
    for payment in payments {
        payments_by_permit
            .entry(payment.permit_id)
            .or_default()
            .push(payment);
    }

    let mut has_image_proof: HashMap<PermitId, bool> = HashMap::new();
    for image in images {
        let flag = has_image_proof.entry(image.permit_id).or_default();
        *flag |= image.category.is_payment_proof();
    }

    permits
        .into_iter()
        .map(|permit| {
            let completed: Vec<&Payment> = payments_by_permit
                .get(&permit.id)
                .map(|list| {
                    list.iter()
                        .copied()
                        .filter(|p| p.payment_status.is_completed())
                        .collect()
                })
                .unwrap_or_default();

            // max_by_key keeps the last of equal keys.
            let latest = completed.iter().max_by_key(|p| p.created_at).copied();
            let image_proof = has_image_proof.get(&permit.id).copied().unwrap_or(false);

            DerivedPermitView {
                has_completed_payment: !completed.is_empty() || image_proof,
                last_completed_payment: latest.cloned(),
                permit,
            }
        })
        .collect()
}

/// Loads the approved working set and reconciles it.
#[derive(Clone)]
pub struct PermitStatusAggregator {
    permits: Arc<dyn PermitStore>,
    payments: Arc<dyn PaymentStore>,
    uploads: Arc<dyn UploadStore>,
}

impl PermitStatusAggregator {
    /// Creates an aggregator over the given stores.
    pub fn new(
        permits: Arc<dyn PermitStore>,
        payments: Arc<dyn PaymentStore>,
        uploads: Arc<dyn UploadStore>,
    ) -> Self {
        Self {
            permits,
            payments,
            uploads,
        }
    }

    /// Fetch approved permits with their payments and uploads, then derive.
    pub async fn load(&self) -> AppResult<Vec<DerivedPermitView>> {
        let permits = self.permits.list_by_status(PermitStatus::Approved).await?;
        let ids: Vec<PermitId> = permits.iter().map(|p| p.id).collect();

        let (payments, images) = futures::try_join!(
            self.payments.list_for_permits(&ids),
            self.uploads.list_for_permits(&ids),
        )?;

        let views = aggregate(permits, &payments, &images);
        debug!(
            permits = views.len(),
            paid = views.iter().filter(|v| v.has_completed_payment).count(),
            "Permit statuses reconciled"
        );
        Ok(views)
    }
}
