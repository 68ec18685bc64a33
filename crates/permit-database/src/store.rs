//! Store traits making up the persistence boundary.

use async_trait::async_trait;

use permit_core::store::StoreResult;
use permit_core::types::{PermitId, PrincipalId};
use permit_entity::{
    DetailedPermit, NotificationRecord, Payment, Permit, PermitStatus, Principal, Profile,
    UploadedImage,
};

/// Profile rows, keyed by principal id.
#[async_trait]
pub trait ProfileStore: Send + Sync + 'static {
    /// Insert the profile, or replace the row with the same id.
    ///
    /// Fails with a foreign-key violation while the principal is not yet
    /// visible to the store.
    async fn upsert(&self, profile: &Profile) -> StoreResult<Profile>;

    /// Find a profile by its principal id.
    async fn find_by_id(&self, id: PrincipalId) -> StoreResult<Option<Profile>>;
}

/// Write side of the principal table that profiles reference.
#[async_trait]
pub trait PrincipalDirectory: Send + Sync + 'static {
    /// Make a principal visible to profile writes. Idempotent.
    async fn register_principal(&self, principal: &Principal) -> StoreResult<()>;
}

/// Permit records.
#[async_trait]
pub trait PermitStore: Send + Sync + 'static {
    /// List summary records in the given status.
    async fn list_by_status(&self, status: PermitStatus) -> StoreResult<Vec<Permit>>;

    /// Find a summary record.
    async fn find_by_id(&self, id: PermitId) -> StoreResult<Option<Permit>>;

    /// Find the detailed record used for printing.
    async fn find_detailed(&self, id: PermitId) -> StoreResult<Option<DetailedPermit>>;

    /// Move a permit from `expected` to `status` and record the reviewer.
    ///
    /// The status check and the write are one atomic step. A permit no
    /// longer in `expected` fails with [`StoreErrorKind::Conflict`].
    ///
    /// [`StoreErrorKind::Conflict`]: permit_core::StoreErrorKind::Conflict
    async fn update_status(
        &self,
        id: PermitId,
        expected: PermitStatus,
        status: PermitStatus,
        reviewer: PrincipalId,
    ) -> StoreResult<Permit>;
}

/// Payment records.
#[async_trait]
pub trait PaymentStore: Send + Sync + 'static {
    /// All payments for any of the given permits.
    async fn list_for_permits(&self, permit_ids: &[PermitId]) -> StoreResult<Vec<Payment>>;
}

/// Uploaded image records.
#[async_trait]
pub trait UploadStore: Send + Sync + 'static {
    /// All images for any of the given permits.
    async fn list_for_permits(&self, permit_ids: &[PermitId]) -> StoreResult<Vec<UploadedImage>>;
}

/// Notification delivery.
#[async_trait]
pub trait NotificationStore: Send + Sync + 'static {
    /// Deliver a notification. Success means the record was accepted.
    async fn send(&self, notification: &NotificationRecord) -> StoreResult<()>;

    /// Notifications addressed to a profile, newest first.
    async fn list_for_recipient(
        &self,
        recipient_id: PrincipalId,
    ) -> StoreResult<Vec<NotificationRecord>>;
}
