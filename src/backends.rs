//! Store, auth, and delivery wiring.

use std::sync::Arc;
use std::time::Duration;

use permit_auth::{AuthProvider, LocalAuthProvider};
use permit_core::config::AppConfig;
use permit_database::memory::{
    MemoryNotificationStore, MemoryPaymentStore, MemoryPermitStore, MemoryProfileStore,
    MemoryUploadStore,
};
use permit_database::repositories::{
    NotificationRepository, PaymentRepository, PermitRepository, ProfileRepository,
    UploadRepository,
};
use permit_database::{
    DatabasePool, NotificationStore, PaymentStore, PermitStore, ProfileStore, UploadStore,
};
use permit_service::{DirectoryDocumentSink, DocumentSink};

/// Everything the portal talks to.
#[derive(Clone)]
pub struct PortalBackends {
    /// Auth subsystem.
    pub auth: Arc<dyn AuthProvider>,
    /// Profile rows.
    pub profiles: Arc<dyn ProfileStore>,
    /// Permit records.
    pub permits: Arc<dyn PermitStore>,
    /// Payment records.
    pub payments: Arc<dyn PaymentStore>,
    /// Uploaded images.
    pub uploads: Arc<dyn UploadStore>,
    /// Notification boundary.
    pub notifications: Arc<dyn NotificationStore>,
    /// Print delivery.
    pub documents: Arc<dyn DocumentSink>,
}

impl PortalBackends {
    /// PostgreSQL stores over `pool`, with the given auth subsystem.
    pub fn postgres(config: &AppConfig, pool: &DatabasePool, auth: Arc<dyn AuthProvider>) -> Self {
        let pg = pool.pool().clone();
        Self {
            auth,
            profiles: Arc::new(ProfileRepository::new(pg.clone())),
            permits: Arc::new(PermitRepository::new(pg.clone())),
            payments: Arc::new(PaymentRepository::new(pg.clone())),
            uploads: Arc::new(UploadRepository::new(pg.clone())),
            notifications: Arc::new(NotificationRepository::new(pg)),
            documents: Arc::new(DirectoryDocumentSink::from_config(&config.portal)),
        }
    }
}

/// In-process backends with concrete handles for seeding and inspection.
#[derive(Clone)]
pub struct MemoryBackends {
    /// Auth subsystem.
    pub auth: Arc<LocalAuthProvider>,
    /// Profile rows.
    pub profiles: Arc<MemoryProfileStore>,
    /// Permit records.
    pub permits: Arc<MemoryPermitStore>,
    /// Payment records.
    pub payments: Arc<MemoryPaymentStore>,
    /// Uploaded images.
    pub uploads: Arc<MemoryUploadStore>,
    /// Sent notifications.
    pub notifications: Arc<MemoryNotificationStore>,
    /// Download directory sink.
    pub documents: Arc<DirectoryDocumentSink>,
}

impl MemoryBackends {
    /// New principals become visible to profile writes after `commit_lag`.
    pub fn new(config: &AppConfig, commit_lag: Duration) -> Self {
        let profiles = Arc::new(MemoryProfileStore::new());
        let auth = Arc::new(
            LocalAuthProvider::new(&config.auth)
                .with_principal_directory(profiles.clone(), commit_lag),
        );
        Self {
            auth,
            profiles,
            permits: Arc::new(MemoryPermitStore::new()),
            payments: Arc::new(MemoryPaymentStore::new()),
            uploads: Arc::new(MemoryUploadStore::new()),
            notifications: Arc::new(MemoryNotificationStore::new()),
            documents: Arc::new(DirectoryDocumentSink::from_config(&config.portal)),
        }
    }

    /// Trait-object view for [`crate::Portal::new`].
    pub fn backends(&self) -> PortalBackends {
        PortalBackends {
            auth: self.auth.clone(),
            profiles: self.profiles.clone(),
            permits: self.permits.clone(),
            payments: self.payments.clone(),
            uploads: self.uploads.clone(),
            notifications: self.notifications.clone(),
            documents: self.documents.clone(),
        }
    }
}
