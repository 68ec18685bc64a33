//! Notify and print actions for approved permits.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{error, info, warn};

use permit_auth::SessionResolver;
use permit_core::error::{AppError, ErrorKind};
use permit_core::result::AppResult;
use permit_database::{NotificationStore, PermitStore};
use permit_entity::{NotificationKind, NotificationRecord, Permit};

use super::inflight::{InFlightChange, InFlightSet};
use super::sink::{DocumentSink, ViewOutcome};
use crate::document::{download_filename, render_document};

const PICKUP_TITLE: &str = "Permit Ready for Pickup";

/// How a print request was delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintOutcome {
    /// Streamed into an open print view.
    Opened,
    /// Saved as a download instead.
    Downloaded {
        /// File name the document was saved under.
        filename: String,
    },
}

/// Performs per-permit side effects with in-flight tracking.
pub struct ActionDispatcher {
    session: SessionResolver,
    permits: Arc<dyn PermitStore>,
    notifications: Arc<dyn NotificationStore>,
    sink: Arc<dyn DocumentSink>,
    in_flight: InFlightSet,
}

impl ActionDispatcher {
    /// Creates a dispatcher with its own in-flight set.
    pub fn new(
        session: SessionResolver,
        permits: Arc<dyn PermitStore>,
        notifications: Arc<dyn NotificationStore>,
        sink: Arc<dyn DocumentSink>,
    ) -> Self {
        Self {
            session,
            permits,
            notifications,
            sink,
            in_flight: InFlightSet::new(),
        }
    }

    /// Whether a notification for `permit` is outstanding.
    pub fn is_notifying(&self, permit: &Permit) -> bool {
        self.in_flight.contains(permit.id)
    }

    /// Observe in-flight marker transitions.
    pub fn in_flight_changes(&self) -> broadcast::Receiver<InFlightChange> {
        self.in_flight.subscribe()
    }

    /// Tell the applicant their permit can be collected.
    ///
    /// A failed send is returned as `DeliveryFailed` and is not retried.
    pub async fn notify_ready_for_pickup(&self, permit: &Permit) -> AppResult<NotificationRecord> {
        let recipient = permit
            .applicant_id
            .ok_or_else(|| AppError::not_found("Applicant not found for this permit"))?;

        let _guard = self.in_flight.enter(permit.id);

        let actor = self.session.require_actor().await?;
        let record = NotificationRecord::new(
            recipient,
            permit.id,
            PICKUP_TITLE,
            pickup_message(permit),
            NotificationKind::ReadyForPickup,
        );

        if let Err(e) = self.notifications.send(&record).await {
            error!(permit_id = %permit.id, error = %e, "Pickup notification failed");
            return Err(AppError::with_source(
                ErrorKind::DeliveryFailed,
                "Failed to send notification",
                e,
            ));
        }

        info!(
            permit_id = %permit.id,
            recipient_id = %recipient,
            sent_by = %actor.principal.id,
            "Pickup notification sent"
        );
        Ok(record)
    }

    /// Render the permit and hand it to the sink, downloading when the
    /// print view is blocked.
    pub async fn print_permit(&self, permit: &Permit) -> AppResult<PrintOutcome> {
        let detailed = self
            .permits
            .find_detailed(permit.id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Permit {} not found", permit.id)))?;

        let html = render_document(&detailed);

        match self.sink.open_view(&html).await.map_err(delivery_failed)? {
            ViewOutcome::Opened => {
                info!(permit_id = %permit.id, "Permit opened for printing");
                Ok(PrintOutcome::Opened)
            }
            ViewOutcome::Blocked => {
                let filename = download_filename(&detailed.permit);
                warn!(
                    permit_id = %permit.id,
                    filename = %filename,
                    "Print view blocked, downloading"
                );
                self.sink
                    .download(&filename, &html)
                    .await
                    .map_err(delivery_failed)?;
                Ok(PrintOutcome::Downloaded { filename })
            }
        }
    }
}

/// Body of the pickup notification.
fn pickup_message(permit: &Permit) -> String {
    let name = match permit.applicant_full_name() {
        name if name.is_empty() => "Applicant".to_string(),
        name => name,
    };
    let permit_title = permit.permit_type_title().unwrap_or("Your permit");
    format!(
        "Good day, {name}! {permit_title} has been approved and is ready for pickup at the \
         Municipal Hall. Please bring a valid ID and your official receipt."
    )
}

fn delivery_failed(e: AppError) -> AppError {
    match e.kind {
        ErrorKind::DeliveryFailed | ErrorKind::Validation => e,
        _ => AppError::with_source(ErrorKind::DeliveryFailed, "Failed to deliver document", e),
    }
}
