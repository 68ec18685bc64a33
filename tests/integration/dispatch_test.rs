//! Integration tests for notifications, printing, and review transitions.

mod helpers;

use std::time::Duration;

use permit_core::error::ErrorKind;
use permit_entity::{NotificationKind, PermitStatus, Role};
use permit_service::PrintOutcome;

#[tokio::test(start_paused = true)]
async fn test_notify_ready_for_pickup_reaches_applicant() {
    let app = helpers::TestPortal::new(Duration::ZERO);
    let juan = app
        .register("juan@example.com", "Juan", "Dela Cruz", Role::Citizen)
        .await;
    app.register("admin@example.com", "Lorna", "Diaz", Role::Admin)
        .await;

    let business = helpers::permit_type("Business Permit", "business-permit");
    let permit = app
        .seed_permit(&business, Some((&juan, "Juan", "Dela Cruz")))
        .await;

    let dispatcher = app.portal.dispatcher();
    let record = dispatcher
        .notify_ready_for_pickup(&permit.permit)
        .await
        .unwrap();
    assert!(!dispatcher.is_notifying(&permit.permit));

    let sent = app.mem.notifications.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].id, record.id);
    assert_eq!(sent[0].recipient_id, juan.id);
    assert_eq!(sent[0].kind, NotificationKind::ReadyForPickup);
    assert_eq!(sent[0].title, "Permit Ready for Pickup");
    assert!(sent[0].body.starts_with("Good day, Juan Dela Cruz! Business Permit has been approved"));
}

#[tokio::test(start_paused = true)]
async fn test_notify_without_applicant_is_not_found() {
    let app = helpers::TestPortal::new(Duration::ZERO);
    app.register("admin@example.com", "Lorna", "Diaz", Role::Admin)
        .await;
    let business = helpers::permit_type("Business Permit", "business-permit");
    let permit = app.seed_permit(&business, None).await;

    let err = app
        .portal
        .dispatcher()
        .notify_ready_for_pickup(&permit.permit)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert!(app.mem.notifications.sent().await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_print_falls_back_to_download() {
    let app = helpers::TestPortal::new(Duration::ZERO);
    let juan = app
        .register("juan@example.com", "Juan", "Dela Cruz", Role::Citizen)
        .await;
    let building = helpers::permit_type("Building Permit", "building-permit");
    let permit = app
        .seed_permit(&building, Some((&juan, "Juan", "Dela Cruz")))
        .await;

    let outcome = app
        .portal
        .dispatcher()
        .print_permit(&permit.permit)
        .await
        .unwrap();
    let PrintOutcome::Downloaded { filename } = outcome else {
        panic!("expected a download, got {outcome:?}");
    };
    assert!(filename.starts_with("building-permit-"));
    assert!(filename.ends_with(".html"));

    let html = std::fs::read_to_string(app.downloads.path().join(&filename)).unwrap();
    assert!(html.contains("BUILDING PERMIT"));
    assert!(html.contains("Juan Dela Cruz"));
}

#[tokio::test(start_paused = true)]
async fn test_print_unknown_permit_is_not_found() {
    let app = helpers::TestPortal::new(Duration::ZERO);
    let business = helpers::permit_type("Business Permit", "business-permit");
    let mut permit = app.seed_permit(&business, None).await.permit;
    permit.id = permit_core::types::PermitId::new();

    let err = app
        .portal
        .dispatcher()
        .print_permit(&permit)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test(start_paused = true)]
async fn test_review_requires_admin() {
    let app = helpers::TestPortal::new(Duration::ZERO);
    let business = helpers::permit_type("Business Permit", "business-permit");
    let mut seeded = app.seed_permit(&business, None).await;
    seeded.permit.status = PermitStatus::Pending;
    app.mem.permits.insert(seeded.clone()).await;
    let id = seeded.permit.id;

    app.register("ben@example.com", "Ben", "Cruz", Role::Citizen)
        .await;
    let err = app.portal.review().start_review(id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);

    app.register("admin@example.com", "Lorna", "Diaz", Role::Admin)
        .await;
    let reviewed = app.portal.review().start_review(id).await.unwrap();
    assert_eq!(reviewed.status, PermitStatus::UnderReview);
    let approved = app.portal.review().approve(id).await.unwrap();
    assert_eq!(approved.status, PermitStatus::Approved);

    let err = app.portal.review().reject(id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
}
