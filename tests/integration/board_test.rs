//! Integration tests for the approved-permit board.

mod helpers;

use std::time::Duration;

use chrono::Utc;
use permit_core::types::ImageId;
use permit_entity::{ImageCategory, PaymentStatus, Role, UploadedImage};
use permit_service::{PermitFilter, PermitSummary};

#[tokio::test(start_paused = true)]
async fn test_board_reconciles_and_filters() {
    let app = helpers::TestPortal::new(Duration::ZERO);
    let juan = app
        .register("juan@example.com", "Juan", "Dela Cruz", Role::Citizen)
        .await;
    let maria = app
        .register("maria@example.com", "Maria", "Santos", Role::Citizen)
        .await;

    let business = helpers::permit_type("Business Permit", "business-permit-renewal");
    let building = helpers::permit_type("Building Permit", "building-permit");

    let juans = app
        .seed_permit(&business, Some((&juan, "Juan", "Dela Cruz")))
        .await;
    let marias = app
        .seed_permit(&building, Some((&maria, "Maria", "Santos")))
        .await;

    app.pay(&juans, PaymentStatus::Failed).await;
    app.pay(&marias, PaymentStatus::Failed).await;
    app.mem
        .uploads
        .record(UploadedImage {
            id: ImageId::new(),
            permit_id: marias.permit.id,
            category: ImageCategory::ProofOfPayment,
            public_url: "https://cdn.example/or-0001.jpg".into(),
            uploaded_at: Utc::now(),
        })
        .await;

    let board = app.portal.board();
    assert_eq!(board.refresh().await.unwrap(), 2);

    let all = board.view(&PermitFilter::default()).await;
    assert_eq!(
        all.summary,
        PermitSummary {
            total: 2,
            paid: 1,
            unpaid: 1
        }
    );
    let titles: Vec<_> = all.facets.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Building Permit", "Business Permit"]);

    let cruz = board.view(&PermitFilter::search("cruz")).await;
    assert_eq!(cruz.items.len(), 1);
    assert_eq!(cruz.items[0].permit.id, juans.permit.id);
    assert!(!cruz.items[0].has_completed_payment);

    let buildings = board.view(&PermitFilter::of_type(building.id)).await;
    assert_eq!(buildings.items.len(), 1);
    assert_eq!(buildings.items[0].permit.id, marias.permit.id);
    assert!(buildings.items[0].has_completed_payment);

    let none = board
        .view(&PermitFilter {
            search_query: "cruz".into(),
            permit_type_id: Some(building.id),
        })
        .await;
    assert!(none.items.is_empty());
    assert_eq!(none.summary, PermitSummary::default());
}

#[tokio::test(start_paused = true)]
async fn test_latest_completed_payment_after_refresh() {
    let app = helpers::TestPortal::new(Duration::ZERO);
    let juan = app
        .register("juan@example.com", "Juan", "Dela Cruz", Role::Citizen)
        .await;
    let business = helpers::permit_type("Business Permit", "business");
    let permit = app
        .seed_permit(&business, Some((&juan, "Juan", "Dela Cruz")))
        .await;

    app.pay(&permit, PaymentStatus::Completed).await;
    let board = app.portal.board();
    board.refresh().await.unwrap();
    let first = board.view(&PermitFilter::default()).await.items[0]
        .last_completed_payment
        .clone()
        .unwrap();

    // Payment timestamps come from the wall clock.
    std::thread::sleep(std::time::Duration::from_millis(5));
    let second = app.pay(&permit, PaymentStatus::Completed).await;
    board.refresh().await.unwrap();
    let latest = board.view(&PermitFilter::default()).await.items[0]
        .last_completed_payment
        .clone()
        .unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(latest.id, second.id);
}
