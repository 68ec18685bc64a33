//! Integration tests for registration, sign-in, and page gating.

mod helpers;

use std::time::Duration;

use permit_auth::{GateAction, GateState};
use permit_core::error::ErrorKind;
use permit_database::ProfileStore;
use permit_entity::Role;

#[tokio::test(start_paused = true)]
async fn test_registration_rides_out_commit_lag() {
    // Visible between the second attempt (1500ms) and the third (2500ms).
    let app = helpers::TestPortal::new(Duration::from_millis(2200));

    let before = tokio::time::Instant::now();
    let principal = app
        .register("juan@example.com", "Juan", "Dela Cruz", Role::Citizen)
        .await;
    assert_eq!(before.elapsed(), Duration::from_millis(2500));

    let profile = app.mem.profiles.find_by_id(principal.id).await.unwrap().unwrap();
    assert_eq!(profile.email, "juan@example.com");
    assert_eq!(profile.full_name(), "Juan Dela Cruz");
    assert_eq!(app.mem.profiles.len().await, 1);
}

#[tokio::test(start_paused = true)]
async fn test_registration_fails_when_principal_never_visible() {
    let app = helpers::TestPortal::new(Duration::from_secs(3600));

    let err = app
        .portal
        .provisioner()
        .register(helpers::form("maria@example.com", "Maria", "Santos", Role::Citizen))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::ProvisioningFailed);
    assert!(app.mem.profiles.is_empty().await);

    // The principal was not rolled back and can still sign in.
    app.portal.sign_out().await.unwrap();
    let route = app.portal.sign_in("maria@example.com", "secret123").await.unwrap();
    assert_eq!(route, "/citizen/dashboard");

    // Landing there renders once instead of bouncing back to itself.
    let outcome = app.portal.gate().enter(Some(Role::Citizen)).await.unwrap();
    assert_eq!(outcome.state, GateState::AuthenticatedNoRole);
    assert_eq!(outcome.action, GateAction::Render);
    let outcome = app.portal.gate().enter(Some(Role::Admin)).await.unwrap();
    assert_eq!(outcome.action, GateAction::Redirect("/citizen/dashboard".into()));
}

#[tokio::test(start_paused = true)]
async fn test_duplicate_email_is_conflict() {
    let app = helpers::TestPortal::new(Duration::ZERO);
    app.register("ana@example.com", "Ana", "Reyes", Role::Citizen)
        .await;

    let err = app
        .portal
        .provisioner()
        .register(helpers::form("ana@example.com", "Ana", "Reyes", Role::Citizen))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
}

#[tokio::test(start_paused = true)]
async fn test_sign_in_routes_by_role() {
    let app = helpers::TestPortal::new(Duration::ZERO);
    app.register("admin@example.com", "Lorna", "Diaz", Role::Admin)
        .await;
    app.register("ben@example.com", "Ben", "Cruz", Role::Citizen)
        .await;
    app.portal.sign_out().await.unwrap();

    let route = app.portal.sign_in("admin@example.com", "secret123").await.unwrap();
    assert_eq!(route, "/admin/dashboard");
    let route = app.portal.sign_in("ben@example.com", "secret123").await.unwrap();
    assert_eq!(route, "/citizen/dashboard");

    let err = app
        .portal
        .sign_in("ben@example.com", "wrong-password")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);
}

#[tokio::test(start_paused = true)]
async fn test_citizen_is_redirected_from_admin_pages() {
    let app = helpers::TestPortal::new(Duration::ZERO);
    app.register("ben@example.com", "Ben", "Cruz", Role::Citizen)
        .await;

    let outcome = app.portal.gate().enter(Some(Role::Admin)).await.unwrap();
    assert_eq!(outcome.state, GateState::AuthenticatedWrongRole);
    assert_eq!(outcome.action, GateAction::Redirect("/citizen/dashboard".into()));

    let outcome = app.portal.gate().enter(Some(Role::Citizen)).await.unwrap();
    assert_eq!(outcome.action, GateAction::Render);

    let route = app.portal.sign_out().await.unwrap();
    assert_eq!(route, "/login");
    let outcome = app.portal.gate().enter(Some(Role::Citizen)).await.unwrap();
    assert_eq!(outcome.state, GateState::Unauthenticated);
    assert_eq!(outcome.action, GateAction::Redirect("/login".into()));
}
