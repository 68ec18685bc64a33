//! Integration tests for the password reset flow.

mod helpers;

use std::time::Duration;

use permit_auth::{AuthProvider, RecoveryState};
use permit_core::error::ErrorKind;
use permit_entity::Role;

fn fragment_of(url: &str) -> &str {
    url.split_once('#').map(|(_, f)| f).unwrap_or("")
}

#[tokio::test(start_paused = true)]
async fn test_full_password_reset() {
    let app = helpers::TestPortal::new(Duration::ZERO);
    let juan = app
        .register("juan@example.com", "Juan", "Dela Cruz", Role::Citizen)
        .await;
    app.portal.sign_out().await.unwrap();

    let flow = app.portal.password_reset();
    flow.request("juan@example.com").await.unwrap();
    let links = app.mem.auth.sent_recovery_links().await;
    assert_eq!(links.len(), 1);
    assert!(links[0].url.starts_with(&app.portal.config().auth.reset_redirect_url));

    let principal = flow.verify_link(Some(fragment_of(&links[0].url))).await.unwrap();
    assert_eq!(principal.id, juan.id);
    assert_eq!(*flow.state().borrow(), RecoveryState::Ready(principal));

    let route = flow.complete("newsecret456", "newsecret456").await.unwrap();
    assert_eq!(route, "/login");
    assert_eq!(app.mem.auth.get_user().await.unwrap(), None);

    let err = app
        .portal
        .sign_in("juan@example.com", "secret123")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);
    let route = app
        .portal
        .sign_in("juan@example.com", "newsecret456")
        .await
        .unwrap();
    assert_eq!(route, "/citizen/dashboard");
}

#[tokio::test(start_paused = true)]
async fn test_unknown_email_sends_nothing() {
    let app = helpers::TestPortal::new(Duration::ZERO);
    let flow = app.portal.password_reset();
    flow.request("nobody@example.com").await.unwrap();
    assert!(app.mem.auth.sent_recovery_links().await.is_empty());

    let err = flow.request("not-an-email").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test(start_paused = true)]
async fn test_session_arriving_late_is_picked_up() {
    let app = helpers::TestPortal::new(Duration::ZERO);
    app.register("juan@example.com", "Juan", "Dela Cruz", Role::Citizen)
        .await;
    app.portal.sign_out().await.unwrap();
    app.portal
        .password_reset()
        .request("juan@example.com")
        .await
        .unwrap();
    let url = app.mem.auth.sent_recovery_links().await[0].url.clone();

    // The page loads without its fragment; the token is processed later.
    let auth = app.mem.auth.clone();
    let late = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(1500)).await;
        auth.exchange_recovery_token(
            fragment_of(&url)
                .split('&')
                .find_map(|p| p.strip_prefix("access_token="))
                .unwrap(),
        )
        .await
        .unwrap();
    });

    let before = tokio::time::Instant::now();
    let principal = app.portal.password_reset().verify_link(None).await.unwrap();
    assert_eq!(principal.email, "juan@example.com");
    assert_eq!(before.elapsed(), Duration::from_millis(1500));
    late.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_error_fragment_is_invalid_link() {
    let app = helpers::TestPortal::new(Duration::ZERO);
    let flow = app.portal.password_reset();

    let err = flow
        .verify_link(Some("#error=access_denied&error_description=Email+link+is+invalid+or+has+expired"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidLink);
    assert_eq!(err.message, "Email link is invalid or has expired");
    assert_eq!(*flow.state().borrow(), RecoveryState::InvalidLink);
}

#[tokio::test(start_paused = true)]
async fn test_no_session_expires_after_final_check() {
    let app = helpers::TestPortal::new(Duration::ZERO);
    let flow = app.portal.password_reset();

    let before = tokio::time::Instant::now();
    let err = flow.verify_link(None).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidLink);
    assert_eq!(before.elapsed(), Duration::from_millis(3000));
}
