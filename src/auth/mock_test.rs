use std::time::Duration;

use tokio::time::Instant;

use super::*;

fn instant() -> MockAuthenticator {
    MockAuthenticator::with_latency(Duration::ZERO)
}

#[tokio::test]
async fn demo_user_logs_in() {
    let user = instant().login("user@example.com", "password123").await.unwrap();
    assert_eq!(user, User::new("user@example.com", "Demo User"));
}

#[tokio::test]
async fn admin_logs_in() {
    let user = instant().login("admin@example.com", "admin456").await.unwrap();
    assert_eq!(user.display_name, "Admin");
}

#[tokio::test]
async fn email_match_is_case_insensitive_and_normalized() {
    let user = instant().login("USER@Example.COM", "password123").await.unwrap();
    assert_eq!(user.email, "user@example.com");
    assert_eq!(user.display_name, "Demo User");
}

#[tokio::test]
async fn wrong_password_is_invalid_credentials() {
    let err = instant().login("user@example.com", "wrong").await.unwrap_err();
    assert!(err.is_invalid_credentials());
}

#[tokio::test]
async fn password_match_is_exact() {
    let auth = instant();
    assert!(auth.login("user@example.com", "PASSWORD123").await.is_err());
    assert!(auth.login("user@example.com", "password123 ").await.is_err());
}

#[tokio::test]
async fn passwords_are_not_shared_between_accounts() {
    let err = instant().login("admin@example.com", "password123").await.unwrap_err();
    assert!(err.is_invalid_credentials());
}

#[tokio::test]
async fn unknown_account_is_invalid_credentials() {
    let err = instant().login("nobody@example.com", "password123").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
}

#[test]
fn default_latency_is_half_a_second() {
    assert_eq!(MockAuthenticator::new().latency(), Duration::from_millis(500));
    assert_eq!(MockAuthenticator::default().latency(), DEFAULT_MOCK_LATENCY);
}

#[tokio::test(start_paused = true)]
async fn login_waits_for_configured_latency() {
    let auth = MockAuthenticator::new();
    let start = Instant::now();
    auth.login("user@example.com", "password123").await.unwrap();
    assert!(start.elapsed() >= Duration::from_millis(500));
}

#[tokio::test(start_paused = true)]
async fn failures_also_wait_for_latency() {
    let auth = MockAuthenticator::with_latency(Duration::from_millis(250));
    let start = Instant::now();
    let _ = auth.login("user@example.com", "nope").await;
    assert!(start.elapsed() >= Duration::from_millis(250));
}
