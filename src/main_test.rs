use std::sync::Arc;
use std::time::Duration;

use loginseed::auth::MockAuthenticator;

use super::*;

async fn signed_in() -> (LoginController, AttemptOutcome) {
    let controller = LoginController::new(Arc::new(MockAuthenticator::with_latency(Duration::ZERO)));
    controller.set_email("user@example.com");
    controller.set_password("password123");
    let outcome = controller.submit().unwrap().wait().await;
    (controller, outcome)
}

#[tokio::test]
async fn json_logout_prints_only_final_state() {
    let (controller, outcome) = signed_in().await;

    let documents = finish(&controller, &outcome, true, true).unwrap();

    assert_eq!(documents.len(), 1);
    let state: serde_json::Value = serde_json::from_str(&documents[0]).unwrap();
    assert!(state["logged_in_user"].is_null());
    assert_eq!(state["email"], "");
    assert_eq!(state["phase"], "idle");
}

#[tokio::test]
async fn json_without_logout_prints_signed_in_state() {
    let (controller, outcome) = signed_in().await;

    let documents = finish(&controller, &outcome, false, true).unwrap();

    assert_eq!(documents.len(), 1);
    let state: serde_json::Value = serde_json::from_str(&documents[0]).unwrap();
    assert_eq!(state["logged_in_user"]["display_name"], "Demo User");
}

#[tokio::test]
async fn text_logout_shows_home_then_empty_form() {
    let (controller, outcome) = signed_in().await;

    let documents = finish(&controller, &outcome, true, false).unwrap();

    assert_eq!(documents.len(), 2);
    assert!(documents[0].contains("Hello, Demo User!"));
    assert!(documents[1].starts_with("Welcome Back"));
}

#[tokio::test]
async fn failed_attempt_ignores_logout_flag() {
    let controller = LoginController::new(Arc::new(MockAuthenticator::with_latency(Duration::ZERO)));
    controller.set_email("user@example.com");
    controller.set_password("wrong");
    let outcome = controller.submit().unwrap().wait().await;

    let documents = finish(&controller, &outcome, true, false).unwrap();

    assert_eq!(documents.len(), 1);
    assert!(documents[0].contains("! Invalid email or password. Please try again."));
    assert_eq!(controller.snapshot().email, "user@example.com");
}

#[test]
fn password_help_warns_about_echo() {
    use clap::CommandFactory;

    let command = Cli::command();
    let arg = command.get_arguments().find(|a| a.get_id() == "password").unwrap();
    let help = arg.get_help().unwrap().to_string();
    assert!(help.contains("echoes"));
}
