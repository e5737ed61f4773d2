use std::collections::HashMap;

use super::*;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_to_development_mock() {
    let cfg = Config::from_lookup(lookup(&[])).unwrap();
    assert_eq!(cfg, Config::default());
    assert_eq!(cfg.environment, Environment::Development);
    assert_eq!(cfg.backend, AuthBackend::Mock { latency: Duration::from_millis(500) });
}

#[test]
fn latency_override_is_applied() {
    let cfg = Config::from_lookup(lookup(&[(MOCK_LATENCY_VAR, "25")])).unwrap();
    assert_eq!(cfg.backend, AuthBackend::Mock { latency: Duration::from_millis(25) });
}

#[test]
fn invalid_latency_is_rejected() {
    let err = Config::from_lookup(lookup(&[(MOCK_LATENCY_VAR, "soon")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidLatency(v) if v == "soon"));
}

#[test]
fn production_without_backend_is_an_error() {
    let err = Config::from_lookup(lookup(&[(ENV_VAR, "production")])).unwrap_err();
    assert!(matches!(err, ConfigError::NoAuthenticator));
}

#[test]
fn production_accepts_explicit_mock() {
    let cfg = Config::from_lookup(lookup(&[(ENV_VAR, "production"), (AUTH_BACKEND_VAR, "mock")])).unwrap();
    assert_eq!(cfg.environment, Environment::Production);
    assert!(matches!(cfg.backend, AuthBackend::Mock { .. }));
}

#[test]
fn unknown_environment_is_rejected() {
    let err = Config::from_lookup(lookup(&[(ENV_VAR, "staging")])).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownEnvironment(v) if v == "staging"));
}

#[test]
fn unknown_backend_is_rejected() {
    let err = Config::from_lookup(lookup(&[(AUTH_BACKEND_VAR, "ldap")])).unwrap_err();
    assert_eq!(err.to_string(), "unknown LOGINSEED_AUTH_BACKEND: ldap (expected 'mock')");
}

#[test]
fn short_environment_names_are_accepted() {
    assert_eq!(parse_environment(Some("dev")).unwrap(), Environment::Development);
    assert_eq!(parse_environment(Some(" prod ")).unwrap(), Environment::Production);
}

#[tokio::test(start_paused = true)]
async fn authenticator_uses_configured_latency() {
    let cfg = Config::from_lookup(lookup(&[(MOCK_LATENCY_VAR, "0")])).unwrap();
    let user = cfg.authenticator().login("admin@example.com", "admin456").await.unwrap();
    assert_eq!(user.display_name, "Admin");
}
