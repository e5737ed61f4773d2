//! Runtime configuration parsed from environment variables.

use std::sync::Arc;
use std::time::Duration;

use crate::auth::{Authenticator, MockAuthenticator};

pub const ENV_VAR: &str = "LOGINSEED_ENV";
pub const AUTH_BACKEND_VAR: &str = "LOGINSEED_AUTH_BACKEND";
pub const MOCK_LATENCY_VAR: &str = "LOGINSEED_MOCK_LATENCY_MS";
pub const DEFAULT_MOCK_LATENCY_MS: u64 = 500;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown LOGINSEED_ENV: {0} (expected 'development' or 'production')")]
    UnknownEnvironment(String),
    #[error("unknown LOGINSEED_AUTH_BACKEND: {0} (expected 'mock')")]
    UnknownBackend(String),
    #[error("invalid LOGINSEED_MOCK_LATENCY_MS: {0}")]
    InvalidLatency(String),
    #[error("no authenticator configured for production; set LOGINSEED_AUTH_BACKEND")]
    NoAuthenticator,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthBackend {
    Mock { latency: Duration },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub environment: Environment,
    pub backend: AuthBackend,
}

impl Config {
    /// Build typed config from the process environment.
    ///
    /// Optional:
    /// - `LOGINSEED_ENV`: `development` (default) or `production`
    /// - `LOGINSEED_AUTH_BACKEND`: `mock`; required in production
    /// - `LOGINSEED_MOCK_LATENCY_MS`: default 500
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for unknown values, an unparsable latency, or
    /// a production environment without an explicit backend.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with an injectable variable source.
    ///
    /// # Errors
    ///
    /// See [`Config::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = parse_environment(lookup(ENV_VAR).as_deref())?;
        let latency = parse_latency(lookup(MOCK_LATENCY_VAR).as_deref())?;
        let backend = match (lookup(AUTH_BACKEND_VAR).as_deref().map(str::trim), environment) {
            (Some("mock"), Environment::Production) => {
                tracing::warn!("mock authenticator explicitly enabled in production");
                AuthBackend::Mock { latency }
            }
            (Some("mock") | None, Environment::Development) => AuthBackend::Mock { latency },
            (None, Environment::Production) => return Err(ConfigError::NoAuthenticator),
            (Some(other), _) => return Err(ConfigError::UnknownBackend(other.to_owned())),
        };
        Ok(Self { environment, backend })
    }

    /// Instantiate the configured authenticator.
    #[must_use]
    pub fn authenticator(&self) -> Arc<dyn Authenticator> {
        match self.backend {
            AuthBackend::Mock { latency } => Arc::new(MockAuthenticator::with_latency(latency)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            backend: AuthBackend::Mock { latency: Duration::from_millis(DEFAULT_MOCK_LATENCY_MS) },
        }
    }
}

fn parse_environment(raw: Option<&str>) -> Result<Environment, ConfigError> {
    match raw.map_or("development", str::trim) {
        "development" | "dev" => Ok(Environment::Development),
        "production" | "prod" => Ok(Environment::Production),
        other => Err(ConfigError::UnknownEnvironment(other.to_owned())),
    }
}

fn parse_latency(raw: Option<&str>) -> Result<Duration, ConfigError> {
    let Some(raw) = raw else {
        return Ok(Duration::from_millis(DEFAULT_MOCK_LATENCY_MS));
    };
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| ConfigError::InvalidLatency(raw.to_owned()))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
