//! In-memory authenticator with two fixed demo accounts.
//!
//! Used by development builds and tests. Emails are matched
//! case-insensitively, passwords exactly, and every call waits a fixed
//! artificial latency before answering.

use std::collections::HashMap;
use std::time::Duration;

use super::{AuthError, Authenticator};
use crate::user::User;

pub const DEFAULT_MOCK_LATENCY: Duration = Duration::from_millis(500);

struct Account {
    password: &'static str,
    display_name: &'static str,
}

pub struct MockAuthenticator {
    accounts: HashMap<&'static str, Account>,
    latency: Duration,
}

impl MockAuthenticator {
    /// Demo accounts with the default 500 ms latency.
    #[must_use]
    pub fn new() -> Self {
        Self::with_latency(DEFAULT_MOCK_LATENCY)
    }

    #[must_use]
    pub fn with_latency(latency: Duration) -> Self {
        let accounts = HashMap::from([
            ("user@example.com", Account { password: "password123", display_name: "Demo User" }),
            ("admin@example.com", Account { password: "admin456", display_name: "Admin" }),
        ]);
        Self { accounts, latency }
    }

    #[must_use]
    pub fn latency(&self) -> Duration {
        self.latency
    }
}

impl Default for MockAuthenticator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Authenticator for MockAuthenticator {
    async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        tokio::time::sleep(self.latency).await;

        let normalized = email.to_lowercase();
        let Some(account) = self.accounts.get(normalized.as_str()) else {
            tracing::debug!(email = %normalized, "mock login: unknown account");
            return Err(AuthError::InvalidCredentials);
        };
        if account.password != password {
            tracing::debug!(email = %normalized, "mock login: password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        tracing::debug!(email = %normalized, "mock login: accepted");
        Ok(User::new(normalized, account.display_name))
    }
}

#[cfg(test)]
#[path = "mock_test.rs"]
mod tests;
