//! Authenticator capability and its error taxonomy.
//!
//! ARCHITECTURE
//! ============
//! The authenticator is the controller's only I/O boundary. Implementations
//! are injected as `Arc<dyn Authenticator>` so tests and front-ends can swap
//! the backend without touching the controller.

pub mod mock;

use std::error::Error as StdError;

use crate::user::User;

pub use mock::MockAuthenticator;

/// User-facing text for rejected credentials.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password. Please try again.";

/// Boxed underlying failure carried by [`AuthError::Network`].
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

// =============================================================================
// ERROR
// =============================================================================

/// Failure classification for a login attempt.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The email/password pair was not accepted. Correctable by the user.
    #[error("Invalid email or password. Please try again.")]
    InvalidCredentials,

    /// Anything else: transport failures, backend faults, panics.
    #[error("Network error: {0}")]
    Network(#[source] BoxError),
}

impl AuthError {
    /// Wrap an arbitrary underlying failure.
    pub fn network<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::Network(err.into())
    }

    /// Message shown in the login form's error line.
    #[must_use]
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    #[must_use]
    pub fn is_invalid_credentials(&self) -> bool {
        matches!(self, Self::InvalidCredentials)
    }
}

// =============================================================================
// AUTHENTICATOR TRAIT
// =============================================================================

/// Performs the actual credential check.
#[async_trait::async_trait]
pub trait Authenticator: Send + Sync {
    /// Authenticate `email`/`password` and return the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] when the pair is rejected and
    /// [`AuthError::Network`] for any other failure.
    async fn login(&self, email: &str, password: &str) -> Result<User, AuthError>;
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
