//! Authenticated user value.

use serde::{Deserialize, Serialize};

/// A signed-in user. Produced only by a successful authentication call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    /// Normalized (lowercased) email address.
    pub email: String,
    /// Name shown on the home screen.
    pub display_name: String,
}

impl User {
    #[must_use]
    pub fn new(email: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self { email: email.into(), display_name: display_name.into() }
    }
}

#[cfg(test)]
#[path = "user_test.rs"]
mod tests;
