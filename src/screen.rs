//! Plain-text rendering of the login form and home screen.
//!
//! Pure functions over [`SessionState`] so the terminal front-end stays a thin
//! loop and the output can be asserted in tests.

use std::fmt::Write;

use crate::controller::SessionState;
use crate::user::User;

const MASK: char = '•';
const RULE: &str = "----------------------------------------";

/// Home screen when a user is signed in, login form otherwise.
#[must_use]
pub fn render(state: &SessionState) -> String {
    match &state.logged_in_user {
        Some(user) => render_home(user),
        None => render_login(state),
    }
}

#[must_use]
pub fn render_login(state: &SessionState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Welcome Back");
    let _ = writeln!(out, "Sign in to continue");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Email:    {}", placeholder(&state.email, "you@example.com"));
    let _ = writeln!(out, "Password: {}", password_field(state));
    if let Some(message) = &state.error_message {
        let _ = writeln!(out, "! {message}");
    }
    let _ = writeln!(out, "{}", sign_in_button(state));
    out
}

#[must_use]
pub fn render_home(user: &User) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Home");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Hello, {}!", user.display_name);
    let _ = writeln!(out, "{}", user.email);
    let _ = writeln!(out, "[ Log Out ]");
    out
}

/// Text of the submit button for the current state.
#[must_use]
pub fn sign_in_button(state: &SessionState) -> &'static str {
    if state.is_loading {
        "[ Signing in… ]"
    } else if state.can_submit() {
        "[ Sign In ]"
    } else {
        "[ Sign In ] (disabled)"
    }
}

fn password_field(state: &SessionState) -> String {
    if state.password.is_empty() {
        return "••••••••".to_owned();
    }
    if state.password_visible {
        state.password.clone()
    } else {
        std::iter::repeat_n(MASK, state.password.chars().count()).collect()
    }
}

fn placeholder<'a>(value: &'a str, hint: &'a str) -> &'a str {
    if value.is_empty() { hint } else { value }
}

#[cfg(test)]
#[path = "screen_test.rs"]
mod tests;
