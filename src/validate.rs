//! Credential validation gating the login action.
//!
//! The email check is a shape check, not RFC 5322 validation. The pattern is
//! kept exactly as the login form has always applied it.

use std::sync::OnceLock;

use regex::Regex;

pub const EMAIL_PATTERN: &str = r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$";

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(EMAIL_PATTERN).unwrap_or_else(|e| panic!("invalid email pattern: {e}")))
}

/// Strip leading and trailing horizontal whitespace (spaces, tabs, other
/// space separators). Line breaks are left in place.
#[must_use]
pub fn trim_input(value: &str) -> &str {
    value.trim_matches(is_horizontal_whitespace)
}

fn is_horizontal_whitespace(c: char) -> bool {
    c.is_whitespace() && !matches!(c, '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}')
}

/// Whether `value` matches [`EMAIL_PATTERN`] in full. No case folding.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    email_regex().is_match(value)
}

/// Whether the given email/password pair may be submitted.
///
/// All of the following must hold:
/// 1. the trimmed email is non-empty
/// 2. the password is non-empty (it is never trimmed)
/// 3. the untrimmed email matches [`EMAIL_PATTERN`]
#[must_use]
pub fn can_submit(email: &str, password: &str) -> bool {
    !trim_input(email).is_empty() && !password.is_empty() && is_valid_email(email)
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
