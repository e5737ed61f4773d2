//! Login flow core: credential validation, an injectable authenticator, and
//! the login controller state machine that drives a login form.
//!
//! DESIGN
//! ======
//! The controller owns all session state and is the only component that
//! talks to the authenticator. Presentation layers read snapshots of that
//! state (or subscribe to change notifications) and feed input back through
//! the controller's setters. The terminal front-end in `main.rs` is one such
//! layer; `screen` holds its rendering.

pub mod auth;
pub mod config;
pub mod controller;
pub mod screen;
pub mod user;
pub mod validate;

pub use auth::{AuthError, Authenticator};
pub use controller::{AttemptHandle, AttemptOutcome, LoginController, LoginPhase, SessionState, SubmitRejected};
pub use user::User;
