//! Login controller: session state, the login state machine, and change
//! notifications for presentation layers.
//!
//! DESIGN
//! ======
//! State lives in a `watch` channel. Every mutation goes through
//! `send_modify`/`send_if_modified`, so subscribers see one snapshot per
//! change and `snapshot()` is always the latest value.
//!
//! A login attempt runs as a spawned task tagged with an attempt id. The id
//! of the attempt currently allowed to write results is kept under
//! `attempt`; a finishing task only publishes its result while it still owns
//! that slot. `logout` and `AttemptHandle::abort` clear the slot, so a result
//! that arrives after either is dropped instead of overwriting the new state.
//!
//! LOCK ORDER
//! ==========
//! `attempt` is always taken before the watch channel's internal lock.
//! Input setters only touch the channel.

use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::FutureExt;
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::{AbortHandle, JoinHandle};

use crate::auth::{AuthError, Authenticator};
use crate::user::User;
use crate::validate;

// =============================================================================
// STATE
// =============================================================================

/// Where the controller is in the login flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginPhase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Snapshot of everything a login form or home screen renders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionState {
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub password_visible: bool,
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub logged_in_user: Option<User>,
    pub phase: LoginPhase,
}

impl SessionState {
    /// Whether the current fields pass credential validation.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        validate::can_submit(&self.email, &self.password)
    }
}

// =============================================================================
// ERRORS / OUTCOMES
// =============================================================================

/// Why `submit` declined to start an attempt. No state changes in either case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitRejected {
    #[error("email or password is not valid for submission")]
    InvalidInput,
    #[error("a login attempt is already in progress")]
    InFlight,
    #[error("no async runtime is available to run the login attempt")]
    NoRuntime,
}

/// How a login attempt ended, as seen by whoever awaited its handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// Credentials accepted; the user is now in `logged_in_user`.
    Succeeded(User),
    /// Attempt failed; the string is the published `error_message`.
    Failed(String),
    /// Attempt was cancelled or invalidated by logout; nothing was published.
    Discarded,
}

// =============================================================================
// CONTROLLER
// =============================================================================

struct InFlight {
    id: u64,
    abort: AbortHandle,
}

struct Inner {
    auth: Arc<dyn Authenticator>,
    state: watch::Sender<SessionState>,
    attempt: Mutex<Option<InFlight>>,
    next_attempt: AtomicU64,
}

/// Owns session state and runs login attempts against an injected
/// [`Authenticator`]. Cloning yields another handle to the same session.
#[derive(Clone)]
pub struct LoginController {
    inner: Arc<Inner>,
}

impl LoginController {
    #[must_use]
    pub fn new(auth: Arc<dyn Authenticator>) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            inner: Arc::new(Inner { auth, state, attempt: Mutex::new(None), next_attempt: AtomicU64::new(1) }),
        }
    }

    /// Latest state.
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    /// Live submit guard over the current fields.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.inner.state.borrow().can_submit()
    }

    // -------------------------------------------------------------------------
    // Inputs
    // -------------------------------------------------------------------------

    pub fn set_email(&self, email: impl Into<String>) {
        let email = email.into();
        self.inner.state.send_if_modified(|s| replace_if_changed(&mut s.email, email));
    }

    pub fn set_password(&self, password: impl Into<String>) {
        let password = password.into();
        self.inner.state.send_if_modified(|s| replace_if_changed(&mut s.password, password));
    }

    pub fn set_password_visible(&self, visible: bool) {
        self.inner.state.send_if_modified(|s| replace_if_changed(&mut s.password_visible, visible));
    }

    pub fn toggle_password_visibility(&self) {
        self.inner.state.send_modify(|s| s.password_visible = !s.password_visible);
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Start a login attempt with the trimmed email and the raw password.
    ///
    /// On start the error message is cleared, `is_loading` is set and the
    /// phase becomes [`LoginPhase::Submitting`]. The attempt then runs on the
    /// tokio runtime; its result is published when it completes.
    ///
    /// # Errors
    ///
    /// [`SubmitRejected::InvalidInput`] when the fields fail validation,
    /// [`SubmitRejected::InFlight`] while another attempt is running, and
    /// [`SubmitRejected::NoRuntime`] when called outside a tokio runtime.
    /// State is left untouched in every case.
    pub fn submit(&self) -> Result<AttemptHandle, SubmitRejected> {
        let mut slot = self.inner.lock_attempt();
        if slot.is_some() {
            tracing::debug!("submit ignored: attempt in flight");
            return Err(SubmitRejected::InFlight);
        }

        let (email, password) = {
            let state = self.inner.state.borrow();
            if !state.can_submit() {
                tracing::debug!("submit ignored: fields fail validation");
                return Err(SubmitRejected::InvalidInput);
            }
            (validate::trim_input(&state.email).to_owned(), state.password.clone())
        };
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::debug!("submit ignored: no tokio runtime");
            return Err(SubmitRejected::NoRuntime);
        };

        let id = self.inner.next_attempt.fetch_add(1, Ordering::Relaxed);
        self.inner.state.send_modify(|s| {
            s.error_message = None;
            s.is_loading = true;
            s.phase = LoginPhase::Submitting;
        });
        tracing::info!(%email, attempt = id, "login attempt started");

        let inner = Arc::clone(&self.inner);
        let join = runtime.spawn(async move {
            let result = AssertUnwindSafe(inner.auth.login(&email, &password))
                .catch_unwind()
                .await
                .unwrap_or_else(|payload| Err(AuthError::network(panic_description(&*payload))));
            inner.finish(id, result)
        });
        *slot = Some(InFlight { id, abort: join.abort_handle() });

        Ok(AttemptHandle { id, join, inner: Arc::clone(&self.inner) })
    }

    /// Sign out: drop the user and clear both credential fields.
    ///
    /// The error message is left as is. An attempt still in flight is
    /// cancelled and its result will not be published; because that ends the
    /// attempt, `is_loading` is reset as well.
    pub fn logout(&self) {
        let mut slot = self.inner.lock_attempt();
        let cancelled = slot.take();
        if let Some(in_flight) = &cancelled {
            in_flight.abort.abort();
            tracing::debug!(attempt = in_flight.id, "in-flight login cancelled by logout");
        }
        self.inner.state.send_modify(|s| {
            s.logged_in_user = None;
            s.email.clear();
            s.password.clear();
            s.phase = LoginPhase::Idle;
            if cancelled.is_some() {
                s.is_loading = false;
            }
        });
        drop(slot);
        tracing::info!("logout");
    }

    /// Wait until no attempt is loading and return the state at that point.
    pub async fn wait_idle(&self) -> SessionState {
        let mut rx = self.subscribe();
        match rx.wait_for(|s| !s.is_loading).await {
            Ok(state) => state.clone(),
            Err(_) => self.snapshot(),
        }
    }
}

impl std::fmt::Debug for LoginController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginController").field("state", &*self.inner.state.borrow()).finish_non_exhaustive()
    }
}

impl Inner {
    fn lock_attempt(&self) -> MutexGuard<'_, Option<InFlight>> {
        self.attempt.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Publish the result of attempt `id` if it still owns the slot.
    fn finish(&self, id: u64, result: Result<User, AuthError>) -> AttemptOutcome {
        let mut slot = self.lock_attempt();
        if slot.as_ref().map(|a| a.id) != Some(id) {
            tracing::debug!(attempt = id, "stale login result discarded");
            return AttemptOutcome::Discarded;
        }
        *slot = None;

        match result {
            Ok(user) => {
                tracing::info!(attempt = id, email = %user.email, "login succeeded");
                self.state.send_modify(|s| {
                    s.logged_in_user = Some(user.clone());
                    s.error_message = None;
                    s.phase = LoginPhase::Succeeded;
                    s.is_loading = false;
                });
                AttemptOutcome::Succeeded(user)
            }
            Err(err) => {
                tracing::warn!(attempt = id, error = %err, "login failed");
                let message = err.user_message();
                self.state.send_modify(|s| {
                    s.error_message = Some(message.clone());
                    s.phase = LoginPhase::Failed;
                    s.is_loading = false;
                });
                AttemptOutcome::Failed(message)
            }
        }
    }

    /// Cancel attempt `id` if it is still the active one.
    fn cancel(&self, id: u64) -> bool {
        let mut slot = self.lock_attempt();
        let Some(in_flight) = slot.take_if(|a| a.id == id) else {
            return false;
        };
        in_flight.abort.abort();
        self.state.send_modify(|s| {
            s.is_loading = false;
            s.phase = LoginPhase::Idle;
        });
        tracing::debug!(attempt = id, "login attempt cancelled");
        true
    }
}

// =============================================================================
// ATTEMPT HANDLE
// =============================================================================

/// Handle to one running login attempt. Dropping it detaches the attempt;
/// the result is still published.
pub struct AttemptHandle {
    id: u64,
    join: JoinHandle<AttemptOutcome>,
    inner: Arc<Inner>,
}

impl AttemptHandle {
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Cancel the attempt. Loading is reset, the phase returns to idle and no
    /// result is published. Returns `false` if the attempt already finished
    /// or was invalidated.
    pub fn abort(&self) -> bool {
        self.inner.cancel(self.id)
    }

    /// Wait for the attempt to end.
    pub async fn wait(self) -> AttemptOutcome {
        match self.join.await {
            Ok(outcome) => outcome,
            Err(err) if err.is_cancelled() => AttemptOutcome::Discarded,
            Err(err) => std::panic::resume_unwind(err.into_panic()),
        }
    }
}

impl std::fmt::Debug for AttemptHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttemptHandle").field("id", &self.id).finish_non_exhaustive()
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn replace_if_changed<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

fn panic_description(payload: &(dyn std::any::Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_owned());
    format!("authenticator panicked: {detail}")
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
