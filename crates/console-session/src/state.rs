//! The admin authentication state machine.
//!
//! States: `Unknown` (initial) → `Checking` → `Authenticated` |
//! `Unauthenticated`. `Authenticated` drops back to `Unauthenticated` on
//! logout or when any authenticated call observes an unauthorized response.
//! A re-check issued while authenticated keeps the phase until it resolves;
//! `Checking` is only shown when there is nothing better to show.
//!
//! All writes go through the three defined transitions (`check_session`,
//! `login`, `logout`); reads are cheap snapshots. Transitions are applied in
//! the order their triggering calls resolve: each in-flight call carries a
//! generation token, and a call whose token is no longer current discards
//! its result instead of clobbering newer state.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use console_client::{ApiError, GatewayApi};

/// Where the shell should navigate after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// The default protected view.
    Dashboard,
    /// The login view.
    Login,
}

/// The observable authentication state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthPhase {
    /// Nothing is known yet; no session check has completed.
    Unknown,
    /// A session check or login is in flight.
    Checking,
    /// The admin session is live.
    Authenticated {
        /// When the session expires, if the gateway reported it.
        expires_at: Option<DateTime<Utc>>,
    },
    /// There is no live session.
    Unauthenticated,
}

struct Inner {
    phase: AuthPhase,
    error: Option<String>,
    generation: u64,
}

/// Owns the process-wide authentication state.
///
/// Created once at startup; there is no client-side teardown since the
/// state ends with the process.
pub struct SessionManager {
    api: Arc<dyn GatewayApi>,
    inner: Mutex<Inner>,
}

impl SessionManager {
    /// Creates a manager in the `Unknown` phase.
    #[must_use]
    pub fn new(api: Arc<dyn GatewayApi>) -> Self {
        Self {
            api,
            inner: Mutex::new(Inner {
                phase: AuthPhase::Unknown,
                error: None,
                generation: 0,
            }),
        }
    }

    /// Returns a snapshot of the current phase.
    #[must_use]
    pub fn phase(&self) -> AuthPhase {
        self.inner.lock().phase.clone()
    }

    /// Returns the current user-visible error message, if any.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.inner.lock().error.clone()
    }

    /// Starts a new auth call and returns its generation token.
    ///
    /// `Checking` is entered only from `Unknown` or `Unauthenticated`. A
    /// routine re-check while authenticated keeps the current phase, so an
    /// already-admitted user never drops back to the loading placeholder
    /// while the check is in flight.
    fn begin(&self) -> u64 {
        let mut inner = self.inner.lock();
        inner.generation += 1;
        if !matches!(inner.phase, AuthPhase::Authenticated { .. }) {
            inner.phase = AuthPhase::Checking;
        }
        inner.generation
    }

    /// Checks whether the session cookie still maps to a live session.
    ///
    /// Invoked once at startup. Session absence is an expected outcome, not
    /// a failure: any error (network or non-success status) resolves to
    /// `Unauthenticated` rather than propagating.
    pub async fn check_session(&self) {
        let token = self.begin();
        let result = self.api.session().await;

        let mut inner = self.inner.lock();
        if inner.generation != token {
            debug!("discarding stale session check result");
            return;
        }
        inner.phase = match result {
            Ok(session) if session.authenticated => AuthPhase::Authenticated {
                expires_at: session.expires_at,
            },
            Ok(_) => AuthPhase::Unauthenticated,
            Err(e) => {
                debug!(error = %e, "session check failed; treating as unauthenticated");
                AuthPhase::Unauthenticated
            }
        };
    }

    /// Attempts an admin login.
    ///
    /// On success the phase becomes `Authenticated` and the shell is told to
    /// navigate to the dashboard. On failure the phase stays
    /// `Unauthenticated`, a user-visible error is recorded, and there is no
    /// automatic retry.
    pub async fn login(&self, password: &str) -> Option<Navigation> {
        {
            let mut inner = self.inner.lock();
            inner.error = None;
        }
        let token = self.begin();
        let result = self.api.login(password).await;

        let mut inner = self.inner.lock();
        if inner.generation != token {
            debug!("discarding stale login result");
            return None;
        }
        match result {
            Ok(outcome) => {
                info!("admin session established");
                inner.phase = AuthPhase::Authenticated {
                    expires_at: Some(outcome.expires_at),
                };
                inner.error = None;
                Some(Navigation::Dashboard)
            }
            Err(e) => {
                inner.phase = AuthPhase::Unauthenticated;
                inner.error = Some(match e {
                    ApiError::Unauthorized => "invalid password".to_string(),
                    other => other.to_string(),
                });
                None
            }
        }
    }

    /// Logs out.
    ///
    /// The network call is best-effort: local state clears and the shell is
    /// sent to the login view regardless of the outcome. A network failure
    /// is surfaced as a non-blocking error message — the client is never
    /// stuck "authenticated" after requesting logout.
    pub async fn logout(&self) -> Navigation {
        let result = self.api.logout().await;

        let mut inner = self.inner.lock();
        // Invalidate any in-flight check or login so a late resolution
        // cannot resurrect the session.
        inner.generation += 1;
        inner.phase = AuthPhase::Unauthenticated;
        match result {
            Ok(()) => inner.error = None,
            Err(e) => {
                warn!(error = %e, "logout request failed; clearing local session anyway");
                inner.error = Some(format!("logout failed: {e}"));
            }
        }
        Navigation::Login
    }

    /// Reacts to an error observed by any authenticated call.
    ///
    /// An unauthorized response means the session expired server-side; the
    /// phase drops to `Unauthenticated` so the route guard redirects on the
    /// next navigation. Other errors are ignored here.
    pub fn observe(&self, error: &ApiError) {
        if !error.is_unauthorized() {
            return;
        }
        let mut inner = self.inner.lock();
        if matches!(inner.phase, AuthPhase::Unauthenticated) {
            return;
        }
        info!("unauthorized response observed; session expired");
        inner.generation += 1;
        inner.phase = AuthPhase::Unauthenticated;
    }
}
