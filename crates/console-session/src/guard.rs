//! Route guarding for protected views.

use crate::state::AuthPhase;

/// What the shell should do with a navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Auth status is not yet known; show a loading placeholder.
    Loading,
    /// Send the user to the login view.
    RedirectToLogin {
        /// Replace the current history entry so Back cannot loop into a
        /// protected page.
        replace_history: bool,
    },
    /// Render the requested protected view.
    Render,
}

/// Gates a navigation attempt on the current auth phase.
///
/// Pure function of the phase; callers must re-evaluate on every navigation
/// attempt, not just once at mount, because the session can expire between
/// navigations.
#[must_use]
pub fn evaluate_route(phase: &AuthPhase) -> RouteDecision {
    match phase {
        AuthPhase::Unknown | AuthPhase::Checking => RouteDecision::Loading,
        AuthPhase::Unauthenticated => RouteDecision::RedirectToLogin {
            replace_history: true,
        },
        AuthPhase::Authenticated { .. } => RouteDecision::Render,
    }
}
