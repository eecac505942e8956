//! Admin session lifecycle and route guarding for the gateway console.
//!
//! This crate provides:
//! - [`SessionManager`] — the process-wide authentication state machine
//!   (`Unknown` → `Checking` → `Authenticated` | `Unauthenticated`), with
//!   stale-response discard so transitions apply in resolution order
//! - [`AuthPhase`] — the observable state, read by the shell on every
//!   navigation
//! - [`evaluate_route`] — the pure route guard over [`AuthPhase`]

pub mod guard;
pub mod state;

pub use guard::{RouteDecision, evaluate_route};
pub use state::{AuthPhase, Navigation, SessionManager};
