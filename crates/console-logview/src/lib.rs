//! Log query, pagination, and auto-refresh engine for the gateway console.
//!
//! This crate provides:
//! - Filter state with facet-change offset resets ([`LogFilter`])
//! - Displayed log state with stale-response discard ([`LogView`])
//! - An async driver that fetches and polls ([`LogViewer`])
//! - A gateway liveness poller ([`HealthMonitor`])

pub mod filter;
pub mod health;
pub mod view;
pub mod viewer;

pub use filter::{FilterError, LogFilter, default_window};
pub use health::{DEFAULT_PROBE_INTERVAL, HealthMonitor, HealthState};
pub use view::{FetchTicket, LogView};
pub use viewer::{DEFAULT_REFRESH_INTERVAL, LogViewer, PollGuard};
