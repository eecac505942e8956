//! Gateway liveness indicator.
//!
//! A deliberately simple companion to the log poller: one unauthenticated
//! endpoint, one interval, three displayable states.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::debug;

use console_client::types::HealthStatus;
use console_client::GatewayApi;

use crate::viewer::PollGuard;

/// Default probe interval.
pub const DEFAULT_PROBE_INTERVAL: Duration = Duration::from_millis(5000);

/// Displayable liveness state.
#[derive(Debug, Clone, PartialEq)]
pub enum HealthState {
    /// No probe has completed yet.
    Checking,
    /// The last probe succeeded.
    Healthy(HealthStatus),
    /// The last probe failed.
    Error(String),
}

/// Polls the gateway health endpoint for the liveness indicator.
///
/// Uses the same scoped-task discipline as the log poller: the probe timer
/// is released when the monitor is dropped or stopped.
pub struct HealthMonitor {
    api: Arc<dyn GatewayApi>,
    state: Arc<Mutex<HealthState>>,
    poll: Option<PollGuard>,
}

impl HealthMonitor {
    /// Creates a monitor in the `Checking` state. No probe is issued until
    /// [`probe`](Self::probe) or [`start`](Self::start) is called.
    #[must_use]
    pub fn new(api: Arc<dyn GatewayApi>) -> Self {
        Self {
            api,
            state: Arc::new(Mutex::new(HealthState::Checking)),
            poll: None,
        }
    }

    /// Snapshot of the current liveness state.
    #[must_use]
    pub fn state(&self) -> HealthState {
        self.state.lock().clone()
    }

    /// Probes once and updates the state.
    pub async fn probe(&self) {
        probe_once(&self.api, &self.state).await;
    }

    /// Starts probing at `interval`, replacing any previous timer. The
    /// first probe fires immediately.
    pub fn start(&mut self, interval: Duration) {
        self.poll = None;

        let api = Arc::clone(&self.api);
        let state = Arc::clone(&self.state);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                probe_once(&api, &state).await;
            }
        });
        self.poll = Some(PollGuard::new(handle));
        debug!(interval_ms = interval.as_millis() as u64, "health probing started");
    }

    /// Stops probing. The timer is released immediately.
    pub fn stop(&mut self) {
        self.poll = None;
    }

    /// True while a probe task is held.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.poll.is_some()
    }
}

async fn probe_once(api: &Arc<dyn GatewayApi>, state: &Arc<Mutex<HealthState>>) {
    let result = api.health().await;
    let mut state = state.lock();
    *state = match result {
        Ok(status) => HealthState::Healthy(status),
        Err(error) => HealthState::Error(error.to_string()),
    };
}
