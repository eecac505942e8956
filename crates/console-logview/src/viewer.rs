//! Async driver for the log view: fetches, facet changes, and polling.
//!
//! [`LogViewer`] owns one [`LogView`] and one optional polling task. The
//! task is the only cancellable resource here and is released
//! deterministically: its [`PollGuard`] aborts the task on drop, so
//! teardown of the viewer (or replacing the interval) can never leak a
//! timer. At most one polling task exists per viewer.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

use console_client::types::{LogEntry, LogQuery};
use console_client::{GatewayApi, LogLevel};

use crate::filter::FilterError;
use crate::view::LogView;

/// Default auto-refresh interval.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_millis(5000);

/// Handle to a polling task that aborts the task when dropped.
///
/// Holding the guard is what keeps the timer alive; dropping it on any
/// exit path releases the timer.
#[derive(Debug)]
pub struct PollGuard {
    handle: JoinHandle<()>,
}

impl PollGuard {
    /// Wraps a spawned polling task.
    #[must_use]
    pub fn new(handle: JoinHandle<()>) -> Self {
        Self { handle }
    }
}

impl Drop for PollGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Drives log fetching for one app.
///
/// Facet changes and pagination immediately re-fetch; the polling task
/// re-fetches on a fixed interval in between. Overlapping fetches are
/// resolved by the view's stale-response discard, so the displayed state
/// always matches the most recently issued request.
pub struct LogViewer {
    api: Arc<dyn GatewayApi>,
    app_id: String,
    view: Arc<Mutex<LogView>>,
    poll: Option<PollGuard>,
}

impl LogViewer {
    /// Creates a viewer for `app_id` with the default filter. No fetch is
    /// issued until [`refresh`](Self::refresh) or
    /// [`start_polling`](Self::start_polling) is called.
    #[must_use]
    pub fn new(api: Arc<dyn GatewayApi>, app_id: impl Into<String>) -> Self {
        Self {
            api,
            app_id: app_id.into(),
            view: Arc::new(Mutex::new(LogView::new())),
            poll: None,
        }
    }

    /// The app whose logs are shown.
    #[must_use]
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// Snapshot of the displayed entries.
    #[must_use]
    pub fn logs(&self) -> Vec<LogEntry> {
        self.view.lock().logs().to_vec()
    }

    /// Snapshot of the total matching entries.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.view.lock().total()
    }

    /// Snapshot of the error banner, if any.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.view.lock().error().map(String::from)
    }

    /// Snapshot of the active wire query.
    #[must_use]
    pub fn query(&self) -> LogQuery {
        self.view.lock().filter().to_query()
    }

    /// Distinct connection IDs on the current page, for the selector.
    #[must_use]
    pub fn connection_ids(&self) -> Vec<String> {
        self.view.lock().connection_ids()
    }

    /// True if the Next control should be enabled.
    #[must_use]
    pub fn can_next(&self) -> bool {
        self.view.lock().can_next()
    }

    /// True if the Previous control should be enabled.
    #[must_use]
    pub fn can_prev(&self) -> bool {
        self.view.lock().can_prev()
    }

    /// Sets or clears the level facet and re-fetches.
    pub async fn set_level(&self, level: Option<LogLevel>) {
        self.view.lock().filter_mut().set_level(level);
        self.refresh().await;
    }

    /// Sets or clears the connection facet and re-fetches.
    pub async fn set_connection(&self, connection_id: Option<String>) {
        self.view.lock().filter_mut().set_connection(connection_id);
        self.refresh().await;
    }

    /// Sets the time window and re-fetches.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidRange`] if `start` is after `end`;
    /// nothing is fetched and the filter is unchanged.
    pub async fn set_time_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<(), FilterError> {
        self.view.lock().filter_mut().set_time_range(start, end)?;
        self.refresh().await;
        Ok(())
    }

    /// Restores the default 24-hour window and re-fetches.
    pub async fn reset_time_range(&self) {
        self.view.lock().filter_mut().reset_time_range();
        self.refresh().await;
    }

    /// Advances to the next page and re-fetches. No-op when Next is
    /// disabled.
    pub async fn next_page(&self) {
        if self.view.lock().next_page() {
            self.refresh().await;
        }
    }

    /// Moves to the previous page and re-fetches. No-op when Previous is
    /// disabled.
    pub async fn prev_page(&self) {
        if self.view.lock().prev_page() {
            self.refresh().await;
        }
    }

    /// Fetches the current filter once and applies the result, subject to
    /// stale-response discard.
    pub async fn refresh(&self) {
        fetch_once(&self.api, &self.view, &self.app_id).await;
    }

    /// Starts polling at `interval`, replacing any previous timer.
    ///
    /// The first fetch fires immediately; later ones are spaced by
    /// `interval` from a fresh timer, so changing the interval never
    /// accumulates drift.
    pub fn start_polling(&mut self, interval: Duration) {
        // Dropping the old guard aborts the old task first.
        self.poll = None;

        let api = Arc::clone(&self.api);
        let view = Arc::clone(&self.view);
        let app_id = self.app_id.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                fetch_once(&api, &view, &app_id).await;
            }
        });
        self.poll = Some(PollGuard::new(handle));
        debug!(interval_ms = interval.as_millis() as u64, "log polling started");
    }

    /// Stops polling. The timer is released immediately.
    pub fn stop_polling(&mut self) {
        if self.poll.take().is_some() {
            debug!("log polling stopped");
        }
    }

    /// True while a polling task is held.
    #[must_use]
    pub const fn is_polling(&self) -> bool {
        self.poll.is_some()
    }
}

/// One fetch cycle: snapshot the query, call the gateway, apply the result
/// if it is still current.
///
/// A failed fetch clears the displayed page and raises the error banner but
/// never stops the polling loop; the next tick retries naturally.
async fn fetch_once(api: &Arc<dyn GatewayApi>, view: &Arc<Mutex<LogView>>, app_id: &str) {
    let (ticket, query) = {
        let mut view = view.lock();
        let ticket = view.begin_fetch();
        (ticket, view.filter().to_query())
    };

    let result = api.fetch_logs(app_id, &query).await;

    let mut view = view.lock();
    match result {
        Ok(page) => {
            view.apply_page(ticket, page);
        }
        Err(error) => {
            view.apply_error(ticket, error.to_string());
        }
    }
}
