//! Log filter state and pagination cursor arithmetic.

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use console_client::{LOG_PAGE_SIZE, LogLevel, LogQuery};

/// Errors from filter mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// The requested time range has `start_time` after `end_time`.
    #[error("start_time must not be after end_time")]
    InvalidRange,
}

/// The default query window, counted back from now.
#[must_use]
pub fn default_window() -> Duration {
    Duration::hours(24)
}

/// The active log filter.
///
/// Every facet mutation (level, connection, time range) resets `offset` to
/// zero — changing a facet must never silently display a page computed under
/// the old facet. Only explicit pagination moves the offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFilter {
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    level: Option<LogLevel>,
    connection_id: Option<String>,
    limit: u32,
    offset: u64,
}

impl LogFilter {
    /// Creates the default filter: the last 24 hours ending at `now`,
    /// first page.
    #[must_use]
    pub fn new_ending_at(now: DateTime<Utc>) -> Self {
        Self {
            start_time: now - default_window(),
            end_time: now,
            level: None,
            connection_id: None,
            limit: LOG_PAGE_SIZE,
            offset: 0,
        }
    }

    /// Creates the default filter ending at the current time.
    #[must_use]
    pub fn new() -> Self {
        Self::new_ending_at(Utc::now())
    }

    /// Start of the time window.
    #[must_use]
    pub const fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// End of the time window.
    #[must_use]
    pub const fn end_time(&self) -> DateTime<Utc> {
        self.end_time
    }

    /// The active level facet.
    #[must_use]
    pub const fn level(&self) -> Option<LogLevel> {
        self.level
    }

    /// The active connection facet.
    #[must_use]
    pub fn connection_id(&self) -> Option<&str> {
        self.connection_id.as_deref()
    }

    /// The page size.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// The current offset into the result set.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    /// Sets or clears the level facet, resetting to the first page.
    pub fn set_level(&mut self, level: Option<LogLevel>) {
        self.level = level;
        self.offset = 0;
    }

    /// Sets or clears the connection facet, resetting to the first page.
    pub fn set_connection(&mut self, connection_id: Option<String>) {
        self.connection_id = connection_id;
        self.offset = 0;
    }

    /// Sets the time window, resetting to the first page.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidRange`] if `start` is after `end`; the
    /// filter is left unchanged.
    pub fn set_time_range(
        &mut self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<(), FilterError> {
        if start > end {
            return Err(FilterError::InvalidRange);
        }
        self.start_time = start;
        self.end_time = end;
        self.offset = 0;
        Ok(())
    }

    /// Restores the default 24-hour window ending at `now`, resetting to
    /// the first page.
    pub fn reset_time_range_at(&mut self, now: DateTime<Utc>) {
        self.start_time = now - default_window();
        self.end_time = now;
        self.offset = 0;
    }

    /// Restores the default 24-hour window ending at the current time.
    pub fn reset_time_range(&mut self) {
        self.reset_time_range_at(Utc::now());
    }

    /// True if a next page exists.
    ///
    /// `page_len` is the length of the last successful page, not `limit`,
    /// because a final page may be shorter.
    #[must_use]
    pub const fn can_advance(&self, page_len: usize, total: u64) -> bool {
        self.offset + (page_len as u64) < total
    }

    /// True if a previous page exists.
    #[must_use]
    pub const fn can_rewind(&self) -> bool {
        self.offset > 0
    }

    /// Moves to the next page if one exists. Returns whether it moved.
    pub fn advance(&mut self, page_len: usize, total: u64) -> bool {
        if !self.can_advance(page_len, total) {
            return false;
        }
        self.offset += u64::from(self.limit);
        true
    }

    /// Moves to the previous page if one exists, flooring the offset at
    /// zero. Returns whether it moved.
    pub fn rewind(&mut self) -> bool {
        if !self.can_rewind() {
            return false;
        }
        self.offset = self.offset.saturating_sub(u64::from(self.limit));
        true
    }

    /// Renders the filter as a wire query.
    #[must_use]
    pub fn to_query(&self) -> LogQuery {
        LogQuery {
            start_time: self.start_time,
            end_time: self.end_time,
            level: self.level,
            connection_id: self.connection_id.clone(),
            limit: self.limit,
            offset: self.offset,
        }
    }
}

impl Default for LogFilter {
    fn default() -> Self {
        Self::new()
    }
}
