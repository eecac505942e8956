//! Displayed log state with stale-response discard.
//!
//! [`LogView`] holds the filter, the last successful page, and the error
//! banner. Fetches are bracketed by [`LogView::begin_fetch`] and one of the
//! `apply_*` methods: each fetch carries a [`FetchTicket`], and a result
//! whose ticket is no longer current is discarded instead of overwriting
//! state produced by a newer request. Requests are never cancelled — only
//! their results can go stale.

use tracing::debug;

use console_client::types::{LogEntry, LogsPage};

use crate::filter::LogFilter;

/// Token identifying one fetch against the view.
///
/// Compared at resolution time; only the most recently issued fetch may
/// apply its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// The log viewer's displayed state.
#[derive(Debug, Default)]
pub struct LogView {
    filter: LogFilter,
    logs: Vec<LogEntry>,
    total: u64,
    error: Option<String>,
    generation: u64,
}

impl LogView {
    /// Creates a view with the default filter (last 24 hours, first page).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a view over a prepared filter.
    #[must_use]
    pub fn with_filter(filter: LogFilter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    /// The active filter.
    #[must_use]
    pub const fn filter(&self) -> &LogFilter {
        &self.filter
    }

    /// Mutable access to the filter, for facet changes and pagination.
    pub fn filter_mut(&mut self) -> &mut LogFilter {
        &mut self.filter
    }

    /// The last successful page's entries.
    #[must_use]
    pub fn logs(&self) -> &[LogEntry] {
        &self.logs
    }

    /// Total entries matching the filter across all pages.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// The current error banner, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True if the Next control should be enabled.
    ///
    /// Uses the length of the last successful page rather than the page
    /// size limit, because a final page may be shorter.
    #[must_use]
    pub fn can_next(&self) -> bool {
        self.filter.can_advance(self.logs.len(), self.total)
    }

    /// True if the Previous control should be enabled.
    #[must_use]
    pub const fn can_prev(&self) -> bool {
        self.filter.can_rewind()
    }

    /// Advances to the next page if one exists. Returns whether it moved.
    pub fn next_page(&mut self) -> bool {
        let page_len = self.logs.len();
        let total = self.total;
        self.filter.advance(page_len, total)
    }

    /// Moves to the previous page if one exists. Returns whether it moved.
    pub fn prev_page(&mut self) -> bool {
        self.filter.rewind()
    }

    /// Marks the start of a fetch against the current filter.
    ///
    /// Any fetch started earlier becomes stale from this point on.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        FetchTicket(self.generation)
    }

    /// Applies a successful page if the ticket is still current.
    ///
    /// The page supersedes the previous one wholesale; there is no merge.
    /// Returns whether the result was applied.
    pub fn apply_page(&mut self, ticket: FetchTicket, page: LogsPage) -> bool {
        if ticket.0 != self.generation {
            debug!(
                ticket = ticket.0,
                current = self.generation,
                "discarding stale log page"
            );
            return false;
        }
        self.logs = page.logs;
        self.total = page.total;
        self.error = None;
        true
    }

    /// Applies a fetch failure if the ticket is still current.
    ///
    /// The displayed page is cleared so stale results are never attributed
    /// to a newer filter; the error banner is set. Returns whether the
    /// result was applied.
    pub fn apply_error(&mut self, ticket: FetchTicket, message: impl Into<String>) -> bool {
        if ticket.0 != self.generation {
            debug!(
                ticket = ticket.0,
                current = self.generation,
                "discarding stale log fetch error"
            );
            return false;
        }
        self.logs.clear();
        self.total = 0;
        self.error = Some(message.into());
        true
    }

    /// Distinct connection identifiers on the currently loaded page,
    /// sorted. Used to populate the connection filter selector.
    ///
    /// Derived from the current page only, never from history; recompute
    /// whenever the loaded page changes.
    #[must_use]
    pub fn connection_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .logs
            .iter()
            .filter_map(|entry| entry.connection_id.clone())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}
