//! Cursor pagination state — sequential, bounded, loop-safe.

use crate::shared::Cursor;
use std::collections::HashSet;

/// Why paging stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The last page carried no next cursor.
    Exhausted,
    /// A page came back with no orders.
    EmptyPage,
    /// The upstream handed back a cursor it had already returned.
    CursorLoop,
    /// `max_pages` pages were fetched and more were still on offer.
    MaxPages,
}

/// Drives order-book paging one page at a time.
///
/// The caller asks for [`next_cursor`](Self::next_cursor), fetches, then
/// reports the page with [`record_page`](Self::record_page) until
/// [`is_done`](Self::is_done). Termination is guaranteed after `max_pages`
/// pages whatever the upstream returns.
#[derive(Debug, Clone)]
pub struct Pagination {
    max_pages: u32,
    pages_fetched: u32,
    next: Option<Cursor>,
    seen: HashSet<Cursor>,
    stopped: Option<StopReason>,
}

impl Pagination {
    pub fn new(max_pages: u32) -> Self {
        Self {
            max_pages: max_pages.max(1),
            pages_fetched: 0,
            next: None,
            seen: HashSet::new(),
            stopped: None,
        }
    }

    /// Cursor for the next request (`None` on the first page).
    pub fn next_cursor(&self) -> Option<&Cursor> {
        self.next.as_ref()
    }

    pub fn is_done(&self) -> bool {
        self.stopped.is_some()
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stopped
    }

    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    /// Record a fetched page and decide whether another one follows.
    pub fn record_page(&mut self, order_count: usize, next_cursor: Option<Cursor>) {
        if self.is_done() {
            return;
        }
        self.pages_fetched += 1;

        let reason = if order_count == 0 {
            Some(StopReason::EmptyPage)
        } else {
            match next_cursor {
                None => Some(StopReason::Exhausted),
                Some(cursor) if !self.seen.insert(cursor.clone()) => Some(StopReason::CursorLoop),
                Some(_) if self.pages_fetched >= self.max_pages => Some(StopReason::MaxPages),
                Some(cursor) => {
                    self.next = Some(cursor);
                    None
                }
            }
        };

        if let Some(reason) = reason {
            self.next = None;
            self.stopped = Some(reason);
        }
    }

    /// Stop early, e.g. after a failed fetch.
    pub fn abort(&mut self) {
        self.next = None;
        self.stopped.get_or_insert(StopReason::Exhausted);
    }
}
