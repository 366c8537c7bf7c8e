//! Cursor-paginated feed state machine.
//!
//! [`PagedFeed`] is synchronous and I/O-free: a state holder starts a load
//! by taking a [`LoadTicket`], performs the fetch however it likes, and
//! feeds the outcome back. Tickets carry the epoch current at issue time;
//! a ticket whose epoch no longer matches is ignored, so a stale
//! late-arriving response can never overwrite newer state. `refresh`
//! invalidates all outstanding tickets by bumping the epoch — no
//! cooperative cancellation required.

use crate::domain::PaginatedResult;

/// Loading phase of a feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedPhase {
    /// Nothing loaded yet, no load running.
    Idle,
    /// Initial load (or refresh) in flight.
    Loading,
    /// At least one page held, next page in flight.
    LoadingMore,
    /// At least one page applied, nothing in flight.
    Loaded,
}

/// What a ticket was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    Initial,
    More,
}

/// Permission to run one load and report its outcome.
#[derive(Debug, Clone)]
pub struct LoadTicket {
    epoch: u64,
    kind: LoadKind,
    /// Continuation cursor to request with, `None` for the first page.
    pub cursor: Option<String>,
}

impl LoadTicket {
    pub const fn kind(&self) -> LoadKind {
        self.kind
    }
}

/// Read-only view of the feed for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSnapshot {
    pub is_loading: bool,
    pub is_loading_more: bool,
    pub has_more: bool,
    pub item_count: usize,
    pub error: Option<String>,
}

/// State machine for a cursor-paginated list.
#[derive(Debug)]
pub struct PagedFeed<T> {
    items: Vec<T>,
    phase: FeedPhase,
    cursor: Option<String>,
    has_more: bool,
    epoch: u64,
    error: Option<String>,
}

impl<T> Default for PagedFeed<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PagedFeed<T> {
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            phase: FeedPhase::Idle,
            cursor: None,
            has_more: false,
            epoch: 0,
            error: None,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub const fn phase(&self) -> FeedPhase {
        self.phase
    }

    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub const fn is_loading(&self) -> bool {
        matches!(self.phase, FeedPhase::Loading)
    }

    pub const fn is_loading_more(&self) -> bool {
        matches!(self.phase, FeedPhase::LoadingMore)
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        FeedSnapshot {
            is_loading: self.is_loading(),
            is_loading_more: self.is_loading_more(),
            has_more: self.has_more,
            item_count: self.items.len(),
            error: self.error.clone(),
        }
    }

    /// Start over: invalidate any in-flight load, discard the continuation
    /// cursor, reset to empty and enter the initial-loading phase.
    ///
    /// Always permitted.
    pub fn begin_refresh(&mut self) -> LoadTicket {
        self.epoch += 1;
        self.items.clear();
        self.cursor = None;
        self.has_more = false;
        self.error = None;
        self.phase = FeedPhase::Loading;
        LoadTicket {
            epoch: self.epoch,
            kind: LoadKind::Initial,
            cursor: None,
        }
    }

    /// Request the next page.
    ///
    /// Returns `None` unless the feed is `Loaded` with more pages available
    /// and no load already in flight — the guard against duplicate
    /// concurrent appends.
    pub fn begin_load_more(&mut self) -> Option<LoadTicket> {
        if self.phase != FeedPhase::Loaded || !self.has_more {
            return None;
        }
        self.error = None;
        self.phase = FeedPhase::LoadingMore;
        Some(LoadTicket {
            epoch: self.epoch,
            kind: LoadKind::More,
            cursor: self.cursor.clone(),
        })
    }

    /// Apply a successfully fetched page.
    ///
    /// Returns `false` (and changes nothing) if the ticket is stale.
    /// Initial pages replace the item set; load-more pages append in
    /// original order. `has_more` is recomputed from the page's cursor.
    pub fn apply_page(&mut self, ticket: &LoadTicket, page: PaginatedResult<T>) -> bool {
        if ticket.epoch != self.epoch {
            return false;
        }
        match ticket.kind {
            LoadKind::Initial => self.items = page.items,
            LoadKind::More => self.items.extend(page.items),
        }
        self.cursor = page.metadata.next_cursor;
        self.has_more = self.cursor.is_some();
        self.error = None;
        self.phase = FeedPhase::Loaded;
        true
    }

    /// Apply a fetch failure.
    ///
    /// Returns `false` if the ticket is stale. The message is surfaced
    /// verbatim, loading flags are cleared, and previously loaded items
    /// remain untouched.
    pub fn apply_error(&mut self, ticket: &LoadTicket, message: impl Into<String>) -> bool {
        if ticket.epoch != self.epoch {
            return false;
        }
        self.error = Some(message.into());
        self.phase = match ticket.kind {
            LoadKind::Initial => FeedPhase::Idle,
            LoadKind::More => FeedPhase::Loaded,
        };
        true
    }
}
