/// Sequential page-load coordination
///
/// The pager is an explicit state machine (idle or loading) that owns
/// the page cursor and the has-more flag. It never performs I/O itself:
/// `begin_load` hands out a `FetchRequest` describing what to fetch, and
/// the completion methods apply the outcome. This split keeps the
/// concurrency guard testable without a runtime, and it is what makes
/// the guard airtight: only one request can be outstanding because only
/// the pager can mint one.

use log::debug;

/// A fetch the pager has authorized.
///
/// `generation` uniquely identifies this request; a completion carrying
/// a different generation is stale (issued before a teardown or applied
/// twice) and is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    /// 1-based page to fetch.
    pub page: u32,
    /// Number of photos to request.
    pub page_size: u32,
    /// Whether the accumulated collection should be replaced, not
    /// appended to, when this request completes.
    pub reset: bool,
    /// Monotonic identity of this request.
    pub generation: u64,
}

/// Pagination state: page cursor, has-more flag, and the in-flight guard.
#[derive(Debug)]
pub struct Pager {
    next_page: u32,
    page_size: u32,
    has_more: bool,
    in_flight: Option<FetchRequest>,
    generation: u64,
}

impl Pager {
    /// A fresh pager starting at page 1 with more data assumed.
    pub fn new(page_size: u32) -> Self {
        Self {
            next_page: 1,
            page_size,
            has_more: true,
            in_flight: None,
            generation: 0,
        }
    }

    /// Request the next page load.
    ///
    /// Returns `None` (a no-op, no side effects) when a load is already
    /// in flight, or when the source is exhausted and this is not a
    /// reset. On `reset` the cursor is forced back to page 1 and the
    /// source is assumed non-exhausted again.
    pub fn begin_load(&mut self, reset: bool) -> Option<FetchRequest> {
        if self.in_flight.is_some() {
            debug!("load requested while a fetch is in flight, ignoring");
            return None;
        }
        if reset {
            self.next_page = 1;
            self.has_more = true;
        } else if !self.has_more {
            return None;
        }

        self.generation += 1;
        let request = FetchRequest {
            page: self.next_page,
            page_size: self.page_size,
            reset,
            generation: self.generation,
        };
        self.in_flight = Some(request);
        Some(request)
    }

    /// Apply a successful fetch for `generation`.
    ///
    /// Advances the cursor by one, updates has-more from the response,
    /// and returns the completed request so the caller knows whether it
    /// was a reset. A stale generation returns `None` without touching
    /// any state.
    pub fn complete_success(&mut self, generation: u64, has_next_page: bool) -> Option<FetchRequest> {
        let request = self.take_in_flight(generation)?;
        self.next_page += 1;
        self.has_more = has_next_page;
        Some(request)
    }

    /// Apply a failed fetch for `generation`.
    ///
    /// The cursor and has-more flag are left unchanged so the same page
    /// can be retried by a fresh `begin_load`. Returns the failed
    /// request, or `None` when the completion is stale.
    pub fn complete_failure(&mut self, generation: u64) -> Option<FetchRequest> {
        self.take_in_flight(generation)
    }

    fn take_in_flight(&mut self, generation: u64) -> Option<FetchRequest> {
        match self.in_flight {
            Some(request) if request.generation == generation => {
                self.in_flight = None;
                Some(request)
            }
            _ => {
                debug!("discarding stale fetch completion (generation {generation})");
                None
            }
        }
    }

    /// Whether a fetch is currently outstanding.
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether the source has further pages.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// The page the next successful `begin_load` would fetch.
    pub fn next_page(&self) -> u32 {
        self.next_page
    }
}
