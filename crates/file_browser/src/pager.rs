//! Cursor-based bidirectional pagination with in-flight guards.
//!
//! Each direction is an independent two-state machine (idle or loading), so
//! repeated clicks on a pagination control dispatch at most one fetch per
//! direction. Sort or search changes reset the pager entirely; stale cursors
//! are never reused across a parameter change.

use storage_api::{PageCursor, PageResponse};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchDirection {
    Next,
    Previous,
}

#[derive(Clone, Debug)]
pub struct ListingPager {
    page_number: usize,
    has_next: bool,
    has_previous: bool,
    loading_next: bool,
    loading_previous: bool,
    next_cursor: Option<PageCursor>,
    previous_cursor: Option<PageCursor>,
}

impl Default for ListingPager {
    fn default() -> Self {
        Self {
            page_number: 1,
            has_next: false,
            has_previous: false,
            loading_next: false,
            loading_previous: false,
            next_cursor: None,
            previous_cursor: None,
        }
    }
}

impl ListingPager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_number(&self) -> usize {
        self.page_number
    }

    pub fn has_next(&self) -> bool {
        self.has_next
    }

    pub fn has_previous(&self) -> bool {
        self.has_previous
    }

    pub fn is_loading(&self) -> bool {
        self.loading_next || self.loading_previous
    }

    pub fn is_loading_next(&self) -> bool {
        self.loading_next
    }

    pub fn is_loading_previous(&self) -> bool {
        self.loading_previous
    }

    /// Begin a forward fetch. Returns the cursor to send, or `None` when
    /// there is no next page or a forward fetch is already in flight.
    pub fn request_next(&mut self) -> Option<PageCursor> {
        if !self.has_next || self.loading_next {
            return None;
        }
        let cursor = self.next_cursor.clone()?;
        self.loading_next = true;
        Some(cursor)
    }

    /// Begin a backward fetch; symmetric to [`Self::request_next`].
    pub fn request_previous(&mut self) -> Option<PageCursor> {
        if !self.has_previous || self.loading_previous {
            return None;
        }
        let cursor = self.previous_cursor.clone()?;
        self.loading_previous = true;
        Some(cursor)
    }

    /// Apply the first page of a fresh listing (after a reset).
    pub fn seed(&mut self, response: &PageResponse) {
        self.page_number = 1;
        self.apply_cursors(response);
        self.loading_next = false;
        self.loading_previous = false;
    }

    /// Resolve an in-flight fetch for `direction`.
    pub fn complete(&mut self, direction: FetchDirection, response: &PageResponse) {
        match direction {
            FetchDirection::Next => {
                self.loading_next = false;
                self.page_number += 1;
            }
            FetchDirection::Previous => {
                self.loading_previous = false;
                self.page_number = self.page_number.saturating_sub(1).max(1);
            }
        }
        self.apply_cursors(response);
    }

    /// Resolve an in-flight fetch that failed; contents and cursors keep
    /// their previous values so the user can retry.
    pub fn fail(&mut self, direction: FetchDirection) {
        match direction {
            FetchDirection::Next => self.loading_next = false,
            FetchDirection::Previous => self.loading_previous = false,
        }
    }

    /// Drop all cursors and return to the first page. Required on any sort
    /// or search parameter change.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn apply_cursors(&mut self, response: &PageResponse) {
        self.has_next = response.has_next;
        self.has_previous = response.has_previous;
        self.next_cursor = response.next_cursor.clone();
        self.previous_cursor = response.previous_cursor.clone();
    }
}
