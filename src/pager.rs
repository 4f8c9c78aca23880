//! Fixed-size paging over raw rows.
//!
//! The cursor is plain data handed in and returned by [`next_page`], so a
//! caller can drive it from a prompt loop or step through it in a test.

use crate::dataset::{Dataset, TripRecord};

pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Where the next page starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    offset: usize,
    page_size: usize,
}

impl PageCursor {
    /// A cursor at row 0. A zero page size is treated as 1.
    pub fn new(page_size: usize) -> Self {
        PageCursor {
            offset: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// True once every row of a dataset with `len` rows has been shown.
    pub fn is_exhausted(&self, len: usize) -> bool {
        self.offset >= len
    }
}

impl Default for PageCursor {
    fn default() -> Self {
        PageCursor::new(DEFAULT_PAGE_SIZE)
    }
}

/// Returns rows `[offset, offset + page_size)`, clipped to the dataset, and
/// the cursor advanced by one page.
pub fn next_page(dataset: &Dataset, cursor: PageCursor) -> (&[TripRecord], PageCursor) {
    let records = dataset.records();
    let start = cursor.offset.min(records.len());
    let end = cursor.offset.saturating_add(cursor.page_size).min(records.len());

    let next = PageCursor {
        offset: cursor.offset.saturating_add(cursor.page_size),
        ..cursor
    };
    (&records[start..end], next)
}
