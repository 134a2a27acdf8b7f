//! Client-side pagination.
//!
//! Pages are 1-based. [`Pager`] slices a collection into pages and
//! [`PageWindow`] describes the bounded set of page buttons around the
//! current page.

/// Default number of records per page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Default number of page buttons shown at once.
pub const DEFAULT_WINDOW_SIZE: usize = 7;

/// Splits a collection into fixed-size pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page_size: usize,
    window_size: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, DEFAULT_WINDOW_SIZE)
    }
}

impl Pager {
    /// Create a pager. Zero sizes are raised to 1.
    #[must_use]
    pub fn new(page_size: usize, window_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            window_size: window_size.max(1),
        }
    }

    /// Records per page.
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Total pages for `len` records: `ceil(len / page_size)`, 0 when empty.
    #[must_use]
    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.page_size)
    }

    /// Whether `page` is a valid page for `len` records.
    #[must_use]
    pub fn contains(&self, page: usize, len: usize) -> bool {
        page >= 1 && page <= self.total_pages(len)
    }

    /// The records on `page`. Out-of-range pages are empty.
    #[must_use]
    pub fn page<'a, T>(&self, items: &'a [T], page: usize) -> &'a [T] {
        if page == 0 {
            return &[];
        }
        let start = (page - 1).saturating_mul(self.page_size);
        if start >= items.len() {
            return &[];
        }
        let end = start.saturating_add(self.page_size).min(items.len());
        &items[start..end]
    }

    /// The page buttons to show around `current`.
    #[must_use]
    pub fn window(&self, current: usize, total_pages: usize) -> PageWindow {
        let start = current.saturating_sub(self.window_size / 2).max(1);
        let end = total_pages.min(start + self.window_size - 1);
        PageWindow {
            current,
            total_pages,
            pages: (start..=end).collect(),
        }
    }
}

/// The bounded set of page-number buttons around the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    current: usize,
    total_pages: usize,
    pages: Vec<usize>,
}

impl PageWindow {
    /// The page numbers to show, ascending.
    #[must_use]
    pub fn pages(&self) -> &[usize] {
        &self.pages
    }

    /// The current page.
    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    /// Total number of pages.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Whether an ellipsis precedes the first button.
    #[must_use]
    pub fn leading_ellipsis(&self) -> bool {
        self.pages.first().is_some_and(|&first| first > 1)
    }

    /// Whether an ellipsis follows the last button.
    #[must_use]
    pub fn trailing_ellipsis(&self) -> bool {
        self.pages
            .last()
            .is_some_and(|&last| last < self.total_pages)
    }

    /// Whether the previous button is enabled.
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.current != 1
    }

    /// Whether the next button is enabled.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.current != self.total_pages
    }

    /// The page the previous button requests. The caller bounds-checks it.
    #[must_use]
    pub fn previous(&self) -> usize {
        self.current.saturating_sub(1)
    }

    /// The page the next button requests. The caller bounds-checks it.
    #[must_use]
    pub fn next(&self) -> usize {
        self.current + 1
    }
}
