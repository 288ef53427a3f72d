//! Page state for client- and server-side pagination.
//!
//! Pages are 1-based. The current page is always clamped into
//! `1..=page_count`, where an empty collection still has one (empty) page.
//!
//! # Example
//!
//! ```rust
//! use datagrid::Pagination;
//!
//! let mut pagination = Pagination::new().page_size(10);
//! pagination.set_total(23);
//! assert_eq!(pagination.page_count(), 3);
//!
//! pagination.set_page(3);
//! assert_eq!(pagination.slice_bounds(), (20, 23));
//!
//! pagination.set_page(99);
//! assert_eq!(pagination.page(), 3);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Largest accepted page size.
pub const MAX_PAGE_SIZE: usize = 100;

/// Page sizes offered by the page-size picker.
pub const PAGE_SIZE_CHOICES: [usize; 4] = [10, 25, 50, 100];

/// Where the total row count comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "mode")]
pub enum PaginationMode {
    /// The engine slices pages out of the filtered rows it holds.
    #[default]
    Client,
    /// The caller fetches one page at a time and supplies the total.
    Server {
        /// Total row count reported by the server.
        total: usize,
    },
}

/// Current page, page size and total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    page: usize,
    page_size: usize,
    total: usize,
    mode: PaginationMode,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new()
    }
}

impl Pagination {
    /// Creates client-mode pagination on page 1 with the default page size.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            total: 0,
            mode: PaginationMode::Client,
        }
    }

    /// Sets the page size, clamped into `1..=MAX_PAGE_SIZE` (builder pattern).
    #[must_use]
    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = size.clamp(1, MAX_PAGE_SIZE);
        self.clamp();
        self
    }

    /// Switches to server mode with the given total (builder pattern).
    #[must_use]
    pub fn server(mut self, total: usize) -> Self {
        self.set_server_total(total);
        self
    }

    /// Current page (1-based).
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Rows per page.
    #[must_use]
    pub const fn get_page_size(&self) -> usize {
        self.page_size
    }

    /// Total number of rows across all pages.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Pagination mode.
    #[must_use]
    pub const fn mode(&self) -> PaginationMode {
        self.mode
    }

    /// Returns whether the caller owns paging.
    #[must_use]
    pub const fn is_server(&self) -> bool {
        matches!(self.mode, PaginationMode::Server { .. })
    }

    /// Number of pages, never less than one.
    #[must_use]
    pub const fn page_count(&self) -> usize {
        if self.total == 0 {
            1
        } else {
            self.total.div_ceil(self.page_size)
        }
    }

    /// Moves to `page`, clamped into range. Returns whether the page changed.
    pub fn set_page(&mut self, page: usize) -> bool {
        let clamped = page.clamp(1, self.page_count());
        let changed = clamped != self.page;
        self.page = clamped;
        changed
    }

    /// Changes the page size and returns to page 1.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidPageSize`] when `size` is outside
    /// `1..=MAX_PAGE_SIZE`.
    pub fn set_page_size(&mut self, size: usize) -> Result<()> {
        if !(1..=MAX_PAGE_SIZE).contains(&size) {
            return Err(GridError::InvalidPageSize {
                size,
                max: MAX_PAGE_SIZE,
            });
        }
        self.page_size = size;
        self.page = 1;
        Ok(())
    }

    /// Updates the client-side total and re-clamps the page.
    ///
    /// Ignored in server mode, where only the caller sets the total.
    pub fn set_total(&mut self, total: usize) {
        if self.is_server() {
            return;
        }
        self.total = total;
        self.clamp();
    }

    /// Switches to (or stays in) server mode with a new total.
    pub fn set_server_total(&mut self, total: usize) {
        self.mode = PaginationMode::Server { total };
        self.total = total;
        self.clamp();
    }

    /// Switches back to client mode; the total follows the filtered rows again.
    pub fn set_client(&mut self, total: usize) {
        self.mode = PaginationMode::Client;
        self.total = total;
        self.clamp();
    }

    /// Resets to the first page.
    pub fn first_page(&mut self) -> bool {
        self.set_page(1)
    }

    /// Advances one page if possible.
    pub fn next_page(&mut self) -> bool {
        self.set_page(self.page + 1)
    }

    /// Goes back one page if possible.
    pub fn prev_page(&mut self) -> bool {
        self.set_page(self.page.saturating_sub(1))
    }

    /// Returns whether the current page is the first.
    #[must_use]
    pub const fn on_first_page(&self) -> bool {
        self.page == 1
    }

    /// Returns whether the current page is the last.
    #[must_use]
    pub const fn on_last_page(&self) -> bool {
        self.page >= self.page_count()
    }

    /// Half-open bounds of the current page within the client-side sequence.
    #[must_use]
    pub fn slice_bounds(&self) -> (usize, usize) {
        let start = ((self.page - 1) * self.page_size).min(self.total);
        let end = (start + self.page_size).min(self.total);
        (start, end)
    }

    /// One-based index range shown in a "Showing a–b of n" label.
    #[must_use]
    pub fn showing(&self) -> (usize, usize) {
        let (start, end) = self.slice_bounds();
        if start == end { (0, 0) } else { (start + 1, end) }
    }

    fn clamp(&mut self) {
        self.page = self.page.clamp(1, self.page_count());
    }
}
