//! Windowed rendering over long row sequences.
//!
//! Only the rows intersecting the viewport (plus a few rows of overscan on
//! either side) are rendered; a leading spacer of [`VirtualWindow::offset`]
//! keeps the scroll position honest.
//!
//! # Example
//!
//! ```rust
//! use datagrid::VirtualWindow;
//!
//! let mut window = VirtualWindow::new(1_000, 20, 200).overscan(2);
//! window.set_scroll(400);
//! assert_eq!(window.visible_range(), 18..32);
//! assert_eq!(window.offset(), 360);
//! ```

use std::ops::Range;

/// Default rows rendered beyond each edge of the viewport.
pub const DEFAULT_OVERSCAN: usize = 3;

/// Scroll state of a virtualized list with fixed row height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualWindow {
    item_count: usize,
    item_height: usize,
    viewport_height: usize,
    overscan: usize,
    scroll: usize,
}

impl VirtualWindow {
    /// Creates a window scrolled to the top. A zero item height is treated
    /// as one.
    #[must_use]
    pub fn new(item_count: usize, item_height: usize, viewport_height: usize) -> Self {
        Self {
            item_count,
            item_height: item_height.max(1),
            viewport_height,
            overscan: DEFAULT_OVERSCAN,
            scroll: 0,
        }
    }

    /// Sets the overscan (builder pattern).
    #[must_use]
    pub const fn overscan(mut self, rows: usize) -> Self {
        self.overscan = rows;
        self
    }

    /// Total scrollable height.
    #[must_use]
    pub const fn content_height(&self) -> usize {
        self.item_count * self.item_height
    }

    /// Largest valid scroll offset.
    #[must_use]
    pub const fn max_scroll(&self) -> usize {
        self.content_height().saturating_sub(self.viewport_height)
    }

    /// Current scroll offset.
    #[must_use]
    pub const fn scroll(&self) -> usize {
        self.scroll
    }

    /// Sets the scroll offset, clamped into range.
    pub fn set_scroll(&mut self, scroll: usize) {
        self.scroll = scroll.min(self.max_scroll());
    }

    /// Updates the number of items and re-clamps the scroll offset.
    pub fn set_item_count(&mut self, count: usize) {
        self.item_count = count;
        self.set_scroll(self.scroll);
    }

    /// Updates the viewport height and re-clamps the scroll offset.
    pub fn set_viewport_height(&mut self, height: usize) {
        self.viewport_height = height;
        self.set_scroll(self.scroll);
    }

    /// Indices to render, overscan included.
    #[must_use]
    pub fn visible_range(&self) -> Range<usize> {
        if self.item_count == 0 {
            return 0..0;
        }
        let first = self.scroll / self.item_height;
        let last = (self.scroll + self.viewport_height).div_ceil(self.item_height);
        let start = first.saturating_sub(self.overscan);
        let end = (last + self.overscan).min(self.item_count);
        start.min(end)..end
    }

    /// Height of the spacer above the first rendered row.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.visible_range().start * self.item_height
    }

    /// Scrolls the minimum distance needed to bring `index` fully into view.
    pub fn scroll_to_index(&mut self, index: usize) {
        let index = index.min(self.item_count.saturating_sub(1));
        let top = index * self.item_height;
        let bottom = top + self.item_height;
        if top < self.scroll {
            self.set_scroll(top);
        } else if bottom > self.scroll + self.viewport_height {
            self.set_scroll(bottom.saturating_sub(self.viewport_height));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_of_list() {
        let window = VirtualWindow::new(100, 10, 50).overscan(2);
        assert_eq!(window.visible_range(), 0..7);
        assert_eq!(window.offset(), 0);
        assert_eq!(window.content_height(), 1000);
    }

    #[test]
    fn test_scroll_clamps() {
        let mut window = VirtualWindow::new(100, 10, 50);
        window.set_scroll(10_000);
        assert_eq!(window.scroll(), 950);
        assert_eq!(window.visible_range().end, 100);
    }

    #[test]
    fn test_empty_and_short_lists() {
        let window = VirtualWindow::new(0, 10, 50);
        assert_eq!(window.visible_range(), 0..0);
        assert_eq!(window.max_scroll(), 0);

        let window = VirtualWindow::new(3, 10, 50);
        assert_eq!(window.visible_range(), 0..3);
    }

    #[test]
    fn test_scroll_to_index() {
        let mut window = VirtualWindow::new(100, 10, 50).overscan(0);
        window.scroll_to_index(20);
        assert_eq!(window.scroll(), 160);
        assert_eq!(window.visible_range(), 16..21);
        window.scroll_to_index(18);
        assert_eq!(window.scroll(), 160);
        window.scroll_to_index(2);
        assert_eq!(window.scroll(), 20);
    }

    #[test]
    fn test_shrinking_list_reclamps() {
        let mut window = VirtualWindow::new(100, 10, 50);
        window.set_scroll(900);
        window.set_item_count(10);
        assert_eq!(window.scroll(), 50);
        window.set_viewport_height(200);
        assert_eq!(window.scroll(), 0);
    }
}
