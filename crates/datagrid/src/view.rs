//! Read-only projection of a grid's current state.

use crate::actions::Status;
use crate::column::Column;
use crate::pagination::Pagination;
use crate::record::RowId;
use crate::render::{RenderedCell, render_row};
use crate::selection::{CheckState, Selection};
use crate::sort::{SortDirection, SortState};

/// The rows of the current page plus every indicator a host needs to draw
/// the table: totals, header checkbox, sort and pagination.
///
/// A view borrows the grid, so it cannot change under the caller.
#[derive(Debug)]
pub struct GridView<'a, R> {
    /// Rows of the current page, in display order.
    pub rows: Vec<&'a R>,
    /// Ids of [`rows`](Self::rows), index for index.
    pub ids: Vec<&'a RowId>,
    /// Number of rows that pass search and filters (server mode: rows held).
    pub total_filtered: usize,
    /// Header checkbox state.
    pub check_state: CheckState,
    /// Page state.
    pub pagination: Pagination,
    /// Active sort, if any.
    pub sort: Option<&'a SortState>,
    /// Loading / error flags.
    pub status: &'a Status,
    columns: &'a [Column<R>],
    selected: usize,
    selection: &'a Selection,
}

impl<'a, R> GridView<'a, R> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        columns: &'a [Column<R>],
        rows: Vec<&'a R>,
        ids: Vec<&'a RowId>,
        total_filtered: usize,
        selected: usize,
        selection: &'a Selection,
        pagination: Pagination,
        sort: Option<&'a SortState>,
        status: &'a Status,
    ) -> Self {
        Self {
            rows,
            ids,
            total_filtered,
            check_state: CheckState::derive(selected, total_filtered),
            selected,
            pagination,
            sort,
            status,
            columns,
            selection,
        }
    }

    /// Columns in display order.
    #[must_use]
    pub const fn columns(&self) -> &'a [Column<R>] {
        self.columns
    }

    /// Returns whether there is nothing to show; the host draws its empty
    /// placeholder instead of the table body.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of selected rows in the filtered view.
    #[must_use]
    pub const fn selected_count(&self) -> usize {
        self.selected
    }

    /// Returns whether the row at `index` on this page is selected.
    #[must_use]
    pub fn is_selected(&self, index: usize) -> bool {
        self.ids
            .get(index)
            .is_some_and(|id| self.selection.contains(id))
    }

    /// Sort direction shown on a column header.
    #[must_use]
    pub fn sort_direction(&self, key: &str) -> Option<SortDirection> {
        self.sort
            .filter(|state| state.key == key)
            .map(|state| state.direction)
    }

    /// Renders every cell on the page. Renderer panics are contained per cell.
    #[must_use]
    pub fn render(&self) -> Vec<Vec<RenderedCell>> {
        self.rows
            .iter()
            .enumerate()
            .map(|(index, row)| render_row(self.columns, row, index))
            .collect()
    }
}
