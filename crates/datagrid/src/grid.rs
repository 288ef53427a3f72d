//! The tabular data engine.
//!
//! [`DataGrid`] owns a pre-fetched collection of rows and derives the table a
//! host displays: search and column filters, a single-key stable sort,
//! id-keyed selection and pagination. The filtered and sorted order is cached
//! and recomputed only when rows, search, filters or sort change; moving
//! between pages only shifts the slice window.
//!
//! # Example
//!
//! ```rust
//! use datagrid::{Column, DataGrid};
//! use serde_json::json;
//!
//! let mut grid = DataGrid::new(vec![
//!     Column::new("id", "ID"),
//!     Column::new("name", "Name").sortable(),
//! ])
//! .rows(vec![
//!     json!({"id": 1, "name": "B", "age": 30}),
//!     json!({"id": 2, "name": "A", "age": 25}),
//! ]);
//!
//! grid.toggle_sort("name").unwrap();
//! let ids: Vec<_> = grid.view().rows.iter().map(|r| r["id"].clone()).collect();
//! assert_eq!(ids, vec![json!(2), json!(1)]);
//! ```

use std::collections::HashSet;
use std::fmt;

use tracing::{debug, trace};

use crate::actions::{BulkAction, GridCallbacks, Status};
use crate::column::Column;
use crate::error::{GridError, Result};
use crate::filter::{FilterOption, Filters, SearchScope};
use crate::pagination::Pagination;
use crate::record::{Record, RowId};
use crate::selection::{CheckState, Selection};
use crate::sort::{SortState, next_sort, sort_indices};
use crate::view::GridView;

/// Client-side table state over rows of type `R`.
pub struct DataGrid<R> {
    columns: Vec<Column<R>>,
    rows: Vec<R>,
    ids: Vec<RowId>,
    filters: Filters,
    filter_options: Vec<FilterOption>,
    sort: Option<SortState>,
    selection: Selection,
    pagination: Pagination,
    status: Status,
    actions: Vec<BulkAction<R>>,
    callbacks: GridCallbacks<R>,
    /// Filtered and sorted indices into `rows`.
    order: Vec<usize>,
}

impl<R: Record> DataGrid<R> {
    /// Creates an empty grid with the given columns.
    #[must_use]
    pub fn new(columns: Vec<Column<R>>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            ids: Vec::new(),
            filters: Filters::new(),
            filter_options: Vec::new(),
            sort: None,
            selection: Selection::new(),
            pagination: Pagination::new(),
            status: Status::default(),
            actions: Vec::new(),
            callbacks: GridCallbacks::new(),
            order: Vec::new(),
        }
    }

    /// Sets the initial rows (builder pattern).
    #[must_use]
    pub fn rows(mut self, rows: Vec<R>) -> Self {
        self.set_rows(rows);
        self
    }

    /// Sets the initial page size, clamped into the accepted range.
    #[must_use]
    pub fn page_size(mut self, size: usize) -> Self {
        self.pagination = self.pagination.page_size(size);
        self
    }

    /// Sets what the search term is matched against.
    #[must_use]
    pub fn search_scope(mut self, scope: SearchScope) -> Self {
        self.filters = self.filters.scope(scope);
        self.derive();
        self
    }

    /// Attaches a filter picker descriptor.
    #[must_use]
    pub fn filter_option(mut self, option: FilterOption) -> Self {
        self.filter_options.push(option);
        self
    }

    /// Registers a bulk action.
    #[must_use]
    pub fn bulk_action(mut self, action: BulkAction<R>) -> Self {
        self.actions.push(action);
        self
    }

    /// Registers callbacks.
    #[must_use]
    pub fn callbacks(mut self, callbacks: GridCallbacks<R>) -> Self {
        self.callbacks = callbacks;
        self
    }

    /// Switches to server-side pagination with the caller's total.
    #[must_use]
    pub fn server_side(mut self, total: usize) -> Self {
        self.pagination.set_server_total(total);
        self
    }

    // ---------------------------------------------------------------------
    // Rows and columns
    // ---------------------------------------------------------------------

    /// Replaces the row collection, e.g. after a fetch.
    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.ids = rows.iter().map(Record::row_id).collect();
        self.rows = rows;
        self.derive();
    }

    /// Every row held, unfiltered.
    #[must_use]
    pub fn all_rows(&self) -> &[R] {
        &self.rows
    }

    /// Columns in display order.
    #[must_use]
    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    /// Looks a column up by key.
    #[must_use]
    pub fn column(&self, key: &str) -> Option<&Column<R>> {
        self.columns.iter().find(|c| c.key() == key)
    }

    /// Attached filter picker descriptors.
    #[must_use]
    pub fn filter_options(&self) -> &[FilterOption] {
        &self.filter_options
    }

    // ---------------------------------------------------------------------
    // Search and filters
    // ---------------------------------------------------------------------

    /// Sets the free-text search. A new term returns to page 1.
    pub fn set_search_term(&mut self, term: &str) {
        if !self.filters.set_search(term) {
            trace!("Search term unchanged; keeping derived order");
            return;
        }
        self.derive();
        self.go_to_first_page();
    }

    /// Current search term.
    #[must_use]
    pub fn search_term(&self) -> &str {
        self.filters.search()
    }

    /// Sets or, with an empty value, removes a column filter.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::UnknownColumn`] if no column has `key`.
    pub fn set_column_filter(&mut self, key: &str, value: &str) -> Result<()> {
        self.require_column(key)?;
        if self.filters.set_column(key, value) {
            self.derive();
            self.go_to_first_page();
        } else {
            trace!(column = key, "Column filter unchanged; keeping derived order");
        }
        Ok(())
    }

    /// Removes every column filter.
    pub fn clear_column_filters(&mut self) {
        if self.filters.clear_columns() {
            self.derive();
            self.go_to_first_page();
        }
    }

    /// Active search and filters.
    #[must_use]
    pub const fn filters(&self) -> &Filters {
        &self.filters
    }

    // ---------------------------------------------------------------------
    // Sort
    // ---------------------------------------------------------------------

    /// Header click on `key`: cycles `asc → desc → unsorted` on the same
    /// column, and starts at `asc` on a different one. Returns the new state.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::UnknownColumn`] or [`GridError::NotSortable`];
    /// the sort state is left as it was.
    pub fn toggle_sort(&mut self, key: &str) -> Result<Option<&SortState>> {
        self.require_sortable(key)?;
        self.sort = next_sort(self.sort.as_ref(), key);
        self.derive();
        Ok(self.sort.as_ref())
    }

    /// Sets the sort directly, e.g. when restoring it from a URL.
    ///
    /// # Errors
    ///
    /// Same as [`toggle_sort`](Self::toggle_sort).
    pub fn set_sort(&mut self, sort: Option<SortState>) -> Result<()> {
        if let Some(state) = &sort {
            self.require_sortable(&state.key)?;
        }
        if self.sort == sort {
            trace!("Sort unchanged; keeping derived order");
            return Ok(());
        }
        self.sort = sort;
        self.derive();
        Ok(())
    }

    /// Active sort.
    #[must_use]
    pub const fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    // ---------------------------------------------------------------------
    // Selection
    // ---------------------------------------------------------------------

    /// Checks or unchecks one row. Ids outside the filtered view are ignored.
    /// Returns whether the selection changed.
    pub fn select_row(&mut self, id: &RowId, checked: bool) -> bool {
        if !self.order.iter().any(|&i| &self.ids[i] == id) {
            debug!(row = %id, "Ignoring selection of a row outside the filtered view");
            return false;
        }
        self.selection.set(id.clone(), checked)
    }

    /// Selects every row of the filtered view (all pages), or clears.
    pub fn select_all(&mut self, checked: bool) {
        if checked {
            let ids = self.order.iter().map(|&i| self.ids[i].clone());
            self.selection.replace(ids);
        } else {
            self.selection.clear();
        }
    }

    /// Selected ids.
    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Selected rows in display order.
    #[must_use]
    pub fn selected_rows(&self) -> Vec<&R> {
        self.order
            .iter()
            .filter(|&&i| self.selection.contains(&self.ids[i]))
            .map(|&i| &self.rows[i])
            .collect()
    }

    /// Header checkbox state.
    ///
    /// Counts selected rows rather than selected ids: rows without an id
    /// that serialize identically share one.
    #[must_use]
    pub fn check_state(&self) -> CheckState {
        CheckState::derive(self.selected_in_view(), self.order.len())
    }

    /// Number of rows in the filtered view whose id is selected.
    fn selected_in_view(&self) -> usize {
        self.order
            .iter()
            .filter(|&&i| self.selection.contains(&self.ids[i]))
            .count()
    }

    // ---------------------------------------------------------------------
    // Pagination
    // ---------------------------------------------------------------------

    /// Moves to `page` (clamped) and notifies `on_page_change` when it moved.
    /// Returns the page now shown.
    pub fn set_page(&mut self, page: usize) -> usize {
        if self.pagination.set_page(page) {
            let page = self.pagination.page();
            debug!(page, server = self.pagination.is_server(), "Page changed");
            if let Some(callback) = &self.callbacks.on_page_change {
                callback(page);
            }
        }
        self.pagination.page()
    }

    /// Advances one page.
    pub fn next_page(&mut self) -> usize {
        self.set_page(self.pagination.page() + 1)
    }

    /// Goes back one page.
    pub fn prev_page(&mut self) -> usize {
        self.set_page(self.pagination.page().saturating_sub(1))
    }

    /// Changes the page size, returns to page 1 and notifies
    /// `on_page_size_change`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidPageSize`] outside `1..=100`.
    pub fn set_page_size(&mut self, size: usize) -> Result<()> {
        self.pagination.set_page_size(size)?;
        if let Some(callback) = &self.callbacks.on_page_size_change {
            callback(size);
        }
        Ok(())
    }

    /// Updates the server-reported total (server mode).
    pub fn set_server_total(&mut self, total: usize) {
        self.pagination.set_server_total(total);
    }

    /// Page state.
    #[must_use]
    pub const fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    // ---------------------------------------------------------------------
    // Status, callbacks and actions
    // ---------------------------------------------------------------------

    /// Sets the loading flag.
    pub fn set_loading(&mut self, loading: bool) {
        self.status.loading = loading;
    }

    /// Sets or clears the error message.
    pub fn set_error(&mut self, error: Option<String>) {
        self.status.error = error;
    }

    /// Loading and error flags.
    #[must_use]
    pub const fn status(&self) -> &Status {
        &self.status
    }

    /// Row click at `index` on the current page. Returns whether a row was
    /// there.
    pub fn click_row(&self, index: usize) -> bool {
        let (start, end) = self.page_bounds();
        let Some(&row_index) = self.order[start..end].get(index) else {
            return false;
        };
        if let Some(callback) = &self.callbacks.on_row_click {
            callback(&self.rows[row_index], index);
        }
        true
    }

    /// Asks the host for fresh data.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Busy`] while loading.
    pub fn refresh(&self) -> Result<()> {
        if self.status.loading {
            return Err(GridError::Busy);
        }
        if let Some(callback) = &self.callbacks.on_refresh {
            callback();
        }
        Ok(())
    }

    /// Hands every filtered and sorted row to `on_export` and returns them.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Busy`] while loading.
    pub fn export(&self) -> Result<Vec<&R>> {
        if self.status.loading {
            return Err(GridError::Busy);
        }
        let rows = self.filtered_rows();
        if let Some(callback) = &self.callbacks.on_export {
            callback(&rows);
        }
        Ok(rows)
    }

    /// Registered bulk actions.
    #[must_use]
    pub fn bulk_actions(&self) -> &[BulkAction<R>] {
        &self.actions
    }

    /// Runs the bulk action labelled `label` over the selected rows.
    /// Returns how many rows it received.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::UnknownAction`], [`GridError::EmptySelection`] or
    /// [`GridError::ActionDisabled`]; the action is not invoked in those cases.
    pub fn run_bulk_action(&self, label: &str) -> Result<usize> {
        let action = self
            .actions
            .iter()
            .find(|a| a.label() == label)
            .ok_or_else(|| GridError::UnknownAction(label.to_string()))?;
        let rows = self.selected_rows();
        if rows.is_empty() {
            return Err(GridError::EmptySelection(label.to_string()));
        }
        if action.is_disabled(&rows) {
            return Err(GridError::ActionDisabled(label.to_string()));
        }
        debug!(action = label, rows = rows.len(), "Running bulk action");
        action.invoke(&rows);
        Ok(rows.len())
    }

    // ---------------------------------------------------------------------
    // Derived view
    // ---------------------------------------------------------------------

    /// Every row that passes search and filters, in display order.
    #[must_use]
    pub fn filtered_rows(&self) -> Vec<&R> {
        self.order.iter().map(|&i| &self.rows[i]).collect()
    }

    /// Rows of the current page.
    #[must_use]
    pub fn page_rows(&self) -> Vec<&R> {
        let (start, end) = self.page_bounds();
        self.order[start..end].iter().map(|&i| &self.rows[i]).collect()
    }

    /// Projection of the current state.
    #[must_use]
    pub fn view(&self) -> GridView<'_, R> {
        let (start, end) = self.page_bounds();
        let page = &self.order[start..end];
        GridView::new(
            &self.columns,
            page.iter().map(|&i| &self.rows[i]).collect(),
            page.iter().map(|&i| &self.ids[i]).collect(),
            self.order.len(),
            self.selected_in_view(),
            &self.selection,
            self.pagination,
            self.sort.as_ref(),
            &self.status,
        )
    }

    /// Index bounds of the current page within `order`. In server mode the
    /// rows held already are the page.
    fn page_bounds(&self) -> (usize, usize) {
        if self.pagination.is_server() {
            return (0, self.order.len());
        }
        self.pagination.slice_bounds()
    }

    fn go_to_first_page(&mut self) {
        self.set_page(1);
    }

    fn require_column(&self, key: &str) -> Result<&Column<R>> {
        self.column(key)
            .ok_or_else(|| GridError::UnknownColumn(key.to_string()))
    }

    fn require_sortable(&self, key: &str) -> Result<()> {
        if self.require_column(key)?.is_sortable() {
            Ok(())
        } else {
            Err(GridError::NotSortable(key.to_string()))
        }
    }

    /// Recomputes the filtered and sorted order, prunes selections that left
    /// the view and re-clamps the page.
    fn derive(&mut self) {
        let mut order: Vec<usize> = (0..self.rows.len())
            .filter(|&i| self.filters.matches(&self.rows[i], &self.columns))
            .collect();

        if let Some(state) = &self.sort {
            if let Some(column) = self.columns.iter().find(|c| c.key() == state.key) {
                sort_indices(&mut order, &self.rows, column, state.direction);
            }
        }

        let visible: HashSet<&RowId> = order.iter().map(|&i| &self.ids[i]).collect();
        let pruned = self.selection.retain(|id| visible.contains(id));

        self.pagination.set_total(order.len());
        debug!(
            rows = self.rows.len(),
            filtered = order.len(),
            pruned,
            sort = ?self.sort,
            "Re-derived grid view"
        );
        self.order = order;
    }
}

impl<R> fmt::Debug for DataGrid<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataGrid")
            .field("columns", &self.columns)
            .field("rows", &self.rows.len())
            .field("filtered", &self.order.len())
            .field("filters", &self.filters)
            .field("sort", &self.sort)
            .field("selected", &self.selection.len())
            .field("pagination", &self.pagination)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};

    fn columns() -> Vec<Column<Value>> {
        vec![
            Column::new("id", "ID").sortable(),
            Column::new("name", "Name").sortable(),
            Column::new("status", "Status"),
        ]
    }

    fn rows(n: usize) -> Vec<Value> {
        (1..=n)
            .map(|i| {
                json!({
                    "id": i,
                    "name": format!("Customer {i:02}"),
                    "status": if i % 3 == 0 { "Cancelled" } else { "Delivered" },
                })
            })
            .collect()
    }

    fn page_ids(grid: &DataGrid<Value>) -> Vec<i64> {
        grid.view()
            .rows
            .iter()
            .map(|r| r["id"].as_i64().unwrap())
            .collect()
    }

    #[test]
    fn test_empty_grid() {
        let grid = DataGrid::new(columns());
        let view = grid.view();
        assert!(view.is_empty());
        assert_eq!(view.total_filtered, 0);
        assert_eq!(view.check_state, CheckState::Unchecked);
        assert_eq!(view.pagination.page_count(), 1);
    }

    #[test]
    fn test_search_resets_page() {
        let mut grid = DataGrid::new(columns()).page_size(10).rows(rows(30));
        grid.set_page(3);
        grid.set_search_term("cancel");
        assert_eq!(grid.pagination().page(), 1);
        assert_eq!(grid.view().total_filtered, 10);
    }

    #[test]
    fn test_unknown_filter_column() {
        let mut grid = DataGrid::new(columns()).rows(rows(3));
        assert_eq!(
            grid.set_column_filter("chef", "x"),
            Err(GridError::UnknownColumn("chef".into()))
        );
    }

    #[test]
    fn test_toggle_sort_errors_leave_state() {
        let mut grid = DataGrid::new(columns()).rows(rows(3));
        grid.toggle_sort("name").unwrap();
        assert_eq!(
            grid.toggle_sort("status").unwrap_err(),
            GridError::NotSortable("status".into())
        );
        assert_eq!(
            grid.toggle_sort("nope").unwrap_err(),
            GridError::UnknownColumn("nope".into())
        );
        assert_eq!(grid.sort(), Some(&SortState::asc("name")));
    }

    #[test]
    fn test_sort_cycle_restores_order() {
        let mut grid = DataGrid::new(columns()).rows(rows(5));
        let original = page_ids(&grid);
        grid.toggle_sort("id").unwrap();
        assert_eq!(page_ids(&grid), vec![1, 2, 3, 4, 5]);
        grid.toggle_sort("id").unwrap();
        assert_eq!(page_ids(&grid), vec![5, 4, 3, 2, 1]);
        assert_eq!(grid.toggle_sort("id").unwrap(), None);
        assert_eq!(page_ids(&grid), original);
    }

    #[test]
    fn test_selection_pruned_by_filter() {
        let mut grid = DataGrid::new(columns()).rows(rows(6));
        grid.select_all(true);
        assert_eq!(grid.check_state(), CheckState::Checked);
        grid.set_search_term("cancel");
        assert_eq!(grid.selection().len(), 2);
        assert_eq!(grid.check_state(), CheckState::Checked);
        grid.set_search_term("");
        assert_eq!(grid.check_state(), CheckState::Indeterminate);
    }

    #[test]
    fn test_select_row_outside_view_is_ignored() {
        let mut grid = DataGrid::new(columns()).rows(rows(6));
        grid.set_search_term("cancel");
        assert!(!grid.select_row(&RowId::from("1"), true));
        assert!(grid.select_row(&RowId::from("3"), true));
        assert_eq!(grid.selected_rows().len(), 1);
    }

    #[test]
    fn test_page_change_callback() {
        let pages = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&pages);
        let mut grid = DataGrid::new(columns())
            .page_size(10)
            .rows(rows(25))
            .callbacks(GridCallbacks::new().on_page_change(move |p| {
                seen.lock().unwrap().push(p);
            }));
        grid.set_page(2);
        grid.set_page(2);
        grid.set_page(9);
        assert_eq!(*pages.lock().unwrap(), vec![2, 3]);
    }

    #[test]
    fn test_busy_blocks_refresh_and_export() {
        let mut grid = DataGrid::new(columns()).rows(rows(2));
        grid.set_loading(true);
        assert_eq!(grid.refresh(), Err(GridError::Busy));
        assert_eq!(grid.export().unwrap_err(), GridError::Busy);
        grid.set_loading(false);
        grid.set_error(Some("timeout".into()));
        assert!(grid.status().retry_available());
        assert!(grid.refresh().is_ok());
    }

    #[test]
    fn test_server_mode_shows_all_held_rows() {
        let mut grid = DataGrid::new(columns())
            .page_size(10)
            .server_side(95)
            .rows(rows(10));
        assert_eq!(grid.view().rows.len(), 10);
        assert_eq!(grid.pagination().page_count(), 10);
        assert_eq!(grid.set_page(4), 4);
        assert_eq!(grid.view().rows.len(), 10);
    }

    #[test]
    fn test_click_row_uses_page_index() {
        let clicked = Arc::new(Mutex::new(None));
        let seen = Arc::clone(&clicked);
        let mut grid = DataGrid::new(columns())
            .page_size(10)
            .rows(rows(15))
            .callbacks(GridCallbacks::new().on_row_click(move |row: &Value, i| {
                *seen.lock().unwrap() = Some((row["id"].as_i64().unwrap(), i));
            }));
        grid.set_page(2);
        assert!(grid.click_row(1));
        assert_eq!(*clicked.lock().unwrap(), Some((12, 1)));
        assert!(!grid.click_row(5));
    }
}
