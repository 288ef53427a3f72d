#![forbid(unsafe_code)]
// Allow pedantic lints for early-stage API ergonomics.
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Datagrid
//!
//! A client-side tabular data engine for admin table views.
//!
//! A [`DataGrid`] holds a pre-fetched collection of rows and derives what a
//! table shows: free-text search and per-column filters, a single-key stable
//! sort, id-keyed selection with a tri-state header checkbox, and client- or
//! server-side pagination. It performs no I/O; the host reacts to the
//! callbacks it registers.
//!
//! The crate provides:
//! - **grid** - The engine and its operations
//! - **column** - Column descriptors tied to the row type by accessors
//! - **filter** - Search scope, column filters and filter pickers
//! - **sort** - Sort state and the stable sort
//! - **selection** - Id-keyed selection and [`CheckState`]
//! - **pagination** - Page state and page-size limits
//! - **render** - Per-cell rendering with panic containment
//! - **query** - List-endpoint query parameters
//! - **export** - CSV and JSON export
//! - **window** - Windowed rendering of long lists
//! - **format** - Money, counts and time formatting
//!
//! ## Example
//!
//! ```rust
//! use datagrid::prelude::*;
//! use serde_json::json;
//!
//! let rows = (1..=23).map(|i| json!({"id": i, "name": format!("Order {i}")})).collect();
//! let mut grid = DataGrid::new(vec![
//!     Column::new("id", "ID").sortable(),
//!     Column::new("name", "Name"),
//! ])
//! .page_size(10)
//! .rows(rows);
//!
//! assert_eq!(grid.view().pagination.page_count(), 3);
//! grid.set_page(3);
//! assert_eq!(grid.view().rows.len(), 3);
//!
//! grid.select_all(true);
//! assert_eq!(grid.check_state(), CheckState::Checked);
//! ```

pub mod actions;
pub mod column;
pub mod error;
pub mod export;
pub mod filter;
pub mod format;
pub mod grid;
pub mod pagination;
pub mod query;
pub mod record;
pub mod render;
pub mod selection;
pub mod sort;
pub mod value;
pub mod view;
pub mod window;

pub use actions::{ActionVariant, BulkAction, GridCallbacks, Status};
pub use column::{Align, Column};
pub use error::{GridError, Result};
pub use export::{ExportError, ExportFormat};
pub use filter::{FilterChoice, FilterOption, Filters, SearchScope};
pub use grid::DataGrid;
pub use pagination::{
    DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PAGE_SIZE_CHOICES, Pagination, PaginationMode,
};
pub use query::{ListQuery, PageInfo, QueryError, QuerySchema};
pub use record::{Record, RowId};
pub use render::{MISSING_PLACEHOLDER, RENDER_ERROR_MARKER, RenderedCell};
pub use selection::{CheckState, Selection};
pub use sort::{SortDirection, SortState};
pub use value::CellValue;
pub use view::GridView;
pub use window::VirtualWindow;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::actions::{ActionVariant, BulkAction, GridCallbacks};
    pub use crate::column::{Align, Column};
    pub use crate::error::GridError;
    pub use crate::filter::{FilterOption, SearchScope};
    pub use crate::grid::DataGrid;
    pub use crate::record::{Record, RowId};
    pub use crate::selection::CheckState;
    pub use crate::sort::{SortDirection, SortState};
    pub use crate::value::CellValue;
}
