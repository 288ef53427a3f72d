//! Error types for grid operations.

use thiserror::Error;

/// Errors returned by [`DataGrid`](crate::DataGrid) operations.
///
/// None of these are fatal: every error leaves the grid in the state it was in
/// before the call, so the host can surface the message and keep going.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// The column key is not part of the grid's column set.
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    /// The column exists but does not declare itself sortable.
    #[error("column is not sortable: {0}")]
    NotSortable(String),

    /// A page size outside the accepted range was requested.
    #[error("page size {size} is outside 1..={max}")]
    InvalidPageSize {
        /// Requested size.
        size: usize,
        /// Largest accepted size.
        max: usize,
    },

    /// No bulk action is registered under the label.
    #[error("unknown bulk action: {0}")]
    UnknownAction(String),

    /// The bulk action reported itself disabled for the selected rows.
    #[error("bulk action '{0}' is disabled for the current selection")]
    ActionDisabled(String),

    /// The bulk action was invoked with nothing selected.
    #[error("bulk action '{0}' needs at least one selected row")]
    EmptySelection(String),

    /// The host flagged the grid as loading; refresh and export are blocked.
    #[error("grid is loading")]
    Busy,
}

/// Result type alias for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;
