//! Per-cell rendering with fault containment.
//!
//! A column's custom renderer runs inside [`catch_unwind`], so one bad cell
//! shows [`RENDER_ERROR_MARKER`] instead of taking the whole table down.

use std::panic::{AssertUnwindSafe, catch_unwind};

use serde::Serialize;
use tracing::warn;

use crate::column::Column;

/// Shown for a cell whose row has no value for the column.
pub const MISSING_PLACEHOLDER: &str = "—";

/// Shown for a cell whose renderer panicked.
pub const RENDER_ERROR_MARKER: &str = "⚠ render error";

/// Outcome of rendering one cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum RenderedCell {
    /// Rendered text.
    Text(String),
    /// The row has no value for the column.
    Missing,
    /// The renderer panicked.
    Error,
}

impl RenderedCell {
    /// Text to display.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Missing => MISSING_PLACEHOLDER,
            Self::Error => RENDER_ERROR_MARKER,
        }
    }

    /// Returns whether the renderer failed.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }
}

/// Renders one cell of `row` for `column`; `index` is the row's position on
/// the current page.
pub fn render_cell<R>(column: &Column<R>, row: &R, index: usize) -> RenderedCell {
    let Some(value) = column.value(row) else {
        return RenderedCell::Missing;
    };

    let Some(renderer) = column.renderer() else {
        return if value.is_null() {
            RenderedCell::Missing
        } else {
            RenderedCell::Text(value.to_string())
        };
    };

    match catch_unwind(AssertUnwindSafe(|| renderer(&value, row, index))) {
        Ok(text) => RenderedCell::Text(text),
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(ToString::to_string)
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "non-string panic payload".to_string());
            warn!(
                column = column.key(),
                index,
                panic = %message,
                "Cell renderer panicked"
            );
            RenderedCell::Error
        }
    }
}

/// Renders every column of one row.
pub fn render_row<R>(columns: &[Column<R>], row: &R, index: usize) -> Vec<RenderedCell> {
    columns
        .iter()
        .map(|column| render_cell(column, row, index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn test_default_rendering_uses_display() {
        let column: Column<Value> = Column::new("qty", "Qty");
        assert_eq!(
            render_cell(&column, &json!({"qty": 3}), 0),
            RenderedCell::Text("3".into())
        );
    }

    #[test]
    fn test_missing_and_null_show_placeholder() {
        let column: Column<Value> = Column::new("chef", "Chef");
        assert_eq!(render_cell(&column, &json!({}), 0).text(), MISSING_PLACEHOLDER);
        assert_eq!(
            render_cell(&column, &json!({"chef": null}), 0).text(),
            MISSING_PLACEHOLDER
        );
    }

    #[test]
    fn test_custom_renderer_receives_index() {
        let column: Column<Value> =
            Column::new("name", "Name").render(|v, _, i| format!("{i}:{v}"));
        assert_eq!(
            render_cell(&column, &json!({"name": "Ann"}), 4).text(),
            "4:Ann"
        );
    }

    #[test]
    fn test_panicking_renderer_is_contained() {
        let columns: Vec<Column<Value>> = vec![
            Column::new("id", "ID"),
            Column::new("total", "Total").render(|_, _, _| panic!("bad format")),
        ];
        let cells = render_row(&columns, &json!({"id": 1, "total": 5}), 0);
        assert_eq!(cells[0].text(), "1");
        assert!(cells[1].is_error());
        assert_eq!(cells[1].text(), RENDER_ERROR_MARKER);
    }

    #[test]
    fn test_renderer_not_called_for_missing_value() {
        let column: Column<Value> =
            Column::new("total", "Total").render(|_, _, _| panic!("should not run"));
        assert_eq!(render_cell(&column, &json!({}), 0), RenderedCell::Missing);
    }
}
