//! Column descriptors.
//!
//! A [`Column`] names a key, a header title and how to read the cell value out
//! of a row. Columns are tied to the row type through an accessor closure, so
//! a typo in a field name is a compile error rather than a silently empty
//! column. Rows that only support dynamic lookup can use [`Column::new`],
//! which reads the value through [`Record::field`].
//!
//! # Example
//!
//! ```rust
//! use datagrid::{Align, CellValue, Column, Record};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Order {
//!     number: String,
//!     total: f64,
//! }
//!
//! impl Record for Order {}
//!
//! let total = Column::with_accessor("total", "Total", |o: &Order| Some(o.total.into()))
//!     .sortable()
//!     .align(Align::Right)
//!     .render(|value, _row, _index| format!("LKR {value}"));
//!
//! let order = Order { number: "ORD-1".into(), total: 1200.0 };
//! assert_eq!(total.value(&order), Some(CellValue::from(1200.0)));
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::value::CellValue;

/// Reads a cell value out of a row.
pub type Accessor<R> = Arc<dyn Fn(&R) -> Option<CellValue> + Send + Sync>;

/// Custom cell renderer: `(value, row, index on page) -> text`.
pub type CellRenderer<R> = Arc<dyn Fn(&CellValue, &R, usize) -> String + Send + Sync>;

/// Horizontal alignment hint for the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// Left aligned (default).
    #[default]
    Left,
    /// Centered.
    Center,
    /// Right aligned, typical for numbers and money.
    Right,
}

/// A single column definition.
pub struct Column<R> {
    key: String,
    title: String,
    sortable: bool,
    width: Option<usize>,
    align: Align,
    accessor: Accessor<R>,
    render: Option<CellRenderer<R>>,
}

impl<R: Record + 'static> Column<R> {
    /// Creates a column that reads its value with [`Record::field`].
    #[must_use]
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        let key = key.into();
        let lookup = key.clone();
        Self::with_accessor(key, title, move |row: &R| row.field(&lookup))
    }
}

impl<R> Column<R> {
    /// Creates a column with an explicit accessor.
    #[must_use]
    pub fn with_accessor<F>(key: impl Into<String>, title: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&R) -> Option<CellValue> + Send + Sync + 'static,
    {
        Self {
            key: key.into(),
            title: title.into(),
            sortable: false,
            width: None,
            align: Align::Left,
            accessor: Arc::new(accessor),
            render: None,
        }
    }

    /// Marks the column as sortable (builder pattern).
    #[must_use]
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Sets a preferred width in characters (builder pattern).
    #[must_use]
    pub fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Sets the alignment hint (builder pattern).
    #[must_use]
    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Sets a custom cell renderer (builder pattern).
    #[must_use]
    pub fn render<F>(mut self, render: F) -> Self
    where
        F: Fn(&CellValue, &R, usize) -> String + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }

    /// Returns the column key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the header title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns whether the column may be sorted.
    #[must_use]
    pub const fn is_sortable(&self) -> bool {
        self.sortable
    }

    /// Returns the preferred width, if any.
    #[must_use]
    pub const fn get_width(&self) -> Option<usize> {
        self.width
    }

    /// Returns the alignment hint.
    #[must_use]
    pub const fn get_align(&self) -> Align {
        self.align
    }

    /// Returns whether a custom renderer is attached.
    #[must_use]
    pub const fn has_renderer(&self) -> bool {
        self.render.is_some()
    }

    /// Reads the raw value of this column from a row.
    pub fn value(&self, row: &R) -> Option<CellValue> {
        (self.accessor)(row)
    }

    pub(crate) const fn renderer(&self) -> Option<&CellRenderer<R>> {
        self.render.as_ref()
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            title: self.title.clone(),
            sortable: self.sortable,
            width: self.width,
            align: self.align,
            accessor: Arc::clone(&self.accessor),
            render: self.render.clone(),
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("sortable", &self.sortable)
            .field("width", &self.width)
            .field("align", &self.align)
            .field("has_renderer", &self.render.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_column_defaults() {
        let col: Column<serde_json::Value> = Column::new("name", "Name");
        assert_eq!(col.key(), "name");
        assert_eq!(col.title(), "Name");
        assert!(!col.is_sortable());
        assert_eq!(col.get_width(), None);
        assert_eq!(col.get_align(), Align::Left);
        assert!(!col.has_renderer());
    }

    #[test]
    fn test_column_builder() {
        let col: Column<serde_json::Value> = Column::new("total", "Total")
            .sortable()
            .width(12)
            .align(Align::Right)
            .render(|v, _, _| format!("${v}"));
        assert!(col.is_sortable());
        assert_eq!(col.get_width(), Some(12));
        assert_eq!(col.get_align(), Align::Right);
        assert!(col.has_renderer());
    }

    #[test]
    fn test_dynamic_accessor() {
        let col: Column<serde_json::Value> = Column::new("name", "Name");
        assert_eq!(
            col.value(&json!({"name": "Rice & curry"})),
            Some(CellValue::from("Rice & curry"))
        );
        assert_eq!(col.value(&json!({"other": 1})), None);
    }

    #[test]
    fn test_typed_accessor() {
        let col = Column::with_accessor("len", "Length", |s: &String| Some(s.len().into()));
        assert_eq!(col.value(&"abcd".to_string()), Some(CellValue::Int(4)));
    }

    #[test]
    fn test_debug_hides_closures() {
        let col: Column<serde_json::Value> = Column::new("name", "Name");
        let debug = format!("{col:?}");
        assert!(debug.contains("name"));
        assert!(debug.contains("has_renderer: false"));
    }
}
