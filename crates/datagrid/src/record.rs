//! Row identity and dynamic field access.
//!
//! The grid is generic over its row type. A row implements [`Record`] to tell
//! the engine how to identify it and, optionally, how to look fields up by
//! key. Typed rows usually provide an id and leave field lookup to column
//! accessors; opaque JSON rows from a REST endpoint get both for free through
//! the `serde_json::Value` implementation.
//!
//! # Example
//!
//! ```rust
//! use datagrid::{Record, RowId};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Dish {
//!     id: u32,
//!     name: String,
//! }
//!
//! impl Record for Dish {
//!     fn id(&self) -> Option<String> {
//!         Some(self.id.to_string())
//!     }
//! }
//!
//! let dish = Dish { id: 7, name: "Hoppers".into() };
//! assert_eq!(dish.row_id(), RowId::from("7"));
//! ```

use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::value::CellValue;

/// Stable identifier of a row.
///
/// Rows that expose an id are keyed by it; rows that do not are keyed by
/// their serialized content, so two identical anonymous rows share an id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum RowId {
    /// Identifier provided by the row itself.
    Id(String),
    /// Serialized content of a row without an id.
    Content(String),
}

impl RowId {
    /// Creates an id-based row identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Creates a content-based identifier from a row's serialized form.
    pub fn from_content<T: Serialize + ?Sized>(row: &T) -> Self {
        match serde_json::to_string(row) {
            Ok(content) => Self::Content(content),
            Err(err) => {
                warn!(error = %err, "Row content could not be serialized for identity");
                Self::Content(String::new())
            }
        }
    }

    /// Returns the underlying string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Id(s) | Self::Content(s) => s,
        }
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for RowId {
    fn from(value: &str) -> Self {
        Self::Id(value.to_string())
    }
}

impl From<String> for RowId {
    fn from(value: String) -> Self {
        Self::Id(value)
    }
}

impl From<u64> for RowId {
    fn from(value: u64) -> Self {
        Self::Id(value.to_string())
    }
}

impl From<i64> for RowId {
    fn from(value: i64) -> Self {
        Self::Id(value.to_string())
    }
}

/// A row the grid can hold.
pub trait Record: Serialize {
    /// The row's own identifier, if it has one.
    fn id(&self) -> Option<String> {
        None
    }

    /// Looks a field up by column key.
    ///
    /// Used by columns created with [`Column::new`](crate::Column::new) that
    /// were not given an explicit accessor.
    fn field(&self, key: &str) -> Option<CellValue> {
        let _ = key;
        None
    }

    /// Stable identity: the id when present, else the serialized content.
    fn row_id(&self) -> RowId {
        self.id()
            .map_or_else(|| RowId::from_content(self), RowId::Id)
    }
}

impl Record for serde_json::Value {
    fn id(&self) -> Option<String> {
        match self.get("id")? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    fn field(&self, key: &str) -> Option<CellValue> {
        self.get(key).map(CellValue::from)
    }
}
