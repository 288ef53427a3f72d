//! Single-key sort state and the stable sort over a filtered sequence.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::column::Column;
use crate::value::CellValue;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortDirection {
    /// Returns the opposite direction.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Value for an `aria-sort` style attribute.
    #[must_use]
    pub const fn aria(self) -> &'static str {
        match self {
            Self::Asc => "ascending",
            Self::Desc => "descending",
        }
    }

    /// Header indicator glyph.
    #[must_use]
    pub const fn indicator(self) -> &'static str {
        match self {
            Self::Asc => "▲",
            Self::Desc => "▼",
        }
    }

    /// Parses `asc` / `desc` (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(Self::Asc),
            "desc" | "descending" => Some(Self::Desc),
            _ => None,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        })
    }
}

/// The active sort: one column and a direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortState {
    /// Column key.
    pub key: String,
    /// Direction.
    pub direction: SortDirection,
}

impl SortState {
    /// Creates an ascending sort on `key`.
    #[must_use]
    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Asc,
        }
    }

    /// Creates a descending sort on `key`.
    #[must_use]
    pub fn desc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Next sort state after a header click on `key`.
///
/// The same column cycles `asc → desc → unsorted`; any other column starts
/// over at `asc`.
#[must_use]
pub fn next_sort(current: Option<&SortState>, key: &str) -> Option<SortState> {
    match current {
        Some(state) if state.key == key => match state.direction {
            SortDirection::Asc => Some(SortState::desc(key)),
            SortDirection::Desc => None,
        },
        _ => Some(SortState::asc(key)),
    }
}

/// Sorts `order` (indices into `rows`) by a column, in place and stably.
///
/// Keys are read once per row before sorting. Rows without a value sort as
/// [`CellValue::Null`].
pub fn sort_indices<R>(order: &mut [usize], rows: &[R], column: &Column<R>, direction: SortDirection) {
    let mut keyed: Vec<(CellValue, usize)> = order
        .iter()
        .map(|&i| (column.value(&rows[i]).unwrap_or_default(), i))
        .collect();

    match direction {
        SortDirection::Asc => keyed.sort_by(|a, b| a.0.cmp(&b.0)),
        SortDirection::Desc => keyed.sort_by(|a, b| compare_desc(&a.0, &b.0)),
    }

    for (slot, (_, index)) in order.iter_mut().zip(keyed) {
        *slot = index;
    }
}

fn compare_desc(a: &CellValue, b: &CellValue) -> Ordering {
    b.cmp(a)
}
