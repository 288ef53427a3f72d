//! Free-text search and per-column filters.
//!
//! Both use the same rule: case-insensitive substring matching against the
//! stringified cell value. A row passes when it satisfies every active column
//! filter and, if a search term is set, at least one column contains it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::column::Column;
use crate::record::Record;

/// What the free-text search is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchScope {
    /// Each column's stringified value (default).
    #[default]
    Columns,
    /// The row's whole serialized content, keys included.
    Content,
}

/// One selectable value of a [`FilterOption`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterChoice {
    /// Value passed to [`DataGrid::set_column_filter`](crate::DataGrid::set_column_filter).
    pub value: String,
    /// Human-readable label.
    pub label: String,
}

impl FilterChoice {
    /// Creates a choice.
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Describes a filter picker the host may render for a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    /// Column key the filter applies to.
    pub key: String,
    /// Picker label.
    pub label: String,
    /// Offered values.
    pub choices: Vec<FilterChoice>,
}

impl FilterOption {
    /// Creates a filter option with no choices.
    #[must_use]
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            choices: Vec::new(),
        }
    }

    /// Adds a choice (builder pattern).
    #[must_use]
    pub fn choice(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.choices.push(FilterChoice::new(value, label));
        self
    }
}

/// Active search term and column filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    search: String,
    search_lower: String,
    scope: SearchScope,
    columns: BTreeMap<String, String>,
}

impl Filters {
    /// Creates an empty filter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search scope (builder pattern).
    #[must_use]
    pub const fn scope(mut self, scope: SearchScope) -> Self {
        self.scope = scope;
        self
    }

    /// Returns the search scope.
    #[must_use]
    pub const fn get_scope(&self) -> SearchScope {
        self.scope
    }

    /// Sets the search term. Returns whether anything changed.
    ///
    /// Surrounding whitespace is ignored; a blank term disables the search.
    pub fn set_search(&mut self, term: &str) -> bool {
        let term = term.trim();
        if term == self.search {
            return false;
        }
        self.search = term.to_string();
        self.search_lower = term.to_lowercase();
        true
    }

    /// Returns the active search term (trimmed, original case).
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Sets or clears (with an empty value) a column filter.
    /// Returns whether anything changed.
    pub fn set_column(&mut self, key: &str, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() {
            return self.columns.remove(key).is_some();
        }
        let lowered = value.to_lowercase();
        if self.columns.get(key) == Some(&lowered) {
            return false;
        }
        self.columns.insert(key.to_string(), lowered);
        true
    }

    /// Returns the active (lower-cased) filter value for a column.
    #[must_use]
    pub fn column(&self, key: &str) -> Option<&str> {
        self.columns.get(key).map(String::as_str)
    }

    /// Iterates over active column filters.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Removes every column filter. Returns whether anything changed.
    pub fn clear_columns(&mut self) -> bool {
        let changed = !self.columns.is_empty();
        self.columns.clear();
        changed
    }

    /// Returns whether any search or column filter is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || !self.columns.is_empty()
    }

    /// Tests a row against every active filter.
    pub fn matches<R: Record>(&self, row: &R, columns: &[Column<R>]) -> bool {
        for (key, needle) in &self.columns {
            let Some(column) = columns.iter().find(|c| c.key() == key) else {
                return false;
            };
            let haystack = column
                .value(row)
                .map(|v| v.search_text())
                .unwrap_or_default();
            if !haystack.contains(needle.as_str()) {
                return false;
            }
        }

        if self.search_lower.is_empty() {
            return true;
        }

        match self.scope {
            SearchScope::Columns => columns.iter().any(|column| {
                column
                    .value(row)
                    .is_some_and(|v| v.search_text().contains(&self.search_lower))
            }),
            SearchScope::Content => serde_json::to_string(row)
                .is_ok_and(|content| content.to_lowercase().contains(&self.search_lower)),
        }
    }
}
