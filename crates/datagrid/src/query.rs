//! List-endpoint query parameters.
//!
//! Admin list endpoints take `page`, `limit`, `search`, `sort_by`,
//! `sort_order` and one parameter per filterable column. This module parses
//! them with the same validation those endpoints apply, applies the result to
//! a [`DataGrid`], and renders a grid's state back into a query string so a
//! view can be bookmarked or sent to a server in server-side mode.
//!
//! # Example
//!
//! ```rust
//! use datagrid::query::{ListQuery, QuerySchema};
//! use datagrid::SortDirection;
//!
//! let schema = QuerySchema::new("date_joined")
//!     .sort_fields(["date_joined", "name", "email"])
//!     .filter_keys(["role"]);
//!
//! let query = ListQuery::from_query_string("page=2&limit=50&sort_by=name&sort_order=ASC&role=cook", &schema).unwrap();
//! assert_eq!(query.page, 2);
//! assert_eq!(query.limit, 50);
//! assert_eq!(query.sort_by, "name");
//! // Only lower-case `asc` / `desc` are accepted; anything else falls back to `desc`.
//! assert_eq!(query.sort_order, SortDirection::Desc);
//! assert_eq!(query.filters.get("role").map(String::as_str), Some("cook"));
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

use crate::error::GridError;
use crate::grid::DataGrid;
use crate::pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Pagination};
use crate::record::Record;
use crate::sort::{SortDirection, SortState};

/// Errors raised while parsing query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// `page` or `limit` is not an integer.
    #[error("invalid {param} parameter: {value:?}")]
    InvalidNumber {
        /// Parameter name.
        param: &'static str,
        /// Raw value.
        value: String,
    },

    /// `page < 1`, or `limit` outside `1..=100`.
    #[error("invalid pagination parameters: page={page}, limit={limit}")]
    InvalidPagination {
        /// Requested page.
        page: i64,
        /// Requested limit.
        limit: i64,
    },

    /// A percent-encoded component is not valid UTF-8.
    #[error("malformed query component: {0}")]
    Malformed(String),
}

/// Which parameters a list endpoint accepts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuerySchema {
    default_sort: String,
    sort_fields: Vec<String>,
    filter_keys: Vec<String>,
}

impl QuerySchema {
    /// Creates a schema whose fallback sort field is `default_sort`.
    #[must_use]
    pub fn new(default_sort: impl Into<String>) -> Self {
        let default_sort = default_sort.into();
        Self {
            sort_fields: vec![default_sort.clone()],
            default_sort,
            filter_keys: Vec::new(),
        }
    }

    /// Derives a schema from a grid: sortable columns may be sorted on and
    /// every column may be filtered.
    #[must_use]
    pub fn for_grid<R: Record>(grid: &DataGrid<R>, default_sort: impl Into<String>) -> Self {
        Self::new(default_sort)
            .sort_fields(
                grid.columns()
                    .iter()
                    .filter(|c| c.is_sortable())
                    .map(|c| c.key().to_string()),
            )
            .filter_keys(grid.columns().iter().map(|c| c.key().to_string()))
    }

    /// Adds accepted `sort_by` values.
    #[must_use]
    pub fn sort_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for field in fields {
            let field = field.into();
            if !self.sort_fields.contains(&field) {
                self.sort_fields.push(field);
            }
        }
        self
    }

    /// Adds accepted column filter parameters.
    #[must_use]
    pub fn filter_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter_keys.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Fallback sort field.
    #[must_use]
    pub fn default_sort(&self) -> &str {
        &self.default_sort
    }
}

/// Parsed list query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    /// 1-based page.
    pub page: usize,
    /// Page size.
    pub limit: usize,
    /// Trimmed search term; empty means no search.
    pub search: String,
    /// Sort field.
    pub sort_by: String,
    /// Sort direction.
    pub sort_order: SortDirection,
    /// Column filters, trimmed, empty ones dropped.
    pub filters: BTreeMap<String, String>,
}

impl ListQuery {
    /// Parses decoded key/value pairs. Unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidNumber`] or
    /// [`QueryError::InvalidPagination`].
    pub fn parse<'a, I>(pairs: I, schema: &QuerySchema) -> Result<Self, QueryError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut page = "1";
        let mut limit = None;
        let mut search = "";
        let mut sort_by = None;
        let mut sort_order = None;
        let mut filters = BTreeMap::new();

        for (key, value) in pairs {
            match key {
                "page" => page = value,
                "limit" => limit = Some(value),
                "search" => search = value,
                "sort_by" => sort_by = Some(value.trim()),
                "sort_order" => sort_order = Some(value.trim()),
                other if schema.filter_keys.iter().any(|k| k == other) => {
                    let value = value.trim();
                    if !value.is_empty() {
                        filters.insert(other.to_string(), value.to_string());
                    }
                }
                other => trace!(param = other, "Ignoring unknown query parameter"),
            }
        }

        let page_num = parse_int("page", page)?;
        let limit_num = match limit {
            Some(raw) => parse_int("limit", raw)?,
            None => i64::try_from(DEFAULT_PAGE_SIZE).unwrap_or(25),
        };
        let max = i64::try_from(MAX_PAGE_SIZE).unwrap_or(100);
        if page_num < 1 || limit_num < 1 || limit_num > max {
            return Err(QueryError::InvalidPagination {
                page: page_num,
                limit: limit_num,
            });
        }

        let sort_by = sort_by
            .filter(|field| schema.sort_fields.iter().any(|f| f == field))
            .unwrap_or(&schema.default_sort)
            .to_string();
        let sort_order = match sort_order {
            Some("asc") => SortDirection::Asc,
            _ => SortDirection::Desc,
        };

        Ok(Self {
            page: usize::try_from(page_num).unwrap_or(1),
            limit: usize::try_from(limit_num).unwrap_or(DEFAULT_PAGE_SIZE),
            search: search.trim().to_string(),
            sort_by,
            sort_order,
            filters,
        })
    }

    /// Parses a raw, percent-encoded query string (with or without `?`).
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Malformed`] for invalid percent-encoding, or any
    /// error of [`parse`](Self::parse).
    pub fn from_query_string(query: &str, schema: &QuerySchema) -> Result<Self, QueryError> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut decoded = Vec::new();
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            decoded.push((decode(key)?, decode(value)?));
        }
        Self::parse(
            decoded.iter().map(|(k, v)| (k.as_str(), v.as_str())),
            schema,
        )
    }

    /// Captures a grid's search, filters, sort and page.
    #[must_use]
    pub fn from_grid<R: Record>(grid: &DataGrid<R>, schema: &QuerySchema) -> Self {
        let (sort_by, sort_order) = grid.sort().map_or_else(
            || (schema.default_sort.clone(), SortDirection::Desc),
            |state| (state.key.clone(), state.direction),
        );
        Self {
            page: grid.pagination().page(),
            limit: grid.pagination().get_page_size(),
            search: grid.search_term().to_string(),
            sort_by,
            sort_order,
            filters: grid
                .filters()
                .columns()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Renders the query back into a percent-encoded string. Empty search and
    /// filters are omitted.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        if !self.search.is_empty() {
            pairs.push(("search".to_string(), self.search.clone()));
        }
        pairs.push(("sort_by".to_string(), self.sort_by.clone()));
        pairs.push(("sort_order".to_string(), self.sort_order.to_string()));
        for (key, value) in &self.filters {
            pairs.push((key.clone(), value.clone()));
        }
        pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Applies the query to a grid: page size, search, filters, sort, then
    /// page (last, since the others return to page 1).
    ///
    /// The sort is only applied when `sort_by` names a sortable column of
    /// the grid; otherwise the grid is left unsorted.
    ///
    /// # Errors
    ///
    /// Returns a [`GridError`] when a filter names an unknown column.
    pub fn apply<R: Record>(&self, grid: &mut DataGrid<R>) -> Result<(), GridError> {
        grid.set_page_size(self.limit)?;
        grid.set_search_term(&self.search);
        grid.clear_column_filters();
        for (key, value) in &self.filters {
            grid.set_column_filter(key, value)?;
        }
        let sortable = grid
            .column(&self.sort_by)
            .is_some_and(crate::Column::is_sortable);
        let sort = sortable.then(|| SortState {
            key: self.sort_by.clone(),
            direction: self.sort_order,
        });
        grid.set_sort(sort)?;
        grid.set_page(self.page);
        Ok(())
    }
}

/// The `pagination` object of a list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// 1-based page.
    pub page: usize,
    /// Page size.
    pub limit: usize,
    /// Total rows across all pages.
    pub total: usize,
    /// Page count, `ceil(total / limit)`; zero when there are no rows.
    pub pages: usize,
}

impl PageInfo {
    /// Builds the envelope; `limit` is treated as at least 1.
    #[must_use]
    pub const fn new(page: usize, limit: usize, total: usize) -> Self {
        let limit = if limit == 0 { 1 } else { limit };
        Self {
            page,
            limit,
            total,
            pages: total.div_ceil(limit),
        }
    }

    /// Switches `pagination` to server mode using this envelope.
    pub fn apply_to(&self, pagination: &mut Pagination) {
        pagination.set_server_total(self.total);
        pagination.set_page(self.page);
    }
}

impl From<&Pagination> for PageInfo {
    fn from(pagination: &Pagination) -> Self {
        Self::new(
            pagination.page(),
            pagination.get_page_size(),
            pagination.total(),
        )
    }
}

fn parse_int(param: &'static str, raw: &str) -> Result<i64, QueryError> {
    raw.trim().parse().map_err(|_| QueryError::InvalidNumber {
        param,
        value: raw.to_string(),
    })
}

fn decode(component: &str) -> Result<String, QueryError> {
    let spaced = component.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(std::borrow::Cow::into_owned)
        .map_err(|_| QueryError::Malformed(component.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Column;
    use serde_json::{Value, json};

    fn schema() -> QuerySchema {
        QuerySchema::new("date_joined")
            .sort_fields(["name", "email", "last_login"])
            .filter_keys(["role", "status"])
    }

    #[test]
    fn test_defaults() {
        let q = ListQuery::parse(Vec::<(&str, &str)>::new(), &schema()).unwrap();
        assert_eq!(q.page, 1);
        assert_eq!(q.limit, 25);
        assert_eq!(q.search, "");
        assert_eq!(q.sort_by, "date_joined");
        assert_eq!(q.sort_order, SortDirection::Desc);
        assert!(q.filters.is_empty());
    }

    #[test]
    fn test_invalid_numbers() {
        assert_eq!(
            ListQuery::parse([("page", "two")], &schema()),
            Err(QueryError::InvalidNumber {
                param: "page",
                value: "two".into()
            })
        );
        assert!(matches!(
            ListQuery::parse([("limit", "")], &schema()),
            Err(QueryError::InvalidNumber { param: "limit", .. })
        ));
    }

    #[test]
    fn test_pagination_bounds() {
        for (page, limit) in [("0", "10"), ("1", "0"), ("1", "101"), ("-3", "10")] {
            assert!(
                matches!(
                    ListQuery::parse([("page", page), ("limit", limit)], &schema()),
                    Err(QueryError::InvalidPagination { .. })
                ),
                "page={page} limit={limit}"
            );
        }
        assert_eq!(
            ListQuery::parse([("limit", "100")], &schema()).unwrap().limit,
            100
        );
    }

    #[test]
    fn test_sort_fallbacks() {
        let q = ListQuery::parse([("sort_by", "password"), ("sort_order", "up")], &schema())
            .unwrap();
        assert_eq!(q.sort_by, "date_joined");
        assert_eq!(q.sort_order, SortDirection::Desc);

        let q = ListQuery::parse([("sort_by", " email "), ("sort_order", "asc")], &schema())
            .unwrap();
        assert_eq!(q.sort_by, "email");
        assert_eq!(q.sort_order, SortDirection::Asc);
    }

    #[test]
    fn test_filters_and_search_trimmed() {
        let q = ListQuery::parse(
            [
                ("search", "  kamal "),
                ("role", " cook "),
                ("status", ""),
                ("unknown", "x"),
            ],
            &schema(),
        )
        .unwrap();
        assert_eq!(q.search, "kamal");
        assert_eq!(q.filters.len(), 1);
        assert_eq!(q.filters["role"], "cook");
    }

    #[test]
    fn test_query_string_decoding() {
        let q = ListQuery::from_query_string("?search=rice+%26+curry&page=3", &schema()).unwrap();
        assert_eq!(q.search, "rice & curry");
        assert_eq!(q.page, 3);
        assert!(matches!(
            ListQuery::from_query_string("search=%FF", &schema()),
            Err(QueryError::Malformed(_))
        ));
    }

    #[test]
    fn test_query_string_rendering() {
        let q = ListQuery::parse(
            [("search", "rice & curry"), ("role", "cook"), ("sort_by", "name")],
            &schema(),
        )
        .unwrap();
        let rendered = q.to_query_string();
        assert_eq!(
            rendered,
            "page=1&limit=25&search=rice%20%26%20curry&sort_by=name&sort_order=desc&role=cook"
        );
        assert_eq!(ListQuery::from_query_string(&rendered, &schema()).unwrap(), q);
    }

    #[test]
    fn test_apply_to_grid() {
        let rows: Vec<Value> = (1..=30)
            .map(|i| json!({"id": i, "name": format!("User {i:02}"), "role": if i % 2 == 0 { "cook" } else { "customer" }}))
            .collect();
        let mut grid = DataGrid::new(vec![
            Column::new("id", "ID"),
            Column::new("name", "Name").sortable(),
            Column::new("role", "Role"),
        ])
        .rows(rows);
        let schema = QuerySchema::for_grid(&grid, "name");
        let q = ListQuery::from_query_string(
            "page=2&limit=10&role=cook&sort_by=name&sort_order=asc",
            &schema,
        )
        .unwrap();
        q.apply(&mut grid).unwrap();

        assert_eq!(grid.pagination().page(), 2);
        assert_eq!(grid.view().total_filtered, 15);
        assert_eq!(grid.sort(), Some(&SortState::asc("name")));
        assert_eq!(grid.view().rows[0]["id"], json!(22));

        let round_trip = ListQuery::from_grid(&grid, &schema);
        assert_eq!(round_trip, q);
    }

    #[test]
    fn test_page_info() {
        assert_eq!(PageInfo::new(1, 10, 23).pages, 3);
        assert_eq!(PageInfo::new(1, 10, 0).pages, 0);
        assert_eq!(PageInfo::new(1, 0, 5).limit, 1);

        let mut pagination = Pagination::new().page_size(10);
        PageInfo::new(4, 10, 95).apply_to(&mut pagination);
        assert!(pagination.is_server());
        assert_eq!(pagination.page(), 4);
        assert_eq!(PageInfo::from(&pagination).pages, 10);

        let json = serde_json::to_value(PageInfo::new(2, 25, 60)).unwrap();
        assert_eq!(json, json!({"page": 2, "limit": 25, "total": 60, "pages": 3}));
    }
}
