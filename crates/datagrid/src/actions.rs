//! Bulk actions, caller callbacks and loading/error status.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Visual weight of a bulk action button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionVariant {
    /// Regular action.
    #[default]
    Default,
    /// Highlighted action.
    Primary,
    /// Destructive action such as delete.
    Danger,
}

type RowsFn<R> = Arc<dyn Fn(&[&R]) + Send + Sync>;
type PredicateFn<R> = Arc<dyn Fn(&[&R]) -> bool + Send + Sync>;

/// A caller-defined operation over the selected rows.
pub struct BulkAction<R> {
    label: String,
    variant: ActionVariant,
    action: RowsFn<R>,
    disabled: Option<PredicateFn<R>>,
}

impl<R> BulkAction<R> {
    /// Creates an action.
    pub fn new<F>(label: impl Into<String>, action: F) -> Self
    where
        F: Fn(&[&R]) + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            variant: ActionVariant::Default,
            action: Arc::new(action),
            disabled: None,
        }
    }

    /// Sets the variant (builder pattern).
    #[must_use]
    pub fn variant(mut self, variant: ActionVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Disables the action whenever `predicate` holds for the selection.
    #[must_use]
    pub fn disabled_when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&[&R]) -> bool + Send + Sync + 'static,
    {
        self.disabled = Some(Arc::new(predicate));
        self
    }

    /// Button label; also the lookup key for
    /// [`DataGrid::run_bulk_action`](crate::DataGrid::run_bulk_action).
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Button variant.
    #[must_use]
    pub const fn get_variant(&self) -> ActionVariant {
        self.variant
    }

    /// Returns whether the action is disabled for `rows`.
    #[must_use]
    pub fn is_disabled(&self, rows: &[&R]) -> bool {
        self.disabled.as_ref().is_some_and(|pred| pred(rows))
    }

    pub(crate) fn invoke(&self, rows: &[&R]) {
        (self.action)(rows);
    }
}

impl<R> Clone for BulkAction<R> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            variant: self.variant,
            action: Arc::clone(&self.action),
            disabled: self.disabled.clone(),
        }
    }
}

impl<R> fmt::Debug for BulkAction<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BulkAction")
            .field("label", &self.label)
            .field("variant", &self.variant)
            .field("has_disabled", &self.disabled.is_some())
            .finish_non_exhaustive()
    }
}

/// Observers the grid notifies. Every callback is optional.
pub struct GridCallbacks<R> {
    pub(crate) on_row_click: Option<Arc<dyn Fn(&R, usize) + Send + Sync>>,
    pub(crate) on_refresh: Option<Arc<dyn Fn() + Send + Sync>>,
    pub(crate) on_export: Option<RowsFn<R>>,
    pub(crate) on_page_change: Option<Arc<dyn Fn(usize) + Send + Sync>>,
    pub(crate) on_page_size_change: Option<Arc<dyn Fn(usize) + Send + Sync>>,
}

impl<R> Default for GridCallbacks<R> {
    fn default() -> Self {
        Self {
            on_row_click: None,
            on_refresh: None,
            on_export: None,
            on_page_change: None,
            on_page_size_change: None,
        }
    }
}

impl<R> GridCallbacks<R> {
    /// Creates an empty set of callbacks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with the clicked row and its index on the current page.
    #[must_use]
    pub fn on_row_click<F>(mut self, f: F) -> Self
    where
        F: Fn(&R, usize) + Send + Sync + 'static,
    {
        self.on_row_click = Some(Arc::new(f));
        self
    }

    /// Called when the user asks for fresh data.
    #[must_use]
    pub fn on_refresh<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_refresh = Some(Arc::new(f));
        self
    }

    /// Called with every filtered and sorted row, not just the current page.
    #[must_use]
    pub fn on_export<F>(mut self, f: F) -> Self
    where
        F: Fn(&[&R]) + Send + Sync + 'static,
    {
        self.on_export = Some(Arc::new(f));
        self
    }

    /// Called with the new 1-based page.
    #[must_use]
    pub fn on_page_change<F>(mut self, f: F) -> Self
    where
        F: Fn(usize) + Send + Sync + 'static,
    {
        self.on_page_change = Some(Arc::new(f));
        self
    }

    /// Called with the new page size.
    #[must_use]
    pub fn on_page_size_change<F>(mut self, f: F) -> Self
    where
        F: Fn(usize) + Send + Sync + 'static,
    {
        self.on_page_size_change = Some(Arc::new(f));
        self
    }
}

impl<R> Clone for GridCallbacks<R> {
    fn clone(&self) -> Self {
        Self {
            on_row_click: self.on_row_click.clone(),
            on_refresh: self.on_refresh.clone(),
            on_export: self.on_export.clone(),
            on_page_change: self.on_page_change.clone(),
            on_page_size_change: self.on_page_size_change.clone(),
        }
    }
}

impl<R> fmt::Debug for GridCallbacks<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridCallbacks")
            .field("on_row_click", &self.on_row_click.is_some())
            .field("on_refresh", &self.on_refresh.is_some())
            .field("on_export", &self.on_export.is_some())
            .field("on_page_change", &self.on_page_change.is_some())
            .field("on_page_size_change", &self.on_page_size_change.is_some())
            .finish()
    }
}

/// Loading and error flags set by the host around its data fetches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    /// A fetch is in flight.
    pub loading: bool,
    /// The last fetch failed with this message.
    pub error: Option<String>,
}

impl Status {
    /// Returns whether refresh and export are available.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        !self.loading
    }

    /// Returns whether a retry affordance should be shown.
    #[must_use]
    pub const fn retry_available(&self) -> bool {
        !self.loading && self.error.is_some()
    }
}
