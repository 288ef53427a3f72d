//! Table pages of the admin panel.
//!
//! Each page owns a [`DataGrid`] configured for one resource: its columns
//! and renderers, filter pickers and bulk actions. Bulk actions only record
//! which rows they were run on; the page then applies the change to its own
//! rows, the way the panel would after the backend confirmed it.

pub mod dashboard;
pub mod orders;
pub mod restaurants;
pub mod users;

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use datagrid::{DataGrid, GridCallbacks, GridError, Record};
use thiserror::Error;
use tracing::{debug, info};

use crate::cli::Resource;
use crate::session::{Session, Theme};

pub use dashboard::{Dashboard, StatCard};
pub use orders::OrdersPage;
pub use restaurants::RestaurantsPage;
pub use users::UsersPage;

/// Errors raised by page operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    /// No bulk action of that name on this page.
    #[error("unknown action `{action}` for {resource}; available: {available}")]
    UnknownAction {
        resource: &'static str,
        action: String,
        available: String,
    },

    /// The grid refused the operation.
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// What every page is built with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    pub session: Session,
    pub theme: Theme,
    /// Reference time for relative dates such as `3d ago`.
    pub now: DateTime<Utc>,
    /// Initial rows per page.
    pub page_size: usize,
}

impl PageContext {
    #[must_use]
    pub const fn new(session: Session, theme: Theme, now: DateTime<Utc>, page_size: usize) -> Self {
        Self {
            session,
            theme,
            now,
            page_size,
        }
    }
}

/// Result of a bulk action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkOutcome {
    /// Label of the action that ran.
    pub action: String,
    /// Ids of the rows it was run on, in id order.
    pub ids: Vec<String>,
    /// One-line summary, e.g. `Deactivated 2 users`.
    pub summary: String,
}

/// Ids recorded by the most recent bulk action.
#[derive(Debug, Clone, Default)]
pub struct ActionQueue(Arc<Mutex<Vec<String>>>);

impl ActionQueue {
    /// A bulk-action handler that records the ids it is given.
    pub fn recorder<R: Record + 'static>(&self) -> impl Fn(&[&R]) + Send + Sync + 'static {
        let queue = Arc::clone(&self.0);
        move |rows: &[&R]| {
            let mut ids = queue.lock().unwrap_or_else(PoisonError::into_inner);
            ids.extend(rows.iter().map(|row| row.row_id().to_string()));
        }
    }

    /// Drains the recorded ids.
    #[must_use]
    pub fn take(&self) -> BTreeSet<String> {
        let mut ids = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        ids.drain(..).collect()
    }
}

/// A page backed by a grid.
pub trait TablePage {
    /// Row type shown on the page.
    type Row: Record + Clone + 'static;

    /// Which resource this page lists.
    fn resource(&self) -> Resource;

    /// Page heading.
    fn title(&self) -> &'static str;

    /// Sort field used when a query names none.
    fn default_sort(&self) -> &'static str;

    fn context(&self) -> &PageContext;

    fn grid(&self) -> &DataGrid<Self::Row>;

    fn grid_mut(&mut self) -> &mut DataGrid<Self::Row>;

    /// Queue the page's bulk actions record into.
    fn queue(&self) -> &ActionQueue;

    /// Apply a confirmed bulk action to the rows whose ids are in `ids`.
    /// Returns the past-tense verb for the summary.
    fn apply_action(label: &str, rows: &mut Vec<Self::Row>, ids: &BTreeSet<String>)
    -> &'static str;

    /// Run a bulk action on the current selection and apply its effect.
    ///
    /// `name` is matched against action labels ignoring case, with `-` and
    /// `_` standing for spaces.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::UnknownAction`], or the grid's error when the
    /// selection is empty or the action is disabled for it.
    fn run_bulk(&mut self, name: &str) -> Result<BulkOutcome, PageError> {
        let label = resolve_action(self.grid(), name).ok_or_else(|| PageError::UnknownAction {
            resource: self.resource().noun(),
            action: name.to_string(),
            available: available_actions(self.grid()),
        })?;

        let affected = self.grid().run_bulk_action(&label)?;
        let ids = self.queue().take();
        let mut rows = self.grid().all_rows().to_vec();
        let verb = Self::apply_action(&label, &mut rows, &ids);
        self.grid_mut().set_rows(rows);

        info!(action = %label, affected, resource = self.resource().noun(), "Bulk action applied");
        Ok(BulkOutcome {
            summary: format!("{verb} {affected} {}", self.resource().count_noun(affected)),
            action: label,
            ids: ids.into_iter().collect(),
        })
    }
}

/// Callbacks that trace what the grid reports back to its host.
pub fn traced_callbacks<R: Record + 'static>(resource: Resource) -> GridCallbacks<R> {
    let noun = resource.noun();
    GridCallbacks::new()
        .on_export(move |rows: &[&R]| info!(resource = noun, rows = rows.len(), "Exporting rows"))
        .on_page_change(move |page| debug!(resource = noun, page, "Page changed"))
        .on_page_size_change(move |size| debug!(resource = noun, size, "Page size changed"))
}

/// Finds the action label a command-line name refers to.
pub fn resolve_action<R>(grid: &DataGrid<R>, name: &str) -> Option<String>
where
    R: Record,
{
    let wanted = normalize(name);
    grid.bulk_actions()
        .iter()
        .map(datagrid::BulkAction::label)
        .find(|label| normalize(label) == wanted)
        .map(str::to_string)
}

/// Action names as typed on the command line, comma separated.
pub fn available_actions<R: Record>(grid: &DataGrid<R>) -> String {
    let names: Vec<String> = grid
        .bulk_actions()
        .iter()
        .map(|a| normalize(a.label()).replace(' ', "-"))
        .collect();
    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    }
}

fn normalize(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c })
        .collect::<String>()
        .to_lowercase()
}
