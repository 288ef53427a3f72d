//! User management page.

use std::collections::BTreeSet;

use datagrid::prelude::*;
use datagrid::{FilterOption, format};
use tracing::warn;

use super::{ActionQueue, PageContext, TablePage, traced_callbacks};
use crate::cli::Resource;
use crate::data::{ApprovalStatus, Role, User};

pub const ACTIVATE: &str = "Activate";
pub const DEACTIVATE: &str = "Deactivate";
pub const DELETE: &str = "Delete";

/// All accounts, most recently joined first by default.
pub struct UsersPage {
    grid: DataGrid<User>,
    context: PageContext,
    queue: ActionQueue,
}

impl UsersPage {
    #[must_use]
    pub fn new(users: Vec<User>, context: PageContext) -> Self {
        let queue = ActionQueue::default();
        let grid = DataGrid::new(columns(&context))
            .page_size(context.page_size)
            .callbacks(traced_callbacks(Resource::Users))
            .filter_option(role_filter())
            .filter_option(
                FilterOption::new("active", "Status")
                    .choice("true", "Active")
                    .choice("false", "Inactive"),
            )
            .filter_option(approval_filter())
            .bulk_action(
                BulkAction::new(ACTIVATE, queue.recorder::<User>())
                    .variant(ActionVariant::Primary)
                    .disabled_when(|rows: &[&User]| rows.iter().all(|u| u.active)),
            )
            // Admin accounts are managed elsewhere.
            .bulk_action(
                BulkAction::new(DEACTIVATE, queue.recorder::<User>())
                    .disabled_when(|rows: &[&User]| rows.iter().any(|u| u.role == Role::Admin)),
            )
            .bulk_action(
                BulkAction::new(DELETE, queue.recorder::<User>())
                    .variant(ActionVariant::Danger)
                    .disabled_when(|rows: &[&User]| rows.iter().any(|u| u.role == Role::Admin)),
            )
            .rows(users);

        Self {
            grid,
            context,
            queue,
        }
    }
}

impl TablePage for UsersPage {
    type Row = User;

    fn resource(&self) -> Resource {
        Resource::Users
    }

    fn title(&self) -> &'static str {
        "Users"
    }

    fn default_sort(&self) -> &'static str {
        "date_joined"
    }

    fn context(&self) -> &PageContext {
        &self.context
    }

    fn grid(&self) -> &DataGrid<User> {
        &self.grid
    }

    fn grid_mut(&mut self) -> &mut DataGrid<User> {
        &mut self.grid
    }

    fn queue(&self) -> &ActionQueue {
        &self.queue
    }

    fn apply_action(label: &str, rows: &mut Vec<User>, ids: &BTreeSet<String>) -> &'static str {
        let selected = |u: &User| ids.contains(&u.id.to_string());
        match label {
            DELETE => {
                rows.retain(|u| !selected(u));
                "Deleted"
            }
            ACTIVATE => {
                rows.iter_mut()
                    .filter(|u| selected(&**u))
                    .for_each(|u| u.active = true);
                "Activated"
            }
            DEACTIVATE => {
                rows.iter_mut()
                    .filter(|u| selected(&**u))
                    .for_each(|u| u.active = false);
                "Deactivated"
            }
            other => {
                warn!(action = other, "Bulk action has no effect on users");
                "Skipped"
            }
        }
    }
}

fn columns(context: &PageContext) -> Vec<Column<User>> {
    let now = context.now;
    vec![
        Column::with_accessor("id", "ID", |u: &User| Some(u.id.into()))
            .sortable()
            .align(Align::Right)
            .width(5),
        Column::with_accessor("name", "Name", |u: &User| Some(u.display_name().into())).sortable(),
        Column::with_accessor("email", "Email", |u: &User| Some((&u.email).into())).sortable(),
        Column::with_accessor("role", "Role", |u: &User| Some(u.role.key().into()))
            .render(|_, u: &User, _| u.role.name().to_string()),
        Column::with_accessor("active", "Status", |u: &User| Some(u.active.into())).render(
            |_, u: &User, _| {
                String::from(if u.active { "Active" } else { "Inactive" })
            },
        ),
        Column::with_accessor("approval_status", "Approval", |u: &User| {
            Some(u.approval_status.key().into())
        })
        .render(|_, u: &User, _| u.approval_status.name().to_string()),
        Column::with_accessor("total_orders", "Orders", |u: &User| Some(u.total_orders.into()))
            .sortable()
            .align(Align::Right),
        Column::with_accessor("total_spent", "Spent", |u: &User| Some(u.total_spent.into()))
            .sortable()
            .align(Align::Right)
            .render(|_, u: &User, _| format::currency(u.total_spent)),
        Column::with_accessor("date_joined", "Joined", |u: &User| Some(u.date_joined.into()))
            .sortable()
            .render(|_, u: &User, _| format::date(&u.date_joined)),
        Column::with_accessor("last_login", "Last login", |u: &User| Some(u.last_login.into()))
            .sortable()
            .render(move |_, u: &User, _| {
                u.last_login
                    .map_or_else(String::new, |at| format::relative(&at, &now))
            }),
    ]
}

fn role_filter() -> FilterOption {
    [Role::Customer, Role::Cook, Role::DeliveryAgent, Role::Admin]
        .into_iter()
        .fold(FilterOption::new("role", "Role"), |option, r| {
            option.choice(r.key(), r.name())
        })
}

fn approval_filter() -> FilterOption {
    [
        ApprovalStatus::Pending,
        ApprovalStatus::Approved,
        ApprovalStatus::Rejected,
    ]
    .into_iter()
    .fold(FilterOption::new("approval_status", "Approval"), |option, a| {
        option.choice(a.key(), a.name())
    })
}
