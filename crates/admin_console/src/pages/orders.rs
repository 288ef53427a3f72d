//! Orders page.

use std::collections::BTreeSet;

use datagrid::prelude::*;
use datagrid::{FilterOption, format};
use tracing::warn;

use super::{ActionQueue, PageContext, TablePage, traced_callbacks};
use crate::cli::Resource;
use crate::data::{Order, OrderStatus, PaymentMethod, PaymentStatus};

pub const MARK_DELIVERED: &str = "Mark delivered";
pub const CANCEL: &str = "Cancel";

/// All orders, newest first by default.
pub struct OrdersPage {
    grid: DataGrid<Order>,
    context: PageContext,
    queue: ActionQueue,
}

impl OrdersPage {
    #[must_use]
    pub fn new(orders: Vec<Order>, context: PageContext) -> Self {
        let queue = ActionQueue::default();
        let grid = DataGrid::new(columns(&context))
            .page_size(context.page_size)
            .callbacks(traced_callbacks(Resource::Orders))
            .filter_option(status_filter())
            .filter_option(payment_filter())
            .filter_option(method_filter())
            .bulk_action(
                BulkAction::new(MARK_DELIVERED, queue.recorder::<Order>())
                    .variant(ActionVariant::Primary)
                    .disabled_when(|rows: &[&Order]| rows.iter().any(|o| o.status.is_closed())),
            )
            .bulk_action(
                BulkAction::new(CANCEL, queue.recorder::<Order>())
                    .variant(ActionVariant::Danger)
                    .disabled_when(|rows: &[&Order]| rows.iter().any(|o| o.status.is_closed())),
            )
            .rows(orders);

        Self {
            grid,
            context,
            queue,
        }
    }
}

impl TablePage for OrdersPage {
    type Row = Order;

    fn resource(&self) -> Resource {
        Resource::Orders
    }

    fn title(&self) -> &'static str {
        "Orders"
    }

    fn default_sort(&self) -> &'static str {
        "created_at"
    }

    fn context(&self) -> &PageContext {
        &self.context
    }

    fn grid(&self) -> &DataGrid<Order> {
        &self.grid
    }

    fn grid_mut(&mut self) -> &mut DataGrid<Order> {
        &mut self.grid
    }

    fn queue(&self) -> &ActionQueue {
        &self.queue
    }

    fn apply_action(label: &str, rows: &mut Vec<Order>, ids: &BTreeSet<String>) -> &'static str {
        let (status, verb) = match label {
            MARK_DELIVERED => (OrderStatus::Delivered, "Delivered"),
            CANCEL => (OrderStatus::Cancelled, "Cancelled"),
            other => {
                warn!(action = other, "Bulk action has no effect on orders");
                return "Skipped";
            }
        };
        for order in rows.iter_mut().filter(|o| ids.contains(&o.order_number)) {
            order.status = status;
            order.payment_status = match (status, order.payment_status) {
                // Cash is collected at the door.
                (OrderStatus::Delivered, _) => PaymentStatus::Paid,
                (_, PaymentStatus::Paid) => PaymentStatus::Refunded,
                (_, other) => other,
            };
        }
        verb
    }
}

fn columns(context: &PageContext) -> Vec<Column<Order>> {
    let now = context.now;
    vec![
        Column::with_accessor("order_number", "Order", |o: &Order| {
            Some((&o.order_number).into())
        })
        .sortable()
        .width(10),
        Column::with_accessor("customer", "Customer", |o: &Order| Some((&o.customer).into()))
            .sortable(),
        Column::with_accessor("chef", "Chef", |o: &Order| Some(o.chef.clone().into())),
        Column::with_accessor("status", "Status", |o: &Order| Some(o.status.key().into()))
            .sortable()
            .render(|_, o: &Order, _| o.status.name().to_string()),
        Column::with_accessor("payment_status", "Payment", |o: &Order| {
            Some(o.payment_status.key().into())
        })
        .render(|_, o: &Order, _| o.payment_status.name().to_string()),
        Column::with_accessor("payment_method", "Method", |o: &Order| {
            Some(o.payment_method.key().into())
        })
        .render(|_, o: &Order, _| o.payment_method.name().to_string()),
        Column::with_accessor("total", "Total", |o: &Order| Some(o.total.into()))
            .sortable()
            .align(Align::Right)
            .render(|_, o: &Order, _| format::currency(o.total)),
        Column::with_accessor("created_at", "Placed", |o: &Order| Some(o.created_at.into()))
            .sortable()
            .render(move |_, o: &Order, _| format::relative(&o.created_at, &now)),
    ]
}

fn status_filter() -> FilterOption {
    OrderStatus::ALL
        .into_iter()
        .fold(FilterOption::new("status", "Status"), |option, s| {
            option.choice(s.key(), s.name())
        })
}

fn payment_filter() -> FilterOption {
    PaymentStatus::ALL
        .into_iter()
        .fold(FilterOption::new("payment_status", "Payment"), |option, s| {
            option.choice(s.key(), s.name())
        })
}

fn method_filter() -> FilterOption {
    [
        PaymentMethod::Cash,
        PaymentMethod::Card,
        PaymentMethod::Online,
        PaymentMethod::Wallet,
    ]
    .into_iter()
    .fold(FilterOption::new("payment_method", "Method"), |option, m| {
        option.choice(m.key(), m.name())
    })
}
