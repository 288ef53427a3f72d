//! Dashboard stat cards.
//!
//! Figures follow the admin dashboard of the backend: revenue only counts
//! orders whose payment went through, and growth compares the last seven
//! days with the seven before.

use chrono::{DateTime, Duration, Utc};
use datagrid::format;
use serde::Serialize;

use crate::data::{ApprovalStatus, Order, OrderStatus, PaymentStatus, User};

/// One headline figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatCard {
    pub title: &'static str,
    pub value: String,
    /// Supporting line under the value.
    pub detail: String,
}

impl StatCard {
    fn new(title: &'static str, value: String, detail: String) -> Self {
        Self {
            title,
            value,
            detail,
        }
    }
}

/// Raw dashboard figures before formatting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_orders: usize,
    pub paid_orders: usize,
    pub revenue: f64,
    pub total_users: usize,
    pub active_users: usize,
    pub pending_orders: usize,
    pub pending_approvals: usize,
    pub orders_this_week: usize,
    pub orders_last_week: usize,
}

impl DashboardStats {
    /// Compute the figures as of `now`.
    #[must_use]
    pub fn compute(orders: &[Order], users: &[User], now: DateTime<Utc>) -> Self {
        let paid: Vec<&Order> = orders
            .iter()
            .filter(|o| o.payment_status == PaymentStatus::Paid)
            .collect();
        let week_ago = now - Duration::days(7);
        let two_weeks_ago = now - Duration::days(14);

        Self {
            total_orders: orders.len(),
            paid_orders: paid.len(),
            revenue: paid.iter().map(|o| o.total).sum(),
            total_users: users.len(),
            active_users: users.iter().filter(|u| u.active).count(),
            pending_orders: orders
                .iter()
                .filter(|o| o.status == OrderStatus::Pending)
                .count(),
            pending_approvals: users
                .iter()
                .filter(|u| {
                    u.role.needs_approval() && u.approval_status == ApprovalStatus::Pending
                })
                .count(),
            orders_this_week: orders
                .iter()
                .filter(|o| o.created_at > week_ago && o.created_at <= now)
                .count(),
            orders_last_week: orders
                .iter()
                .filter(|o| o.created_at > two_weeks_ago && o.created_at <= week_ago)
                .count(),
        }
    }

    /// Average value of a paid order, if any were paid.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_order_value(&self) -> Option<f64> {
        (self.paid_orders > 0).then(|| self.revenue / self.paid_orders as f64)
    }

    /// Week-over-week change in order count as a fraction.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn weekly_growth(&self) -> Option<f64> {
        (self.orders_last_week > 0).then(|| {
            (self.orders_this_week as f64 - self.orders_last_week as f64)
                / self.orders_last_week as f64
        })
    }
}

/// The dashboard page.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub stats: DashboardStats,
}

impl Dashboard {
    #[must_use]
    pub fn new(orders: &[Order], users: &[User], now: DateTime<Utc>) -> Self {
        Self {
            stats: DashboardStats::compute(orders, users, now),
        }
    }

    /// Formatted cards in display order.
    #[must_use]
    #[allow(clippy::cast_possible_wrap, clippy::cast_precision_loss)]
    pub fn cards(&self) -> Vec<StatCard> {
        let s = &self.stats;
        let growth = s.weekly_growth().map_or_else(
            || "no orders the week before".to_string(),
            |g| {
                let sign = if g >= 0.0 { "+" } else { "" };
                format!("{sign}{} vs last week", format::percent(g))
            },
        );
        let active_share = if s.total_users == 0 {
            format::NOT_AVAILABLE.to_string()
        } else {
            format!(
                "{} of {} accounts",
                format::percent(s.active_users as f64 / s.total_users as f64),
                format::thousands(s.total_users as i64)
            )
        };

        vec![
            StatCard::new(
                "Total orders",
                format::thousands(s.total_orders as i64),
                growth,
            ),
            StatCard::new(
                "Revenue",
                format::currency(s.revenue),
                format!(
                    "{} {} from {} paid orders",
                    format::CURRENCY,
                    format::compact(s.revenue),
                    format::thousands(s.paid_orders as i64)
                ),
            ),
            StatCard::new(
                "Active users",
                format::thousands(s.active_users as i64),
                active_share,
            ),
            StatCard::new(
                "Average order value",
                format::or_na(s.average_order_value().map(format::currency)),
                "paid orders only".to_string(),
            ),
            StatCard::new(
                "Pending orders",
                format::thousands(s.pending_orders as i64),
                "waiting for a cook".to_string(),
            ),
            StatCard::new(
                "Pending approvals",
                format::thousands(s.pending_approvals as i64),
                "cooks and delivery agents".to_string(),
            ),
        ]
    }
}
