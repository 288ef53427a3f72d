//! Domain rows shown by the admin console.
//!
//! These types mirror what the delivery backend's admin endpoints return:
//! orders, user accounts and restaurants. They are:
//! - Small and presentation-friendly
//! - Cheaply cloneable
//! - Serializable, so they export and identify themselves without glue
//!
//! The [`generator`] module provides seedable, deterministic demo data.

pub mod generator;

use chrono::{DateTime, Utc};
use datagrid::Record;
use serde::{Deserialize, Serialize};

/// Unique identifier for accounts and restaurants.
pub type Id = u64;

// ============================================================================
// Orders
// ============================================================================

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Placed, waiting for the cook.
    #[default]
    Pending,
    /// Accepted by the cook.
    Confirmed,
    /// Being cooked.
    Preparing,
    /// Ready for pickup.
    Ready,
    /// With a delivery agent.
    OutForDelivery,
    /// Handed to the customer.
    Delivered,
    /// Cancelled before delivery.
    Cancelled,
    /// Paid back after cancellation or complaint.
    Refunded,
}

impl OrderStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [Self; 8] = [
        Self::Pending,
        Self::Confirmed,
        Self::Preparing,
        Self::Ready,
        Self::OutForDelivery,
        Self::Delivered,
        Self::Cancelled,
        Self::Refunded,
    ];

    /// Wire value, as stored by the backend.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Preparing => "preparing",
            Self::Ready => "ready",
            Self::OutForDelivery => "out_for_delivery",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Refunded => "refunded",
        }
    }

    /// Get display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Preparing => "Preparing",
            Self::Ready => "Ready",
            Self::OutForDelivery => "Out for delivery",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
            Self::Refunded => "Refunded",
        }
    }

    /// Parses a wire value.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }

    /// Whether the order has left the active pipeline.
    #[must_use]
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled | Self::Refunded)
    }
}

/// Settlement state of an order's payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
    Refunded,
    PartialRefund,
}

impl PaymentStatus {
    /// All payment states.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Paid,
        Self::Failed,
        Self::Refunded,
        Self::PartialRefund,
    ];

    /// Wire value.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
            Self::PartialRefund => "partial_refund",
        }
    }

    /// Get display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Paid => "Paid",
            Self::Failed => "Failed",
            Self::Refunded => "Refunded",
            Self::PartialRefund => "Partially refunded",
        }
    }
}

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Online,
    Wallet,
}

impl PaymentMethod {
    /// Wire value.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Card => "card",
            Self::Online => "online",
            Self::Wallet => "wallet",
        }
    }

    /// Get display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cash => "Cash on delivery",
            Self::Card => "Card",
            Self::Online => "Online",
            Self::Wallet => "Wallet",
        }
    }
}

/// A customer order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Human-facing order number, e.g. `ORD-00042`.
    pub order_number: String,
    /// Customer display name.
    pub customer: String,
    /// Cook preparing the order, once assigned.
    pub chef: Option<String>,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethod,
    /// Order total in LKR.
    pub total: f64,
    pub created_at: DateTime<Utc>,
}

impl Record for Order {
    fn id(&self) -> Option<String> {
        Some(self.order_number.clone())
    }
}

// ============================================================================
// Users
// ============================================================================

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Customer,
    Cook,
    DeliveryAgent,
    Admin,
}

impl Role {
    /// Wire value.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Cook => "cook",
            Self::DeliveryAgent => "delivery_agent",
            Self::Admin => "admin",
        }
    }

    /// Get display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Customer => "Customer",
            Self::Cook => "Cook",
            Self::DeliveryAgent => "Delivery agent",
            Self::Admin => "Admin",
        }
    }

    /// Cooks and delivery agents must be approved before they can work.
    #[must_use]
    pub const fn needs_approval(self) -> bool {
        matches!(self, Self::Cook | Self::DeliveryAgent)
    }
}

/// Review state of a cook or delivery agent application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    /// Wire value.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Get display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

/// A user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Id,
    /// Name as entered; may be blank.
    pub name: String,
    pub email: String,
    pub role: Role,
    pub active: bool,
    pub approval_status: ApprovalStatus,
    pub total_orders: u32,
    /// Lifetime spend in LKR.
    pub total_spent: f64,
    pub date_joined: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    /// Name to show: the entered name, else the local part of the email,
    /// else `User`.
    #[must_use]
    pub fn display_name(&self) -> String {
        let name = self.name.trim();
        if !name.is_empty() {
            return name.to_string();
        }
        match self.email.split_once('@') {
            Some((local, _)) if !local.is_empty() => local.to_string(),
            _ => "User".to_string(),
        }
    }
}

impl Record for User {
    fn id(&self) -> Option<String> {
        Some(self.id.to_string())
    }
}

// ============================================================================
// Restaurants
// ============================================================================

/// A home kitchen or restaurant listed on the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: Id,
    pub name: String,
    pub cuisine: String,
    /// Average review rating, 0 to 5.
    pub rating: f64,
    pub active: bool,
    /// Orders fulfilled to date.
    pub orders: u32,
}

impl Record for Restaurant {
    fn id(&self) -> Option<String> {
        Some(self.id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn user(name: &str, email: &str) -> User {
        User {
            id: 1,
            name: name.to_string(),
            email: email.to_string(),
            role: Role::Customer,
            active: true,
            approval_status: ApprovalStatus::Approved,
            total_orders: 0,
            total_spent: 0.0,
            date_joined: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            last_login: None,
        }
    }

    #[test]
    fn display_name_fallbacks() {
        assert_eq!(user("Nimal Perera", "n@example.lk").display_name(), "Nimal Perera");
        assert_eq!(user("  ", "kamala.s@example.lk").display_name(), "kamala.s");
        assert_eq!(user("", "@example.lk").display_name(), "User");
        assert_eq!(user("", "").display_name(), "User");
    }

    #[test]
    fn status_keys_round_trip() {
        for status in OrderStatus::ALL {
            assert_eq!(OrderStatus::from_key(status.key()), Some(status));
        }
        assert_eq!(OrderStatus::from_key("lost"), None);
    }

    #[test]
    fn serde_uses_wire_values() {
        let json = serde_json::to_string(&OrderStatus::OutForDelivery).unwrap();
        assert_eq!(json, "\"out_for_delivery\"");
        let json = serde_json::to_string(&Role::DeliveryAgent).unwrap();
        assert_eq!(json, "\"delivery_agent\"");
    }

    #[test]
    fn records_are_keyed_by_id() {
        let u = user("A", "a@b.c");
        assert_eq!(u.row_id().as_str(), "1");
    }

    #[test]
    fn closed_statuses() {
        assert!(OrderStatus::Delivered.is_closed());
        assert!(!OrderStatus::Preparing.is_closed());
        assert!(Role::Cook.needs_approval());
        assert!(!Role::Customer.needs_approval());
    }
}
