//! Deterministic data generator for the admin console.
//!
//! Provides seedable generation of realistic demo data for a home-cooked food
//! delivery service. Two runs with the same seed produce identical datasets.

use chrono::{DateTime, TimeDelta, Utc};
use rand::Rng;
use rand::prelude::IndexedRandom;
use rand_pcg::Pcg64;

use super::{
    ApprovalStatus, Id, Order, OrderStatus, PaymentMethod, PaymentStatus, Restaurant, Role, User,
};

// ============================================================================
// Static Data Pools
// ============================================================================

const FIRST_NAMES: &[&str] = &[
    "Nimal", "Kamala", "Sunil", "Ayesha", "Ruwan", "Dilani", "Kasun", "Tharushi", "Mahesh",
    "Nadeesha", "Chaminda", "Ishara", "Priyanka", "Lahiru", "Fathima", "Arjun", "Sanduni",
    "Nuwan", "Hiruni", "Rizwan",
];

const LAST_NAMES: &[&str] = &[
    "Perera",
    "Fernando",
    "Silva",
    "Jayasinghe",
    "Wickramasinghe",
    "Bandara",
    "Rajapaksa",
    "Dissanayake",
    "Gunawardena",
    "Hameed",
    "Kumar",
    "Ratnayake",
];

const EMAIL_DOMAINS: &[&str] = &["gmail.com", "yahoo.com", "example.lk", "mail.lk"];

const KITCHEN_PREFIXES: &[&str] = &[
    "Amma's", "Lanka", "Spice", "Golden", "Village", "Island", "Ceylon", "Hill Country", "Harbour",
    "Coconut",
];

const KITCHEN_SUFFIXES: &[&str] = &["Kitchen", "Bites", "Table", "Kade", "House", "Pot", "Grill"];

const CUISINES: &[&str] = &[
    "Sri Lankan",
    "South Indian",
    "Chinese",
    "Seafood",
    "Vegetarian",
    "Bakery",
    "Street food",
];

/// Seeded generator of demo rows.
pub struct Generator {
    rng: Pcg64,
    base_time: DateTime<Utc>,
    next_id: Id,
}

impl Generator {
    /// Create a new generator with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg64::new(seed.into(), 0x0a02_bdbf_7bb3_c0a7),
            base_time: DateTime::from_timestamp(1_700_000_000, 0).unwrap_or_else(Utc::now),
            next_id: 1,
        }
    }

    /// Reference time all generated timestamps are relative to.
    #[must_use]
    pub const fn base_time(&self) -> DateTime<Utc> {
        self.base_time
    }

    #[allow(clippy::missing_const_for_fn)] // Cannot be const: mutates self
    fn next_id(&mut self) -> Id {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Random timestamp within the last N hours from base time.
    fn random_time(&mut self, hours_ago_max: i64) -> DateTime<Utc> {
        let secs = self.rng.random_range(0..hours_ago_max * 3600);
        self.base_time - TimeDelta::seconds(secs)
    }

    fn person_name(&mut self) -> String {
        let first = FIRST_NAMES.choose(&mut self.rng).unwrap_or(&"Guest");
        let last = LAST_NAMES.choose(&mut self.rng).unwrap_or(&"Perera");
        format!("{first} {last}")
    }

    /// Money rounded to whole rupees, as menus price them.
    fn amount(&mut self, min: u32, max: u32) -> f64 {
        f64::from(self.rng.random_range(min..max))
    }

    // ========================================================================
    // Domain Generators
    // ========================================================================

    /// Generate a single user account.
    #[must_use]
    pub fn user(&mut self) -> User {
        let id = self.next_id();
        let full_name = self.person_name();
        let domain = EMAIL_DOMAINS.choose(&mut self.rng).unwrap_or(&"example.lk");
        let local = full_name.to_lowercase().replace(' ', ".");
        let email = format!("{local}{id}@{domain}");

        let role = self.weighted_choice(&[
            (Role::Customer, 70),
            (Role::Cook, 15),
            (Role::DeliveryAgent, 12),
            (Role::Admin, 3),
        ]);
        let approval_status = if role.needs_approval() {
            self.weighted_choice(&[
                (ApprovalStatus::Approved, 70),
                (ApprovalStatus::Pending, 25),
                (ApprovalStatus::Rejected, 5),
            ])
        } else {
            ApprovalStatus::Approved
        };

        let total_orders = if role == Role::Customer {
            self.rng.random_range(0..60)
        } else {
            0
        };
        let total_spent = f64::from(total_orders) * self.amount(600, 2_400);
        let date_joined = self.random_time(24 * 365);
        let last_login = if self.rng.random_bool(0.85) {
            Some(self.random_time(24 * 30).max(date_joined))
        } else {
            None
        };

        User {
            id,
            // Some accounts never filled in a name.
            name: if self.rng.random_bool(0.1) {
                String::new()
            } else {
                full_name
            },
            email,
            role,
            active: self.rng.random_bool(0.85),
            approval_status,
            total_orders,
            total_spent,
            date_joined,
            last_login,
        }
    }

    /// Generate N user accounts.
    #[must_use]
    pub fn users(&mut self, count: usize) -> Vec<User> {
        (0..count).map(|_| self.user()).collect()
    }

    /// Generate a single order. `number` becomes the order number suffix.
    #[must_use]
    pub fn order(&mut self, number: usize, customers: &[&str], chefs: &[&str]) -> Order {
        let status = self.weighted_choice(&[
            (OrderStatus::Pending, 12),
            (OrderStatus::Confirmed, 8),
            (OrderStatus::Preparing, 10),
            (OrderStatus::Ready, 5),
            (OrderStatus::OutForDelivery, 8),
            (OrderStatus::Delivered, 45),
            (OrderStatus::Cancelled, 8),
            (OrderStatus::Refunded, 4),
        ]);
        let payment_method = self.weighted_choice(&[
            (PaymentMethod::Cash, 40),
            (PaymentMethod::Card, 30),
            (PaymentMethod::Online, 20),
            (PaymentMethod::Wallet, 10),
        ]);
        let payment_status = match status {
            OrderStatus::Refunded => PaymentStatus::Refunded,
            OrderStatus::Cancelled if self.rng.random_bool(0.3) => PaymentStatus::PartialRefund,
            OrderStatus::Cancelled => PaymentStatus::Failed,
            OrderStatus::Delivered => PaymentStatus::Paid,
            _ if payment_method == PaymentMethod::Cash => PaymentStatus::Pending,
            _ => PaymentStatus::Paid,
        };

        let customer = customers
            .choose(&mut self.rng)
            .map_or_else(|| self.person_name(), |c| (*c).to_string());
        let chef = if status == OrderStatus::Pending {
            None
        } else {
            chefs.choose(&mut self.rng).map(|c| (*c).to_string())
        };

        Order {
            order_number: format!("ORD-{number:05}"),
            customer,
            chef,
            status,
            payment_status,
            payment_method,
            total: self.amount(450, 8_500),
            created_at: self.random_time(24 * 60),
        }
    }

    /// Generate N orders placed by the given customers and cooked by the
    /// given chefs.
    #[must_use]
    pub fn orders(&mut self, count: usize, customers: &[&str], chefs: &[&str]) -> Vec<Order> {
        (1..=count)
            .map(|n| self.order(n, customers, chefs))
            .collect()
    }

    /// Generate a single restaurant.
    #[must_use]
    pub fn restaurant(&mut self) -> Restaurant {
        let prefix = KITCHEN_PREFIXES.choose(&mut self.rng).unwrap_or(&"Home");
        let suffix = KITCHEN_SUFFIXES.choose(&mut self.rng).unwrap_or(&"Kitchen");
        let cuisine = CUISINES.choose(&mut self.rng).unwrap_or(&"Sri Lankan");
        // One decimal, 2.5 to 5.0.
        let rating = f64::from(self.rng.random_range(25_u32..=50)) / 10.0;

        Restaurant {
            id: self.next_id(),
            name: format!("{prefix} {suffix}"),
            cuisine: (*cuisine).to_string(),
            rating,
            active: self.rng.random_bool(0.8),
            orders: self.rng.random_range(0..1_500),
        }
    }

    /// Generate N restaurants.
    #[must_use]
    pub fn restaurants(&mut self, count: usize) -> Vec<Restaurant> {
        (0..count).map(|_| self.restaurant()).collect()
    }

    /// Choose an item based on weights.
    fn weighted_choice<T: Copy>(&mut self, items: &[(T, u32)]) -> T {
        debug_assert!(
            !items.is_empty(),
            "weighted_choice requires non-empty items"
        );
        let total: u32 = items.iter().map(|(_, w)| w).sum();
        let mut roll = self.rng.random_range(0..total);

        for (item, weight) in items {
            if roll < *weight {
                return *item;
            }
            roll -= weight;
        }

        items[0].0
    }
}

// ============================================================================
// Generated Dataset
// ============================================================================

/// A complete generated dataset for the console.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub orders: Vec<Order>,
    pub users: Vec<User>,
    pub restaurants: Vec<Restaurant>,
    /// Time the dataset was generated "at"; relative times are measured
    /// against it so output stays reproducible.
    pub generated_at: DateTime<Utc>,
}

impl Dataset {
    /// Generate a complete dataset with the given seed.
    #[must_use]
    pub fn generate(seed: u64) -> Self {
        Self::generate_sized(seed, 60, 240, 18)
    }

    /// Generate a dataset with explicit sizes.
    #[must_use]
    pub fn generate_sized(seed: u64, users: usize, orders: usize, restaurants: usize) -> Self {
        let mut g = Generator::new(seed);

        let users = g.users(users);
        let customers: Vec<String> = users
            .iter()
            .filter(|u| u.role == Role::Customer)
            .map(User::display_name)
            .collect();
        let chefs: Vec<String> = users
            .iter()
            .filter(|u| u.role == Role::Cook)
            .map(User::display_name)
            .collect();
        let customer_refs: Vec<&str> = customers.iter().map(String::as_str).collect();
        let chef_refs: Vec<&str> = chefs.iter().map(String::as_str).collect();

        let orders = g.orders(orders, &customer_refs, &chef_refs);
        let restaurants = g.restaurants(restaurants);

        Self {
            orders,
            users,
            restaurants,
            generated_at: g.base_time(),
        }
    }
}
