//! Command-line interface for the admin console.
//!
//! # Examples
//!
//! ```bash
//! # First page of orders, newest first
//! admin-console list orders
//!
//! # Pending orders for one customer, biggest first, as CSV
//! admin-console list orders --filter status=pending --search nimal --sort total:desc --format csv
//!
//! # Deactivate two accounts
//! admin-console bulk users deactivate --ids 3,5
//!
//! # Stat cards
//! admin-console --seed 7 dashboard
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use datagrid::SortDirection;

/// Food-delivery admin panel in the terminal.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "admin-console",
    author,
    version,
    about = "Admin panel for a home-cooked food delivery service",
    long_about = "Browse, search, sort and page through orders, users and restaurants, \
                  run bulk actions on selected rows and export what you see."
)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, short = 'c', env = "ADMIN_CONSOLE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Seed for deterministic demo data generation
    ///
    /// Using the same seed produces identical data
    #[arg(long, short = 's', env = "ADMIN_CONSOLE_SEED", global = true)]
    pub seed: Option<u64>,

    /// Output theme: unicode or ascii
    #[arg(long, env = "ADMIN_CONSOLE_THEME", global = true)]
    pub theme: Option<String>,

    /// Name of the signed-in admin
    #[arg(long, env = "ADMIN_CONSOLE_ADMIN", global = true)]
    pub admin: Option<String>,

    /// Enable verbose logging (repeat for more)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show one page of a table
    List(ListArgs),

    /// Show the dashboard stat cards
    Dashboard,

    /// Run a bulk action on selected rows
    Bulk(BulkArgs),

    /// Print the resolved configuration
    Config,
}

/// Which table to work on.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Orders,
    Users,
    Restaurants,
}

impl Resource {
    /// Plural noun used in messages.
    #[must_use]
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Orders => "orders",
            Self::Users => "users",
            Self::Restaurants => "restaurants",
        }
    }

    /// Noun agreeing with `count`: `1 user`, `3 users`.
    #[must_use]
    pub const fn count_noun(self, count: usize) -> &'static str {
        match (self, count) {
            (Self::Orders, 1) => "order",
            (Self::Users, 1) => "user",
            (Self::Restaurants, 1) => "restaurant",
            _ => self.noun(),
        }
    }
}

/// Output formats for `list`.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Text table of the current page
    #[default]
    Table,
    /// Every filtered row as CSV
    Csv,
    /// The current page with its pagination envelope
    Json,
}

/// Search, filter and sort flags shared by `list` and `bulk`.
#[derive(Parser, Debug, Clone, Default)]
pub struct QueryArgs {
    /// Free-text search across the table's columns
    #[arg(long)]
    pub search: Option<String>,

    /// Column filter as key=value (repeatable)
    #[arg(long = "filter", value_name = "KEY=VALUE", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,

    /// Sort as key or key:asc / key:desc
    #[arg(long, value_name = "KEY[:DIR]", value_parser = parse_sort)]
    pub sort: Option<(String, SortDirection)>,

    /// Raw list-endpoint query string, e.g. "page=2&limit=10&status=pending"
    ///
    /// Individual flags take precedence over it
    #[arg(long)]
    pub query: Option<String>,
}

/// Arguments for `list`.
#[derive(Parser, Debug, Clone)]
pub struct ListArgs {
    /// Table to show
    pub resource: Resource,

    #[command(flatten)]
    pub query: QueryArgs,

    /// Page to show (1-based)
    #[arg(long)]
    pub page: Option<usize>,

    /// Rows per page (1 to 100)
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Mark a row as selected by id (repeatable)
    #[arg(long = "select", value_name = "ID")]
    pub select: Vec<String>,

    /// Select every row matching the search and filters
    #[arg(long, conflicts_with = "select")]
    pub select_all: bool,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// Arguments for `bulk`.
#[derive(Parser, Debug, Clone)]
pub struct BulkArgs {
    /// Table to act on
    pub resource: Resource,

    /// Action name, e.g. activate, deactivate, delete, mark-delivered, cancel
    pub action: String,

    /// Comma-separated row ids
    #[arg(long, value_delimiter = ',', required_unless_present = "all")]
    pub ids: Vec<String>,

    /// Act on every row matching the search and filters
    #[arg(long, conflicts_with = "ids")]
    pub all: bool,

    #[command(flatten)]
    pub query: QueryArgs,
}

impl Cli {
    /// Parse command line arguments.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Create CLI from iterator (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if argument parsing fails.
    pub fn try_parse_from<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing filter key in `{raw}`"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

fn parse_sort(raw: &str) -> Result<(String, SortDirection), String> {
    let (key, direction) = match raw.split_once(':') {
        Some((key, dir)) => {
            let direction = SortDirection::parse(dir)
                .ok_or_else(|| format!("sort direction must be asc or desc, got `{dir}`"))?;
            (key, direction)
        }
        None => (raw, SortDirection::Asc),
    };
    let key = key.trim();
    if key.is_empty() {
        return Err("missing sort key".to_string());
    }
    Ok((key.to_string(), direction))
}
