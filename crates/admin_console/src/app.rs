//! Command dispatch.
//!
//! Every table command goes through the same path as the panel's list
//! endpoints: the flags are turned into a query string, parsed into a
//! [`ListQuery`] and applied to the page's grid.

use datagrid::export::{self, ExportError};
use datagrid::{
    GridError, ListQuery, PageInfo, QueryError, QuerySchema, RowId, SortDirection, SortState,
};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::cli::{BulkArgs, Command, ListArgs, OutputFormat, QueryArgs, Resource};
use crate::config::Config;
use crate::data::generator::Dataset;
use crate::pages::{
    Dashboard, OrdersPage, PageContext, PageError, RestaurantsPage, TablePage, UsersPage,
};
use crate::render;
use crate::session::{Session, Theme};

/// Rows shown under the dashboard cards.
const RECENT_ORDERS: usize = 5;

/// Errors surfaced by a command.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Page(#[from] PageError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// The console with its generated data.
pub struct App {
    config: Config,
    dataset: Dataset,
    context: PageContext,
}

impl App {
    #[must_use]
    pub fn new(config: Config) -> Self {
        let dataset = Dataset::generate(config.seed);
        info!(
            seed = config.seed,
            orders = dataset.orders.len(),
            users = dataset.users.len(),
            restaurants = dataset.restaurants.len(),
            "Generated dataset"
        );
        let context = PageContext::new(
            Session::new(&config.admin),
            Theme::by_name(&config.theme),
            dataset.generated_at,
            config.page_size,
        );
        Self {
            config,
            dataset,
            context,
        }
    }

    /// Run one command and return what it prints.
    ///
    /// # Errors
    ///
    /// Returns an [`AppError`] when the query is invalid, a bulk action is
    /// refused or output cannot be produced.
    pub fn run(&self, command: &Command) -> Result<String, AppError> {
        match command {
            Command::List(args) => self.list(args),
            Command::Bulk(args) => self.bulk(args),
            Command::Dashboard => self.dashboard(),
            Command::Config => Ok(self.config.to_diagnostic_string()),
        }
    }

    fn list(&self, args: &ListArgs) -> Result<String, AppError> {
        match args.resource {
            Resource::Orders => self.list_page(self.orders_page(), args),
            Resource::Users => self.list_page(self.users_page(), args),
            Resource::Restaurants => self.list_page(self.restaurants_page(), args),
        }
    }

    fn bulk(&self, args: &BulkArgs) -> Result<String, AppError> {
        match args.resource {
            Resource::Orders => self.bulk_page(self.orders_page(), args),
            Resource::Users => self.bulk_page(self.users_page(), args),
            Resource::Restaurants => self.bulk_page(self.restaurants_page(), args),
        }
    }

    fn orders_page(&self) -> OrdersPage {
        OrdersPage::new(self.dataset.orders.clone(), self.context.clone())
    }

    fn users_page(&self) -> UsersPage {
        UsersPage::new(self.dataset.users.clone(), self.context.clone())
    }

    fn restaurants_page(&self) -> RestaurantsPage {
        RestaurantsPage::new(self.dataset.restaurants.clone(), self.context.clone())
    }

    fn list_page<P: TablePage>(&self, mut page: P, args: &ListArgs) -> Result<String, AppError> {
        let query = self.apply_query(&mut page, &args.query, args.page, args.page_size)?;

        if args.select_all {
            page.grid_mut().select_all(true);
        }
        select_ids(&mut page, &args.select);

        match args.format {
            OutputFormat::Table => Ok(format!(
                "{}\n\n{}",
                self.context.session.banner(),
                render::render_page(&page, self.config.max_column_width)
            )),
            OutputFormat::Csv => {
                let grid = page.grid();
                let rows = grid.export()?;
                Ok(export::to_csv(grid.columns(), &rows)?)
            }
            OutputFormat::Json => {
                let grid = page.grid();
                let view = grid.view();
                let mut selected: Vec<String> =
                    grid.selection().iter().map(ToString::to_string).collect();
                selected.sort();
                let body = json!({
                    "results": export::to_json_value(grid.columns(), &view.rows),
                    "pagination": PageInfo::from(&view.pagination),
                    "query": query.to_query_string(),
                    "selected": selected,
                });
                Ok(serde_json::to_string_pretty(&body)?)
            }
        }
    }

    fn bulk_page<P: TablePage>(&self, mut page: P, args: &BulkArgs) -> Result<String, AppError> {
        self.apply_query(&mut page, &args.query, None, None)?;

        if args.all {
            page.grid_mut().select_all(true);
        }
        select_ids(&mut page, &args.ids);

        let outcome = page.run_bulk(&args.action)?;
        Ok(format!(
            "{}\n{}: {}\n\n{}",
            self.context.session.banner(),
            outcome.summary,
            outcome.ids.join(", "),
            render::render_page(&page, self.config.max_column_width)
        ))
    }

    fn dashboard(&self) -> Result<String, AppError> {
        let dashboard = Dashboard::new(
            &self.dataset.orders,
            &self.dataset.users,
            self.dataset.generated_at,
        );
        let theme = &self.context.theme;

        let mut recent = self.orders_page();
        let grid = recent.grid_mut();
        grid.set_page_size(RECENT_ORDERS)?;
        grid.set_sort(Some(SortState {
            key: "created_at".to_string(),
            direction: SortDirection::Desc,
        }))?;

        Ok(format!(
            "{}\n\n{}\n\nRecent orders\n{}",
            self.context.session.banner(),
            render::render_cards(&dashboard.cards(), theme),
            render::render_view(&recent.grid().view(), theme, self.config.max_column_width)
        ))
    }

    /// Parse the flags into a list query and apply it to the page's grid.
    fn apply_query<P: TablePage>(
        &self,
        page: &mut P,
        args: &QueryArgs,
        page_number: Option<usize>,
        page_size: Option<usize>,
    ) -> Result<ListQuery, AppError> {
        let raw = build_query(args, page_number, page_size, self.config.page_size);
        let schema = QuerySchema::for_grid(page.grid(), page.default_sort());
        let query = ListQuery::from_query_string(&raw, &schema)?;
        debug!(resource = page.resource().noun(), query = %raw, "Applying list query");
        query.apply(page.grid_mut())?;
        Ok(query)
    }
}

/// Select rows by id, warning about ids the current view does not contain.
fn select_ids<P: TablePage>(page: &mut P, ids: &[String]) {
    for id in ids {
        let id = RowId::from(id.trim());
        let grid = page.grid_mut();
        if !grid.select_row(&id, true) && !grid.selection().contains(&id) {
            warn!(row = %id, resource = page.resource().noun(), "No such row in the filtered view");
        }
    }
}

/// Build the list-endpoint query string for the flags.
///
/// The configured page size comes first, then the raw `--query`, then the
/// individual flags; the last occurrence of a key wins when parsed.
#[must_use]
pub fn build_query(
    args: &QueryArgs,
    page: Option<usize>,
    page_size: Option<usize>,
    default_limit: usize,
) -> String {
    let mut parts = vec![format!("limit={default_limit}")];
    if let Some(raw) = &args.query {
        let raw = raw.trim().trim_start_matches('?');
        if !raw.is_empty() {
            parts.push(raw.to_string());
        }
    }
    let mut push = |key: &str, value: &str| {
        parts.push(format!(
            "{}={}",
            urlencoding::encode(key),
            urlencoding::encode(value)
        ));
    };
    if let Some(page) = page {
        push("page", &page.to_string());
    }
    if let Some(size) = page_size {
        push("limit", &size.to_string());
    }
    if let Some(search) = &args.search {
        push("search", search);
    }
    if let Some((key, direction)) = &args.sort {
        push("sort_by", key);
        push("sort_order", &direction.to_string());
    }
    for (key, value) in &args.filters {
        push(key, value);
    }
    parts.join("&")
}
