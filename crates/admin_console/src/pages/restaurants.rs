//! Restaurants page. Read-only: it offers no bulk actions.

use std::collections::{BTreeSet, HashSet};

use datagrid::prelude::*;
use datagrid::{FilterOption, format};

use super::{ActionQueue, PageContext, TablePage, traced_callbacks};
use crate::cli::Resource;
use crate::data::Restaurant;

pub struct RestaurantsPage {
    grid: DataGrid<Restaurant>,
    context: PageContext,
    queue: ActionQueue,
}

impl RestaurantsPage {
    #[must_use]
    pub fn new(restaurants: Vec<Restaurant>, context: PageContext) -> Self {
        let cuisine_filter = cuisine_filter(&restaurants);
        let grid = DataGrid::new(columns(&context))
            .page_size(context.page_size)
            .callbacks(traced_callbacks(Resource::Restaurants))
            .filter_option(cuisine_filter)
            .filter_option(
                FilterOption::new("active", "Open")
                    .choice("true", "Open")
                    .choice("false", "Closed"),
            )
            .rows(restaurants);

        Self {
            grid,
            context,
            queue: ActionQueue::default(),
        }
    }
}

impl TablePage for RestaurantsPage {
    type Row = Restaurant;

    fn resource(&self) -> Resource {
        Resource::Restaurants
    }

    fn title(&self) -> &'static str {
        "Restaurants"
    }

    fn default_sort(&self) -> &'static str {
        "orders"
    }

    fn context(&self) -> &PageContext {
        &self.context
    }

    fn grid(&self) -> &DataGrid<Restaurant> {
        &self.grid
    }

    fn grid_mut(&mut self) -> &mut DataGrid<Restaurant> {
        &mut self.grid
    }

    fn queue(&self) -> &ActionQueue {
        &self.queue
    }

    fn apply_action(_: &str, _: &mut Vec<Restaurant>, _: &BTreeSet<String>) -> &'static str {
        "Updated"
    }
}

fn columns(context: &PageContext) -> Vec<Column<Restaurant>> {
    let star = if context.theme.unicode { "★" } else { "*" };
    vec![
        Column::with_accessor("id", "ID", |r: &Restaurant| Some(r.id.into()))
            .sortable()
            .align(Align::Right)
            .width(5),
        Column::with_accessor("name", "Name", |r: &Restaurant| Some((&r.name).into())).sortable(),
        Column::with_accessor("cuisine", "Cuisine", |r: &Restaurant| Some((&r.cuisine).into()))
            .sortable(),
        Column::with_accessor("rating", "Rating", |r: &Restaurant| Some(r.rating.into()))
            .sortable()
            .align(Align::Right)
            .render(move |_, r: &Restaurant, _| format!("{:.1} {star}", r.rating)),
        Column::with_accessor("active", "Open", |r: &Restaurant| Some(r.active.into()))
            .render(|_, r: &Restaurant, _| String::from(if r.active { "Open" } else { "Closed" })),
        Column::with_accessor("orders", "Orders", |r: &Restaurant| Some(r.orders.into()))
            .sortable()
            .align(Align::Right)
            .render(|_, r: &Restaurant, _| format::thousands(i64::from(r.orders))),
    ]
}

/// One choice per cuisine present, in first-seen order.
fn cuisine_filter(restaurants: &[Restaurant]) -> FilterOption {
    let mut seen = HashSet::new();
    restaurants
        .iter()
        .filter(|r| seen.insert(r.cuisine.as_str()))
        .fold(FilterOption::new("cuisine", "Cuisine"), |option, r| {
            option.choice(r.cuisine.as_str(), r.cuisine.as_str())
        })
}
