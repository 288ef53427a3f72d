//! Integration tests for the grid engine through its public API.

use std::sync::{Arc, Mutex};

use datagrid::export;
use datagrid::prelude::*;
use datagrid::{ExportFormat, MISSING_PLACEHOLDER, RENDER_ERROR_MARKER};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Debug, Clone, Serialize)]
struct Order {
    id: u32,
    customer: String,
    status: &'static str,
    total: f64,
}

impl Record for Order {
    fn id(&self) -> Option<String> {
        Some(self.id.to_string())
    }
}

fn orders(n: u32) -> Vec<Order> {
    let statuses = ["pending", "preparing", "delivered", "cancelled"];
    (1..=n)
        .map(|i| Order {
            id: i,
            customer: format!("Customer {}", (i * 7) % 11),
            status: statuses[(i as usize) % statuses.len()],
            total: f64::from(i) * 150.0,
        })
        .collect()
}

fn order_columns() -> Vec<Column<Order>> {
    vec![
        Column::with_accessor("id", "Order", |o: &Order| Some(o.id.into())).sortable(),
        Column::with_accessor("customer", "Customer", |o: &Order| Some((&o.customer).into()))
            .sortable(),
        Column::with_accessor("status", "Status", |o: &Order| Some(o.status.into())),
        Column::with_accessor("total", "Total", |o: &Order| Some(o.total.into()))
            .sortable()
            .align(Align::Right),
    ]
}

fn ids<R: Record>(rows: &[&R]) -> Vec<String> {
    rows.iter().map(|r| r.row_id().to_string()).collect()
}

#[test]
fn test_name_sort_example() {
    let mut grid = DataGrid::new(vec![
        Column::new("id", "ID"),
        Column::new("name", "Name").sortable(),
        Column::new("age", "Age"),
    ])
    .search_scope(SearchScope::Content)
    .rows(vec![
        json!({"id": 1, "name": "B", "age": 30}),
        json!({"id": 2, "name": "A", "age": 25}),
    ]);

    grid.set_search_term("a");
    assert_eq!(grid.view().total_filtered, 2);

    grid.toggle_sort("name").unwrap();
    assert_eq!(ids(&grid.filtered_rows()), vec!["2", "1"]);
    grid.toggle_sort("name").unwrap();
    assert_eq!(ids(&grid.filtered_rows()), vec!["1", "2"]);
    grid.toggle_sort("name").unwrap();
    assert_eq!(grid.sort(), None);
    assert_eq!(ids(&grid.filtered_rows()), vec!["1", "2"]);
}

#[test]
fn test_column_scope_search_ignores_keys() {
    let mut grid = DataGrid::new(vec![Column::new("name", "Name")]).rows(vec![
        json!({"id": 1, "name": "B", "age": 30}),
        json!({"id": 2, "name": "A", "age": 25}),
    ]);
    grid.set_search_term("a");
    assert_eq!(ids(&grid.filtered_rows()), vec!["2"]);
}

#[test]
fn test_pages_of_23_rows() {
    let mut grid = DataGrid::new(order_columns()).page_size(10).rows(orders(23));
    let mut lengths = Vec::new();
    let mut seen = Vec::new();
    for page in 1..=grid.pagination().page_count() {
        grid.set_page(page);
        let view = grid.view();
        lengths.push(view.rows.len());
        seen.extend(view.rows.iter().map(|o| o.id));
    }
    assert_eq!(lengths, vec![10, 10, 3]);
    assert_eq!(seen, (1..=23).collect::<Vec<_>>());
}

#[test]
fn test_empty_collection_view() {
    let grid: DataGrid<Order> = DataGrid::new(order_columns());
    let view = grid.view();
    assert!(view.is_empty());
    assert_eq!(view.pagination.page(), 1);
    assert_eq!(view.check_state, CheckState::Unchecked);
    assert!(grid.export().unwrap().is_empty());
}

#[test]
fn test_select_all_covers_filtered_view_across_pages() {
    let mut grid = DataGrid::new(order_columns()).page_size(5).rows(orders(40));
    grid.set_column_filter("status", "pending").unwrap();
    assert_eq!(grid.view().total_filtered, 10);

    grid.select_all(true);
    assert_eq!(grid.selection().len(), 10);
    assert_eq!(grid.check_state(), CheckState::Checked);
    assert!(grid.selected_rows().iter().all(|o| o.status == "pending"));

    grid.select_row(&RowId::from("4"), false);
    assert_eq!(grid.check_state(), CheckState::Indeterminate);
    assert_eq!(grid.view().check_state.aria(), "mixed");

    grid.select_all(false);
    assert!(grid.selection().is_empty());
}

#[test]
fn test_clearing_filters_keeps_pruned_selection() {
    let mut grid = DataGrid::new(order_columns()).rows(orders(12));
    grid.select_all(true);
    grid.set_column_filter("status", "delivered").unwrap();
    assert_eq!(grid.selection().len(), 3);
    grid.clear_column_filters();
    assert_eq!(grid.view().total_filtered, 12);
    assert_eq!(grid.selection().len(), 3);
}

#[test]
fn test_sort_keeps_selection_by_id() {
    let mut grid = DataGrid::new(order_columns()).rows(orders(5));
    grid.select_row(&RowId::from("2"), true);
    grid.toggle_sort("total").unwrap();
    grid.toggle_sort("total").unwrap();
    let view = grid.view();
    let selected: Vec<u32> = (0..view.rows.len())
        .filter(|&i| view.is_selected(i))
        .map(|i| view.rows[i].id)
        .collect();
    assert_eq!(selected, vec![2]);
    assert_eq!(view.sort_direction("total"), Some(SortDirection::Desc));
    assert_eq!(view.sort_direction("id"), None);
}

#[test]
fn test_bulk_actions() {
    let handled = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&handled);
    let mut grid = DataGrid::new(order_columns())
        .rows(orders(8))
        .bulk_action(
            BulkAction::new("Cancel", move |rows: &[&Order]| {
                sink.lock().unwrap().extend(rows.iter().map(|o| o.id));
            })
            .variant(ActionVariant::Danger)
            .disabled_when(|rows| rows.iter().any(|o| o.status == "delivered")),
        );

    assert_eq!(
        grid.run_bulk_action("Cancel"),
        Err(GridError::EmptySelection("Cancel".into()))
    );
    assert_eq!(
        grid.run_bulk_action("Archive"),
        Err(GridError::UnknownAction("Archive".into()))
    );

    grid.select_row(&RowId::from("2"), true);
    assert_eq!(
        grid.run_bulk_action("Cancel"),
        Err(GridError::ActionDisabled("Cancel".into()))
    );
    assert!(handled.lock().unwrap().is_empty());

    grid.select_row(&RowId::from("2"), false);
    grid.select_row(&RowId::from("5"), true);
    grid.select_row(&RowId::from("1"), true);
    assert_eq!(grid.run_bulk_action("Cancel"), Ok(2));
    assert_eq!(*handled.lock().unwrap(), vec![1, 5]);
}

#[test]
fn test_export_sends_all_filtered_sorted_rows() {
    let exported = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&exported);
    let mut grid = DataGrid::new(order_columns())
        .page_size(2)
        .rows(orders(10))
        .callbacks(GridCallbacks::new().on_export(move |rows: &[&Order]| {
            sink.lock().unwrap().extend(rows.iter().map(|o| o.id));
        }));
    grid.set_column_filter("status", "preparing").unwrap();
    grid.toggle_sort("id").unwrap();
    grid.toggle_sort("id").unwrap();

    let rows = grid.export().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(*exported.lock().unwrap(), vec![9, 5, 1]);

    let csv = export::export(ExportFormat::Csv, grid.columns(), &rows).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("Order,Customer,Status,Total"));
    assert_eq!(lines.next(), Some("9,Customer 8,preparing,1350"));
}

#[test]
fn test_page_size_change() {
    let sizes = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&sizes);
    let mut grid = DataGrid::new(order_columns())
        .rows(orders(120))
        .callbacks(GridCallbacks::new().on_page_size_change(move |size| {
            sink.lock().unwrap().push(size);
        }));
    grid.set_page(4);
    grid.set_page_size(50).unwrap();
    assert_eq!(grid.pagination().page(), 1);
    assert_eq!(grid.pagination().page_count(), 3);
    assert_eq!(
        grid.set_page_size(500),
        Err(GridError::InvalidPageSize { size: 500, max: 100 })
    );
    assert_eq!(*sizes.lock().unwrap(), vec![50]);
}

#[test]
fn test_render_containment_and_placeholder() {
    let grid = DataGrid::new(vec![
        Column::new("id", "ID"),
        Column::new("chef", "Chef"),
        Column::new("total", "Total").render(|value, _, _| {
            let amount = value.as_f64().expect("numeric total");
            format!("LKR {amount:.2}")
        }),
    ])
    .rows(vec![
        json!({"id": 1, "chef": "Nimal", "total": 1200}),
        json!({"id": 2, "total": "n/a"}),
    ]);

    let cells = grid.view().render();
    assert_eq!(cells[0][2].text(), "LKR 1200.00");
    assert_eq!(cells[1][1].text(), MISSING_PLACEHOLDER);
    assert_eq!(cells[1][2].text(), RENDER_ERROR_MARKER);
    assert_eq!(cells[1][0].text(), "2");
}

#[test]
fn test_opaque_rows_without_id_select_by_content() {
    let mut grid: DataGrid<Value> =
        DataGrid::new(vec![Column::new("name", "Name")]).rows(vec![
            json!({"name": "Hoppers"}),
            json!({"name": "Kottu"}),
        ]);
    let kottu = grid.all_rows()[1].row_id();
    assert!(grid.select_row(&kottu, true));
    assert_eq!(grid.selected_rows(), vec![&json!({"name": "Kottu"})]);
}

#[test]
fn test_identical_opaque_rows_check_all() {
    let mut grid: DataGrid<Value> =
        DataGrid::new(vec![Column::new("name", "Name")]).rows(vec![
            json!({"name": "Same"}),
            json!({"name": "Same"}),
            json!({"name": "Other"}),
        ]);
    grid.select_all(true);
    assert_eq!(grid.selected_rows().len(), 3);
    assert_eq!(grid.check_state(), CheckState::Checked);

    let view = grid.view();
    assert_eq!(view.check_state, CheckState::Checked);
    assert_eq!(view.selected_count(), 3);

    // Both copies share an id, so unchecking one unchecks the other.
    grid.select_all(false);
    let same = grid.all_rows()[0].row_id();
    grid.select_row(&same, true);
    assert_eq!(grid.selected_rows().len(), 2);
    assert_eq!(grid.check_state(), CheckState::Indeterminate);
}
