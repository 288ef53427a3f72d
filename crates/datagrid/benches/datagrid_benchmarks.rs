#![forbid(unsafe_code)]

//! Benchmarks for grid re-derivation, paging and export.

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use datagrid::export;
use datagrid::prelude::*;
use serde::Serialize;

#[derive(Clone, Serialize)]
struct BenchOrder {
    id: usize,
    customer: String,
    status: &'static str,
    total: f64,
}

impl Record for BenchOrder {
    fn id(&self) -> Option<String> {
        Some(self.id.to_string())
    }
}

#[allow(clippy::cast_precision_loss)]
fn build_orders(count: usize) -> Vec<BenchOrder> {
    let statuses = ["pending", "preparing", "delivered", "cancelled"];
    (0..count)
        .map(|i| BenchOrder {
            id: i,
            customer: format!("Customer {}", (i * 31) % 997),
            status: statuses[i % statuses.len()],
            total: (i % 500) as f64 * 12.5,
        })
        .collect()
}

fn build_columns() -> Vec<Column<BenchOrder>> {
    vec![
        Column::with_accessor("id", "Order", |o: &BenchOrder| Some(o.id.into())).sortable(),
        Column::with_accessor("customer", "Customer", |o: &BenchOrder| {
            Some((&o.customer).into())
        })
        .sortable(),
        Column::with_accessor("status", "Status", |o: &BenchOrder| Some(o.status.into())),
        Column::with_accessor("total", "Total", |o: &BenchOrder| Some(o.total.into())).sortable(),
    ]
}

fn bench_derive(c: &mut Criterion) {
    let mut group = c.benchmark_group("datagrid/derive");

    for count in [100, 1_000, 10_000] {
        let orders = build_orders(count);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("search", count), &orders, |b, orders| {
            b.iter_batched(
                || DataGrid::new(build_columns()).rows(orders.clone()),
                |mut grid| {
                    grid.set_search_term("customer 4");
                    let filtered = grid.view().total_filtered;
                    black_box(filtered)
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("sort", count), &orders, |b, orders| {
            b.iter_batched(
                || DataGrid::new(build_columns()).rows(orders.clone()),
                |mut grid| {
                    let _ = grid.toggle_sort("customer");
                    let shown = grid.view().rows.len();
                    black_box(shown)
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_paging(c: &mut Criterion) {
    let mut group = c.benchmark_group("datagrid/paging");
    let mut grid = DataGrid::new(build_columns()).rows(build_orders(10_000));
    let _ = grid.toggle_sort("total");

    group.bench_function("walk_pages", |b| {
        b.iter(|| {
            let pages = grid.pagination().page_count();
            for page in 1..=pages {
                grid.set_page(page);
                black_box(grid.view().rows.len());
            }
        });
    });

    group.bench_function("render_page", |b| {
        b.iter(|| black_box(grid.view().render()));
    });

    group.finish();
}

fn bench_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("datagrid/export");
    let grid = DataGrid::new(build_columns()).rows(build_orders(5_000));

    group.bench_function("csv_5000", |b| {
        b.iter(|| {
            let rows = grid.filtered_rows();
            black_box(export::to_csv(grid.columns(), &rows).ok())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_derive, bench_paging, bench_export);
criterion_main!(benches);
