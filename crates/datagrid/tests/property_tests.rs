use datagrid::prelude::*;
use proptest::prelude::*;
use serde_json::{Value, json};

fn columns() -> Vec<Column<Value>> {
    vec![
        Column::new("id", "ID").sortable(),
        Column::new("name", "Name").sortable(),
        Column::new("score", "Score").sortable(),
    ]
}

fn row_strategy() -> impl Strategy<Value = Vec<(String, i64)>> {
    prop::collection::vec(("[a-cA-C]{0,4}", 0i64..5), 0..60)
}

fn build_rows(raw: &[(String, i64)]) -> Vec<Value> {
    raw.iter()
        .enumerate()
        .map(|(i, (name, score))| json!({"id": i, "name": name, "score": score}))
        .collect()
}

fn ids(rows: &[&Value]) -> Vec<u64> {
    rows.iter().map(|r| r["id"].as_u64().unwrap_or(u64::MAX)).collect()
}

proptest! {
    #[test]
    fn test_filter_is_subset_containing_term(raw in row_strategy(), term in "[a-cA-C]{0,2}") {
        let rows = build_rows(&raw);
        let mut grid = DataGrid::new(columns()).rows(rows.clone());
        grid.set_search_term(&term);
        let filtered = grid.filtered_rows();

        if term.is_empty() {
            prop_assert_eq!(ids(&filtered), (0..rows.len() as u64).collect::<Vec<_>>());
        }

        let needle = term.to_lowercase();
        let mut previous: Option<u64> = None;
        for row in &filtered {
            let id = row["id"].as_u64().unwrap_or(u64::MAX);
            prop_assert!(previous.is_none_or(|p| p < id), "filter must preserve input order");
            previous = Some(id);
            let hit = ["id", "name", "score"].iter().any(|key| {
                row.get(*key)
                    .map(|v| CellValue::from(v).search_text())
                    .is_some_and(|text| text.contains(&needle))
            });
            prop_assert!(hit);
        }
    }

    #[test]
    fn test_three_toggles_restore_order(raw in row_strategy()) {
        let mut grid = DataGrid::new(columns()).rows(build_rows(&raw));
        let before = ids(&grid.filtered_rows());
        grid.toggle_sort("score").unwrap();
        grid.toggle_sort("score").unwrap();
        grid.toggle_sort("score").unwrap();
        prop_assert_eq!(ids(&grid.filtered_rows()), before);
    }

    #[test]
    fn test_sort_is_stable(raw in row_strategy()) {
        let mut grid = DataGrid::new(columns()).rows(build_rows(&raw));
        grid.toggle_sort("score").unwrap();
        let asc = grid.filtered_rows();
        for pair in asc.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let (sa, sb) = (a["score"].as_i64(), b["score"].as_i64());
            prop_assert!(sa <= sb);
            if sa == sb {
                prop_assert!(a["id"].as_u64() < b["id"].as_u64());
            }
        }

        grid.toggle_sort("score").unwrap();
        let desc = grid.filtered_rows();
        for pair in desc.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let (sa, sb) = (a["score"].as_i64(), b["score"].as_i64());
            prop_assert!(sa >= sb);
            if sa == sb {
                prop_assert!(a["id"].as_u64() < b["id"].as_u64());
            }
        }
    }

    #[test]
    fn test_second_toggle_reverses_distinct_keys(n in 0usize..40) {
        let rows: Vec<Value> = (0..n).map(|i| json!({"id": i, "score": (i * 7) % 41})).collect();
        let mut grid = DataGrid::new(columns()).rows(rows);
        grid.toggle_sort("score").unwrap();
        let mut asc = ids(&grid.filtered_rows());
        grid.toggle_sort("score").unwrap();
        asc.reverse();
        prop_assert_eq!(ids(&grid.filtered_rows()), asc);
    }

    #[test]
    fn test_select_all_matches_filtered_view(raw in row_strategy(), term in "[a-c]{0,1}") {
        let mut grid = DataGrid::new(columns()).rows(build_rows(&raw));
        grid.set_search_term(&term);
        grid.select_all(true);
        let mut expected: Vec<RowId> = grid.filtered_rows().iter().map(|r| r.row_id()).collect();
        expected.sort();
        let selected: Vec<RowId> = grid.selection().iter().cloned().collect();
        prop_assert_eq!(selected, expected);

        grid.select_all(false);
        prop_assert!(grid.selection().is_empty());
        prop_assert_eq!(grid.check_state(), CheckState::Unchecked);
    }

    #[test]
    fn test_pages_partition_the_view(raw in row_strategy(), size in 1usize..=100) {
        let mut grid = DataGrid::new(columns()).rows(build_rows(&raw));
        grid.toggle_sort("name").unwrap();
        grid.set_page_size(size).unwrap();
        let all = ids(&grid.filtered_rows());
        let total = all.len();

        let mut joined = Vec::new();
        for page in 1..=grid.pagination().page_count() {
            grid.set_page(page);
            let view = grid.view();
            let expected_len = size.min(total.saturating_sub((page - 1) * size));
            prop_assert_eq!(view.rows.len(), expected_len);
            joined.extend(ids(&view.rows));
        }
        prop_assert_eq!(joined, all);
    }

    #[test]
    fn test_set_page_always_clamps(raw in row_strategy(), page in 0usize..500) {
        let mut grid = DataGrid::new(columns()).page_size(10).rows(build_rows(&raw));
        let shown = grid.set_page(page);
        prop_assert!(shown >= 1);
        prop_assert!(shown <= grid.pagination().page_count());
    }
}
