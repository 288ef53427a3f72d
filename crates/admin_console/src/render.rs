//! Plain-text rendering of pages and stat cards.
//!
//! Widths are measured in terminal columns with `unicode-width`, so names
//! with wide glyphs still line up.

use datagrid::{Align, CheckState, GridView, SortDirection};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::pages::{StatCard, TablePage};
use crate::session::Theme;

/// Gap between columns.
const GAP: &str = "  ";

/// Message shown in place of rows when nothing matches.
pub const EMPTY_MESSAGE: &str = "No records found";

/// Truncate `text` to `width` columns, ending with `ellipsis` when cut.
#[must_use]
pub fn truncate(text: &str, width: usize, ellipsis: &str) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let budget = width.saturating_sub(ellipsis.width());
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    if width >= ellipsis.width() {
        out.push_str(ellipsis);
    }
    out
}

/// Pad `text` to exactly `width` columns.
#[must_use]
pub fn pad(text: &str, width: usize, align: Align) -> String {
    let fill = width.saturating_sub(text.width());
    match align {
        Align::Left => format!("{text}{}", " ".repeat(fill)),
        Align::Right => format!("{}{text}", " ".repeat(fill)),
        Align::Center => {
            let left = fill / 2;
            format!("{}{text}{}", " ".repeat(left), " ".repeat(fill - left))
        }
    }
}

/// Render a grid view as a table with a checkbox column and footer.
#[must_use]
pub fn render_view<R>(view: &GridView<'_, R>, theme: &Theme, max_width: usize) -> String {
    let columns = view.columns();
    let cells = view.render();
    let ellipsis = theme.ellipsis();

    let headers: Vec<String> = columns
        .iter()
        .map(|c| match view.sort_direction(c.key()) {
            Some(direction) => format!(
                "{} {}",
                c.title(),
                theme.sort_indicator(direction == SortDirection::Asc)
            ),
            None => c.title().to_string(),
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            column.get_width().unwrap_or_else(|| {
                let content = cells.iter().map(|row| row[i].text().width()).max();
                content
                    .unwrap_or(0)
                    .max(headers[i].width())
                    .min(max_width)
            })
        })
        .collect();

    let marker_width = CheckState::Unchecked.marker().width();
    let mut lines = Vec::with_capacity(cells.len() + 4);

    let header_cells = headers
        .iter()
        .zip(columns)
        .zip(&widths)
        .map(|((h, c), &w)| pad(&truncate(h, w, ellipsis), w, c.get_align()));
    lines.push(join_line(view.check_state.marker(), header_cells));

    let rule: Vec<String> = widths
        .iter()
        .map(|&w| theme.rule().to_string().repeat(w))
        .collect();
    lines.push(join_line(
        &theme.rule().to_string().repeat(marker_width),
        rule.into_iter(),
    ));

    if let Some(error) = &view.status.error {
        let retry = if view.status.retry_available() {
            " (refresh to retry)"
        } else {
            ""
        };
        lines.push(format!("Error: {error}{retry}"));
    } else if view.status.loading {
        lines.push(format!("Loading{ellipsis}"));
    } else if view.is_empty() {
        lines.push(EMPTY_MESSAGE.to_string());
    }

    for (index, row) in cells.iter().enumerate() {
        let marker = if view.is_selected(index) {
            CheckState::Checked.marker()
        } else {
            CheckState::Unchecked.marker()
        };
        let row_cells = row
            .iter()
            .zip(columns)
            .zip(&widths)
            .map(|((cell, c), &w)| pad(&truncate(cell.text(), w, ellipsis), w, c.get_align()));
        lines.push(join_line(marker, row_cells));
    }

    lines.push(footer(view, theme));
    lines.join("\n")
}

/// `Page p of n · N rows`, plus the selection count when rows are selected.
#[must_use]
pub fn footer<R>(view: &GridView<'_, R>, theme: &Theme) -> String {
    let total = view.pagination.total();
    let sep = theme.separator();
    let mut text = format!(
        "Page {} of {}{sep}{total} {}",
        view.pagination.page(),
        view.pagination.page_count(),
        if total == 1 { "row" } else { "rows" }
    );
    let selected = view.selected_count();
    if selected > 0 {
        text.push_str(&format!("{sep}{selected} selected"));
    }
    text
}

/// Render a page: title, active search and filters, then the table.
#[must_use]
pub fn render_page<P: TablePage>(page: &P, max_width: usize) -> String {
    let theme = &page.context().theme;
    let grid = page.grid();

    let mut out = vec![page.title().to_string()];
    let mut criteria = Vec::new();
    if !grid.search_term().is_empty() {
        criteria.push(format!("search \"{}\"", grid.search_term()));
    }
    criteria.extend(grid.filters().columns().map(|(k, v)| format!("{k}={v}")));
    if !criteria.is_empty() {
        out.push(format!("Filtered by {}", criteria.join(theme.separator())));
    }
    out.push(render_view(&grid.view(), theme, max_width));
    out.join("\n")
}

/// Render the dashboard cards, one per line.
#[must_use]
pub fn render_cards(cards: &[StatCard], theme: &Theme) -> String {
    let title_width = cards.iter().map(|c| c.title.width()).max().unwrap_or(0);
    let value_width = cards.iter().map(|c| c.value.width()).max().unwrap_or(0);

    let mut lines = vec![
        "Dashboard".to_string(),
        theme
            .rule()
            .to_string()
            .repeat(title_width + value_width + GAP.len()),
    ];
    for card in cards {
        lines.push(
            format!(
                "{}{GAP}{}{GAP}{}",
                pad(card.title, title_width, Align::Left),
                pad(&card.value, value_width, Align::Right),
                card.detail
            )
            .trim_end()
            .to_string(),
        );
    }
    lines.join("\n")
}

fn join_line<I>(marker: &str, cells: I) -> String
where
    I: Iterator<Item = String>,
{
    let mut line = marker.to_string();
    for cell in cells {
        line.push_str(GAP);
        line.push_str(&cell);
    }
    line.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use datagrid::prelude::*;
    use serde_json::{Value, json};

    fn grid(rows: Vec<Value>) -> DataGrid<Value> {
        DataGrid::new(vec![
            Column::new("id", "ID").sortable().align(Align::Right),
            Column::new("name", "Name").sortable(),
        ])
        .page_size(2)
        .rows(rows)
    }

    #[test]
    fn truncate_by_display_width() {
        assert_eq!(truncate("Hello World", 5, "…"), "Hell…");
        assert_eq!(truncate("Hello", 5, "…"), "Hello");
        assert_eq!(truncate("ab", 0, "…"), "");
        // Wide glyphs take two columns each.
        assert_eq!(truncate("日本語テキスト", 6, "…"), "日本…");
    }

    #[test]
    fn pad_aligns() {
        assert_eq!(pad("7", 3, Align::Right), "  7");
        assert_eq!(pad("7", 3, Align::Left), "7  ");
        assert_eq!(pad("7", 3, Align::Center), " 7 ");
        assert_eq!(pad("toolong", 3, Align::Left), "toolong");
    }

    #[test]
    fn table_with_sort_and_selection() {
        let mut grid = grid(vec![
            json!({"id": 1, "name": "Lamprais"}),
            json!({"id": 2, "name": "Hoppers"}),
            json!({"id": 3, "name": "Kottu"}),
        ]);
        grid.toggle_sort("name").unwrap();
        grid.select_row(&RowId::from("2"), true);

        let text = render_view(&grid.view(), &Theme::unicode(), 20);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "[-]  ID  Name ▲");
        assert_eq!(lines[1], "───  ──  ───────");
        assert_eq!(lines[2], "[x]   2  Hoppers");
        assert_eq!(lines[3], "[ ]   3  Kottu");
        assert_eq!(lines[4], "Page 1 of 2 · 3 rows · 1 selected");
    }

    #[test]
    fn ascii_theme_and_truncation() {
        let mut grid = grid(vec![json!({"id": 1, "name": "Chicken kottu with cheese"})]);
        grid.toggle_sort("id").unwrap();
        grid.toggle_sort("id").unwrap();
        let text = render_view(&grid.view(), &Theme::ascii(), 8);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "[ ]  ID v  Name");
        assert_eq!(lines[1], "---  ----  --------");
        assert_eq!(lines[2], "[ ]     1  Chicken~");
        assert_eq!(lines[3], "Page 1 of 1 | 1 row");
    }

    #[test]
    fn empty_placeholder() {
        let grid = grid(Vec::new());
        let text = render_view(&grid.view(), &Theme::unicode(), 20);
        assert!(text.contains(EMPTY_MESSAGE));
        assert!(text.ends_with("Page 1 of 1 · 0 rows"));
    }

    #[test]
    fn error_and_loading_states() {
        let mut grid = grid(Vec::new());
        grid.set_loading(true);
        let text = render_view(&grid.view(), &Theme::unicode(), 20);
        assert!(text.contains("Loading…"));

        grid.set_error(Some("connection refused".into()));
        let text = render_view(&grid.view(), &Theme::unicode(), 20);
        assert!(text.contains("Error: connection refused"));
        assert!(!text.contains("retry"));

        grid.set_loading(false);
        let text = render_view(&grid.view(), &Theme::unicode(), 20);
        assert!(text.contains("Error: connection refused (refresh to retry)"));
        assert!(!text.contains(EMPTY_MESSAGE));
    }

    #[test]
    fn cards_line_up() {
        let cards = vec![
            StatCard {
                title: "Total orders",
                value: "240".into(),
                detail: "+5.0% vs last week".into(),
            },
            StatCard {
                title: "Revenue",
                value: "LKR 1,500.00".into(),
                detail: String::new(),
            },
        ];
        let text = render_cards(&cards, &Theme::ascii());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Dashboard");
        assert_eq!(lines[2], "Total orders           240  +5.0% vs last week");
        assert_eq!(lines[3], "Revenue       LKR 1,500.00");
    }
}
