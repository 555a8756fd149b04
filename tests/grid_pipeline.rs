//! End-to-end tests of the grid state engine pipeline: filter -> sort ->
//! page, with focus, selection, and geometry overlays.

use pretty_assertions::assert_eq;
use serde_json::json;
use tabgrid::grid::{ColumnSpec, FocusCoord, GridState, NavDirection, Row};
use tabgrid::services::export::csv_string;

fn row(pairs: &[(&str, serde_json::Value)]) -> Row {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn people() -> GridState {
    let columns = vec![
        ColumnSpec::new("name").with_display_name("Name"),
        ColumnSpec::new("age").with_display_name("Age").with_sortable(true),
        ColumnSpec::new("city").with_display_name("City"),
    ];
    let rows = vec![
        row(&[("name", json!("Bo")), ("age", json!(30)), ("city", json!("Oslo"))]),
        row(&[("name", json!("Al")), ("age", json!(25)), ("city", json!("Rome"))]),
        row(&[("name", json!("Cy")), ("age", json!(25)), ("city", json!("Oslo"))]),
        row(&[("name", json!("Di")), ("age", json!(40)), ("city", json!("Rome"))]),
    ];
    GridState::new(columns, rows).unwrap()
}

fn page_names(grid: &GridState) -> Vec<String> {
    grid.view()
        .rows
        .iter()
        .map(|entry| entry.row["name"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn sort_toggle_reverses_groups_but_not_ties() {
    let mut grid = people();

    grid.toggle_sort(1);
    // Ascending: the 25s keep raw order (Al before Cy).
    assert_eq!(page_names(&grid), vec!["Al", "Cy", "Bo", "Di"]);

    grid.toggle_sort(1);
    // Descending reverses the groups; Al still precedes Cy.
    assert_eq!(page_names(&grid), vec!["Di", "Bo", "Al", "Cy"]);

    grid.toggle_sort(1);
    assert_eq!(page_names(&grid), vec!["Al", "Cy", "Bo", "Di"]);
}

#[test]
fn pipeline_counts_stay_ordered() {
    let columns = vec![ColumnSpec::new("n").with_sortable(true)];
    let rows: Vec<Row> = (0..137).map(|i| row(&[("n", json!(i % 10))])).collect();
    let mut grid = GridState::new(columns, rows).unwrap();
    grid.set_page_size(12);
    grid.toggle_sort(0);
    grid.toggle_filter_value(0, "3");
    grid.toggle_filter_value(0, "7");
    grid.set_global_filter("7");

    let view = grid.view();
    assert!(view.row_count() <= view.filtered_rows);
    assert!(view.filtered_rows <= view.total_rows);
    assert!(view.page >= 1 && view.page <= view.page_count);
}

#[test]
fn page_clamps_when_filtered_count_drops() {
    let columns = vec![ColumnSpec::new("kind"), ColumnSpec::new("n")];
    let rows: Vec<Row> = (0..25)
        .map(|i| {
            let kind = if i < 5 { "rare" } else { "common" };
            row(&[("kind", json!(kind)), ("n", json!(i))])
        })
        .collect();
    let mut grid = GridState::new(columns, rows).unwrap();
    grid.set_page_size(10);
    grid.set_page(3);
    assert_eq!(grid.page().current_page, 3);

    // Filtered count drops from 25 to 5: the engine clamps to page 1
    // instead of rendering an empty page.
    grid.toggle_filter_value(0, "rare");
    assert_eq!(grid.view().filtered_rows, 5);
    assert_eq!(grid.page().current_page, 1);
    assert_eq!(grid.view().row_count(), 5);
}

#[test]
fn focus_clears_instead_of_dangling() {
    let columns = vec![ColumnSpec::new("n")];
    let rows: Vec<Row> = (0..5).map(|i| row(&[("n", json!(i))])).collect();
    let mut grid = GridState::new(columns, rows).unwrap();

    grid.focus_cell(2, 0);
    assert_eq!(grid.focus().coord(), Some(FocusCoord { row: 2, col: 0 }));

    grid.set_rows((0..2).map(|i| row(&[("n", json!(i))])).collect());
    assert_eq!(grid.focus().coord(), None);

    // Navigation while unfocused stays unfocused.
    grid.move_focus(NavDirection::Down);
    assert_eq!(grid.focus().coord(), None);
}

#[test]
fn focus_navigation_clamps_to_page_bounds() {
    let mut grid = people();
    grid.set_page_size(2);
    grid.focus_cell(0, 0);

    for _ in 0..5 {
        grid.move_focus(NavDirection::Down);
        grid.move_focus(NavDirection::Right);
    }
    // Two page rows and three visible columns.
    assert_eq!(grid.focus().coord(), Some(FocusCoord { row: 1, col: 2 }));

    // Hiding a column shrinks the bounds; the dangling focus clears.
    grid.set_column_visible(2, false);
    assert_eq!(grid.focus().coord(), None);
}

#[test]
fn selection_survives_filter_and_relaxation() {
    let mut grid = people();
    grid.toggle_selection(1); // Al

    grid.set_global_filter("oslo");
    // Al is filtered out of view but stays selected.
    assert_eq!(grid.view().filtered_rows, 2);
    assert!(grid.selection().contains(1));

    grid.clear_filters();
    assert!(grid.selection().contains(1));
    assert_eq!(grid.selection().len(), 1);
}

#[test]
fn facet_select_all_is_idempotent() {
    let mut grid = people();
    grid.toggle_filter_value(2, "Rome");

    let before = grid.filter_options(0);
    grid.select_all_filter(0);
    let after = grid.filter_options(0);
    assert_eq!(before, after);
    // And the selection equals exactly the option list.
    let accepted = grid.filter().accepted(0).unwrap();
    assert_eq!(accepted.len(), after.len());
    assert!(after.iter().all(|o| accepted.contains(o)));
}

#[test]
fn resize_clamps_for_any_delta() {
    let mut grid = people();
    for delta in [i32::MIN / 2, -1_000, -1, 0, 1, 1_000, i32::MAX / 2] {
        grid.resize_column_by(0, delta);
        let col = &grid.columns()[0];
        assert!(col.min_width <= col.width && col.width <= col.max_width);
    }
}

#[test]
fn export_covers_filtered_rows_in_sort_order() {
    let mut grid = people();
    grid.set_page_size(2);
    grid.toggle_sort(1);
    grid.set_global_filter("rome");

    let table = grid.export_table();
    assert_eq!(table[0], vec!["Name", "Age", "City"]);
    // Both Rome rows, sorted by age, despite the 2-row page.
    assert_eq!(table.len(), 3);
    assert_eq!(table[1][0], "Al");
    assert_eq!(table[2][0], "Di");

    let csv = csv_string(&table).unwrap();
    assert_eq!(
        csv,
        "Name,Age,City\nAl,25,Rome\nDi,40,Rome\n"
    );
}

#[test]
fn interleaved_transitions_stay_consistent() {
    // Arbitrary interleaving of filter, sort, page, visibility, and focus
    // actions must never produce an inconsistent view.
    let columns = vec![
        ColumnSpec::new("a").with_sortable(true),
        ColumnSpec::new("b").with_sortable(true),
    ];
    let rows: Vec<Row> = (0..60)
        .map(|i| row(&[("a", json!(i % 7)), ("b", json!(format!("v{}", i % 13)))]))
        .collect();
    let mut grid = GridState::new(columns, rows).unwrap();
    grid.set_page_size(7);

    grid.toggle_sort(0);
    grid.set_page(5);
    grid.toggle_filter_value(1, "v3");
    grid.focus_cell(0, 1);
    grid.toggle_sort(1);
    grid.set_global_filter("v");
    grid.set_column_visible(0, false);
    grid.toggle_filter_value(1, "v5");
    grid.prev_page();

    let view = grid.view();
    assert!(view.row_count() <= view.filtered_rows);
    assert!(view.page <= view.page_count);
    if let Some(coord) = grid.focus().coord() {
        assert!(coord.row < view.row_count());
        assert!(coord.col < view.visible_column_count());
    }
}
