//! The owned grid state and its transition functions.
//!
//! Every user action maps to exactly one method here; each call mutates the
//! state synchronously, re-validates the pipeline invariants (page clamp,
//! focus invalidation), and emits the corresponding [`GridEvent`]. Derived
//! views are recomputed from scratch through [`GridState::view`], never
//! cached, so no transition can observe stale intermediate state.

use crate::grid::column::{self, Column, ColumnSpec, AUTOSIZE_WIDTH, DEFAULT_WIDTH};
use crate::grid::events::GridEvent;
use crate::grid::filter::FilterState;
use crate::grid::focus::{FocusState, NavDirection};
use crate::grid::page::PageState;
use crate::grid::selection::SelectionSet;
use crate::grid::sort::{sort_ids, SortDirection, SortState};
use crate::grid::view::{PageView, RowEntry};
use crate::grid::{Row, RowId};
use color_eyre::eyre::bail;
use color_eyre::Result;
use tokio::sync::mpsc::UnboundedSender;

/// Grid state engine: owns the canonical column list, the raw dataset, and
/// all view state (filter, sort, page, focus, selection, geometry).
pub struct GridState {
    columns: Vec<Column>,
    /// Rendering order as a permutation of canonical indices. Reordering
    /// mutates this list, never `columns`, so stored indices stay valid.
    display_order: Vec<usize>,
    rows: Vec<Row>,
    filter: FilterState,
    sort: SortState,
    page: PageState,
    focus: FocusState,
    selection: SelectionSet,
    /// Active resize gesture: the column being dragged, if any.
    resizing: Option<usize>,
    event_tx: Option<UnboundedSender<GridEvent>>,
}

impl GridState {
    /// Create a grid from a column schema and a dataset.
    ///
    /// An empty schema is a host wiring defect and fails fast; everything
    /// else about the schema is repaired during normalization.
    pub fn new(specs: Vec<ColumnSpec>, rows: Vec<Row>) -> Result<Self> {
        if specs.is_empty() {
            bail!("grid requires at least one column definition");
        }
        let columns = column::normalize(specs);
        Ok(Self {
            display_order: (0..columns.len()).collect(),
            columns,
            rows,
            filter: FilterState::default(),
            sort: SortState::default(),
            page: PageState::default(),
            focus: FocusState::default(),
            selection: SelectionSet::default(),
            resizing: None,
            event_tx: None,
        })
    }

    /// Register the channel grid events are sent on. Sends never block; a
    /// dropped receiver silently disables notification.
    pub fn register_event_handler(&mut self, tx: UnboundedSender<GridEvent>) {
        self.event_tx = Some(tx);
    }

    fn emit(&self, event: GridEvent) {
        if let Some(tx) = &self.event_tx {
            let _ = tx.send(event);
        }
    }

    // --- accessors -------------------------------------------------------

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    pub fn page(&self) -> PageState {
        self.page
    }

    pub fn focus(&self) -> FocusState {
        self.focus
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn resizing(&self) -> Option<usize> {
        self.resizing
    }

    /// Rendering order of the canonical column indices.
    pub fn display_order(&self) -> &[usize] {
        &self.display_order
    }

    // --- derivation ------------------------------------------------------

    fn filtered_ids(&self) -> Vec<RowId> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| self.filter.matches(row, &self.columns))
            .map(|(id, _)| id)
            .collect()
    }

    /// Filtered row ids in display order: filter-pipeline order when no sort
    /// is active, stable-sorted by the active column otherwise.
    fn ordered_ids(&self) -> Vec<RowId> {
        let mut ids = self.filtered_ids();
        if let Some(col) = self.sort.active {
            if let Some(column) = self.columns.get(col) {
                sort_ids(&mut ids, &self.rows, column, self.sort.direction);
            }
        }
        ids
    }

    fn visible_column_count(&self) -> usize {
        self.columns.iter().filter(|c| c.visible).count()
    }

    /// (rows on the current page, visible column count) - the bounds focus
    /// coordinates live in.
    fn page_dims(&self) -> (usize, usize) {
        let filtered = self.filtered_ids().len();
        (self.page.window(filtered).len(), self.visible_column_count())
    }

    /// Derive the current page view: raw rows -> filter -> sort -> page.
    pub fn view(&self) -> PageView<'_> {
        let ids = self.ordered_ids();
        let filtered = ids.len();
        let window = self.page.window(filtered);
        let rows = ids[window.clone()]
            .iter()
            .map(|&id| RowEntry {
                id,
                row: &self.rows[id],
            })
            .collect();
        PageView {
            columns: self
                .display_order
                .iter()
                .map(|&i| (i, &self.columns[i]))
                .filter(|(_, c)| c.visible)
                .collect(),
            rows,
            total_rows: self.rows.len(),
            filtered_rows: filtered,
            page: self.page.current_page,
            page_count: self.page.page_count(filtered),
            window: self.page.display_bounds(filtered),
        }
    }

    /// Re-establish the pipeline invariants after a transition: clamp the
    /// page to the filtered count, clear any dangling focus coordinate.
    fn revalidate(&mut self) {
        let filtered = self.filtered_ids().len();
        self.page.clamp(filtered);
        let page_rows = self.page.window(filtered).len();
        self.focus.revalidate(page_rows, self.visible_column_count());
    }

    /// Raw-dataset id of a page-relative row coordinate.
    fn page_row_id(&self, row: usize) -> Option<RowId> {
        let ids = self.ordered_ids();
        let window = self.page.window(ids.len());
        let index = window.start + row;
        if index < window.end {
            Some(ids[index])
        } else {
            None
        }
    }

    // --- filter transitions ----------------------------------------------

    pub fn set_global_filter(&mut self, text: impl Into<String>) {
        self.filter.global_text = text.into();
        self.revalidate();
        self.emit(GridEvent::FilterChanged(self.filter.global_text.clone()));
    }

    /// Toggle one accepted value in a column's facet filter.
    pub fn toggle_filter_value(&mut self, col: usize, value: &str) {
        if !self.columns.get(col).is_some_and(|c| c.filterable) {
            return;
        }
        self.filter.toggle_value(col, value);
        self.revalidate();
    }

    /// Select All: accept exactly the column's currently available options.
    pub fn select_all_filter(&mut self, col: usize) {
        let options = self.filter.options_for(col, &self.rows, &self.columns);
        if options.is_empty() {
            return;
        }
        self.filter.set_accepted(col, options.into_iter().collect());
        self.revalidate();
    }

    pub fn clear_column_filter(&mut self, col: usize) {
        self.filter.clear_column(col);
        self.revalidate();
    }

    /// Reset the filter state to its empty identity and return to page 1.
    pub fn clear_filters(&mut self) {
        self.filter.clear();
        self.page.current_page = 1;
        self.revalidate();
        self.emit(GridEvent::FilterChanged(String::new()));
    }

    /// Facet options for a column, cascaded against every other column's
    /// active filter.
    pub fn filter_options(&self, col: usize) -> Vec<String> {
        self.filter.options_for(col, &self.rows, &self.columns)
    }

    // --- sort transitions ------------------------------------------------

    /// Header sort action: activate the column ascending, or flip the
    /// direction when it is already active. A no-op for non-sortable or
    /// keyless columns.
    pub fn toggle_sort(&mut self, col: usize) {
        if !self.sortable(col) {
            return;
        }
        self.sort.toggle(col);
        self.revalidate();
        self.emit(GridEvent::SortChanged {
            key: self.columns[col].key.clone(),
            direction: self.sort.direction,
        });
    }

    /// Menu sort action with an explicit direction.
    pub fn sort_by(&mut self, col: usize, direction: SortDirection) {
        if !self.sortable(col) {
            return;
        }
        self.sort.set(col, direction);
        self.revalidate();
        self.emit(GridEvent::SortChanged {
            key: self.columns[col].key.clone(),
            direction,
        });
    }

    fn sortable(&self, col: usize) -> bool {
        self.columns
            .get(col)
            .is_some_and(|c| c.sortable && c.has_key())
    }

    // --- page transitions ------------------------------------------------

    pub fn set_page(&mut self, page: usize) {
        self.page.current_page = page.max(1);
        self.revalidate();
        self.emit(GridEvent::PageChanged(self.page.current_page));
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page.current_page + 1);
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.page.current_page.saturating_sub(1).max(1));
    }

    pub fn set_page_size(&mut self, size: usize) {
        self.page.set_page_size(size);
        self.revalidate();
    }

    // --- column transitions ----------------------------------------------

    /// Toggle one column's visibility without touching order or widths.
    pub fn set_column_visible(&mut self, col: usize, visible: bool) {
        let Some(column) = self.columns.get_mut(col) else {
            return;
        };
        column.visible = visible;
        let key = column.key.clone();
        self.revalidate();
        self.emit(GridEvent::ColumnVisibilityChanged { key, visible });
    }

    pub fn show_all_columns(&mut self) {
        for col in 0..self.columns.len() {
            if !self.columns[col].visible {
                self.set_column_visible(col, true);
            }
        }
    }

    /// Move a column (canonical index) to a new display position. Only the
    /// rendering order changes; canonical identity, and with it geometry,
    /// focus, and filter keys, stays put.
    pub fn move_column(&mut self, col: usize, to: usize) {
        let Some(from) = self.display_order.iter().position(|&i| i == col) else {
            return;
        };
        let moved = self.display_order.remove(from);
        let to = to.min(self.display_order.len());
        self.display_order.insert(to, moved);
    }

    // --- geometry transitions --------------------------------------------

    /// Begin a resize drag on a column. Starting a new gesture silently
    /// cancels a stuck prior one.
    pub fn begin_resize(&mut self, col: usize) {
        if col < self.columns.len() {
            self.resizing = Some(col);
        }
    }

    /// Apply a pointer-move delta to the active gesture. Each step commits
    /// immediately, so an interrupted gesture keeps its last width.
    pub fn resize_by(&mut self, delta: i32) {
        if let Some(col) = self.resizing {
            let column = &mut self.columns[col];
            column.width = column.width_with_delta(delta);
        }
    }

    /// End the gesture and notify the final width.
    pub fn end_resize(&mut self) {
        if let Some(col) = self.resizing.take() {
            let column = &self.columns[col];
            self.emit(GridEvent::ColumnResized {
                key: column.key.clone(),
                width: column.width,
            });
        }
    }

    /// One-shot resize outside a gesture.
    pub fn resize_column_by(&mut self, col: usize, delta: i32) {
        let Some(column) = self.columns.get_mut(col) else {
            return;
        };
        column.width = column.width_with_delta(delta);
        let (key, width) = (column.key.clone(), column.width);
        self.emit(GridEvent::ColumnResized { key, width });
    }

    pub fn autosize_column(&mut self, col: usize) {
        self.set_column_width(col, AUTOSIZE_WIDTH);
    }

    pub fn reset_column_width(&mut self, col: usize) {
        self.set_column_width(col, DEFAULT_WIDTH);
    }

    pub fn set_column_width(&mut self, col: usize, width: u16) {
        let Some(column) = self.columns.get_mut(col) else {
            return;
        };
        column.width = column.clamp_width(width);
        let (key, width) = (column.key.clone(), column.width);
        self.emit(GridEvent::ColumnResized { key, width });
    }

    // --- focus transitions -----------------------------------------------

    pub fn focus_cell(&mut self, row: usize, col: usize) {
        let (page_rows, visible_cols) = self.page_dims();
        self.focus.focus(row, col, page_rows, visible_cols);
    }

    pub fn move_focus(&mut self, direction: NavDirection) {
        let (page_rows, visible_cols) = self.page_dims();
        self.focus.move_by(direction, page_rows, visible_cols);
    }

    /// Pointer interaction outside the grid.
    pub fn blur(&mut self) {
        self.focus.blur();
    }

    /// Pointer click on a page cell: focuses it and notifies both the cell
    /// and enclosing-row click callbacks.
    pub fn click_cell(&mut self, row: usize, col: usize) {
        self.focus_cell(row, col);
        if let Some(id) = self.page_row_id(row) {
            self.emit(GridEvent::CellClicked { row, col });
            self.emit(GridEvent::RowClicked(id));
        }
    }

    pub fn double_click_cell(&mut self, row: usize, col: usize) {
        if let Some(id) = self.page_row_id(row) {
            self.emit(GridEvent::CellDoubleClicked { row, col });
            self.emit(GridEvent::RowDoubleClicked(id));
        }
    }

    pub fn right_click_cell(&mut self, row: usize, col: usize) {
        if let Some(id) = self.page_row_id(row) {
            self.emit(GridEvent::CellRightClicked { row, col });
            self.emit(GridEvent::RowRightClicked(id));
        }
    }

    // --- selection transitions -------------------------------------------

    /// Toggle a row in the selection set by identity.
    pub fn toggle_selection(&mut self, id: RowId) {
        if id >= self.rows.len() {
            return;
        }
        self.selection.toggle(id);
        self.emit(GridEvent::SelectionChanged(self.selection.as_set().clone()));
    }

    /// Toggle selection of a page-relative row (keyboard path).
    pub fn toggle_selection_at(&mut self, row: usize) {
        if let Some(id) = self.page_row_id(row) {
            self.toggle_selection(id);
        }
    }

    // --- dataset replacement ---------------------------------------------

    /// Replace the raw dataset. Row identities do not survive, so the
    /// selection is cleared; every other invariant re-validates.
    pub fn set_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
        if !self.selection.is_empty() {
            self.selection.clear();
            self.emit(GridEvent::SelectionChanged(self.selection.as_set().clone()));
        }
        self.revalidate();
    }

    /// Replace the column schema. The canonical list is a new identity
    /// basis, so index-keyed filters reset; the sort survives only if its
    /// column is still sortable at the same index.
    pub fn set_columns(&mut self, specs: Vec<ColumnSpec>) -> Result<()> {
        if specs.is_empty() {
            bail!("grid requires at least one column definition");
        }
        self.columns = column::normalize(specs);
        self.display_order = (0..self.columns.len()).collect();
        self.filter.per_column.clear();
        if self.sort.active.is_some_and(|col| !self.sortable(col)) {
            self.sort.clear();
        }
        self.resizing = None;
        self.revalidate();
        Ok(())
    }

    // --- export collaborator ---------------------------------------------

    /// Build the 2-D export array: visible display names, then per-column
    /// rendered values for every filtered (not paginated) row in display
    /// order.
    pub fn export_table(&self) -> Vec<Vec<String>> {
        let visible: Vec<&Column> = self
            .display_order
            .iter()
            .map(|&i| &self.columns[i])
            .filter(|c| c.visible)
            .collect();
        let mut table = Vec::with_capacity(self.filtered_ids().len() + 1);
        table.push(visible.iter().map(|c| c.display_name.clone()).collect());
        for id in self.ordered_ids() {
            let row = &self.rows[id];
            table.push(visible.iter().map(|c| c.cell_text(row)).collect());
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::focus::FocusCoord;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tokio::sync::mpsc::unbounded_channel;

    fn row(pairs: &[(&str, serde_json::Value)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn people_grid() -> GridState {
        let columns = vec![
            ColumnSpec::new("name"),
            ColumnSpec::new("age").with_sortable(true),
        ];
        let rows = vec![
            row(&[("name", json!("Bo")), ("age", json!(30))]),
            row(&[("name", json!("Al")), ("age", json!(25))]),
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
    fn test_empty_schema_fails_fast() {
        assert!(GridState::new(Vec::new(), Vec::new()).is_err());
    }

    #[test]
    fn test_sort_toggle_scenario() {
        let mut grid = people_grid();
        grid.toggle_sort(1);
        assert_eq!(page_names(&grid), vec!["Al", "Bo"]);

        grid.toggle_sort(1);
        assert_eq!(page_names(&grid), vec!["Bo", "Al"]);
    }

    #[test]
    fn test_sorting_non_sortable_column_is_noop() {
        let mut grid = people_grid();
        grid.toggle_sort(0);
        assert_eq!(grid.sort().active, None);
        assert_eq!(page_names(&grid), vec!["Bo", "Al"]);
    }

    #[test]
    fn test_page_clamps_when_filter_shrinks_dataset() {
        let columns = vec![ColumnSpec::new("n")];
        let rows: Vec<Row> = (0..25).map(|i| row(&[("n", json!(i))])).collect();
        let mut grid = GridState::new(columns, rows).unwrap();
        grid.set_page_size(10);
        grid.set_page(3);
        assert_eq!(grid.page().current_page, 3);

        // Filter down to the rows whose text contains "2".
        grid.set_global_filter("2");
        assert!(grid.view().filtered_rows < 25);
        assert!(grid.page().current_page <= grid.view().page_count);

        // Shrinking to fewer rows than one page clamps back to page 1.
        grid.set_global_filter("24");
        assert_eq!(grid.view().filtered_rows, 1);
        assert_eq!(grid.page().current_page, 1);
        assert_eq!(grid.view().rows.len(), 1);
    }

    #[test]
    fn test_focus_cleared_when_dataset_shrinks() {
        let columns = vec![ColumnSpec::new("n")];
        let rows: Vec<Row> = (0..5).map(|i| row(&[("n", json!(i))])).collect();
        let mut grid = GridState::new(columns, rows).unwrap();
        grid.focus_cell(2, 0);
        assert_eq!(grid.focus().coord(), Some(FocusCoord { row: 2, col: 0 }));

        grid.set_rows((0..2).map(|i| row(&[("n", json!(i))])).collect());
        assert_eq!(grid.focus().coord(), None);
    }

    #[test]
    fn test_focus_confined_to_page() {
        let columns = vec![ColumnSpec::new("n")];
        let rows: Vec<Row> = (0..30).map(|i| row(&[("n", json!(i))])).collect();
        let mut grid = GridState::new(columns, rows).unwrap();
        grid.set_page_size(10);
        grid.focus_cell(9, 0);
        // Moving past the last page row stays clamped; it never crosses onto
        // the next page.
        grid.move_focus(NavDirection::Down);
        assert_eq!(grid.focus().coord(), Some(FocusCoord { row: 9, col: 0 }));
        assert_eq!(grid.page().current_page, 1);
    }

    #[test]
    fn test_selection_survives_filtering() {
        let mut grid = people_grid();
        grid.toggle_selection(0);
        assert!(grid.selection().contains(0));

        grid.set_global_filter("Al");
        assert_eq!(grid.view().filtered_rows, 1);
        assert!(grid.selection().contains(0));

        grid.clear_filters();
        assert!(grid.selection().contains(0));
    }

    #[test]
    fn test_selection_cleared_on_dataset_replacement() {
        let mut grid = people_grid();
        let (tx, mut rx) = unbounded_channel();
        grid.register_event_handler(tx);

        grid.toggle_selection(1);
        grid.set_rows(vec![row(&[("name", json!("Cy")), ("age", json!(40))])]);
        assert!(grid.selection().is_empty());

        assert_eq!(
            rx.try_recv().unwrap(),
            GridEvent::SelectionChanged([1].into_iter().collect())
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            GridEvent::SelectionChanged(Default::default())
        );
    }

    #[test]
    fn test_resize_gesture_clamps_and_commits() {
        let mut grid = people_grid();
        let (tx, mut rx) = unbounded_channel();
        grid.register_event_handler(tx);

        grid.begin_resize(0);
        grid.resize_by(-100_000);
        assert_eq!(grid.columns()[0].width, grid.columns()[0].min_width);
        grid.resize_by(30);
        grid.end_resize();
        assert_eq!(grid.resizing(), None);

        assert_eq!(
            rx.try_recv().unwrap(),
            GridEvent::ColumnResized {
                key: "name".into(),
                width: grid.columns()[0].min_width + 30,
            }
        );
    }

    #[test]
    fn test_new_resize_gesture_replaces_stuck_one() {
        let mut grid = people_grid();
        grid.begin_resize(0);
        grid.begin_resize(1);
        assert_eq!(grid.resizing(), Some(1));
    }

    #[test]
    fn test_hidden_column_keeps_canonical_indices() {
        let mut grid = people_grid();
        grid.set_column_visible(0, false);

        let view = grid.view();
        assert_eq!(view.visible_column_count(), 1);
        // The age column still reports canonical index 1.
        assert_eq!(view.canonical_col(0), Some(1));
        // Sorting by canonical index still works while hidden columns exist.
        drop(view);
        grid.toggle_sort(1);
        assert_eq!(grid.sort().active, Some(1));
    }

    #[test]
    fn test_move_column_changes_order_not_identity() {
        let mut grid = people_grid();
        grid.toggle_filter_value(0, "Al");
        grid.move_column(0, 1);

        let view = grid.view();
        // Display order swapped; canonical indices unchanged.
        assert_eq!(view.canonical_col(0), Some(1));
        assert_eq!(view.canonical_col(1), Some(0));
        drop(view);
        // The index-keyed filter still targets the name column.
        assert_eq!(grid.view().filtered_rows, 1);
    }

    #[test]
    fn test_view_counts_are_consistent() {
        let columns = vec![ColumnSpec::new("n")];
        let rows: Vec<Row> = (0..17).map(|i| row(&[("n", json!(i))])).collect();
        let mut grid = GridState::new(columns, rows).unwrap();
        grid.set_page_size(5);
        grid.set_global_filter("1");

        let view = grid.view();
        assert!(view.rows.len() <= view.filtered_rows);
        assert!(view.filtered_rows <= view.total_rows);
        assert!(view.page >= 1 && view.page <= view.page_count);
    }

    #[test]
    fn test_clear_filters_resets_page_and_notifies() {
        let columns = vec![ColumnSpec::new("n")];
        let rows: Vec<Row> = (0..40).map(|i| row(&[("n", json!(i))])).collect();
        let mut grid = GridState::new(columns, rows).unwrap();
        let (tx, mut rx) = unbounded_channel();
        grid.register_event_handler(tx);

        grid.set_page_size(10);
        grid.set_page(4);
        let _ = rx.try_recv();
        grid.clear_filters();
        assert_eq!(grid.page().current_page, 1);
        assert_eq!(rx.try_recv().unwrap(), GridEvent::FilterChanged(String::new()));
    }

    #[test]
    fn test_click_cell_emits_cell_and_row_events() {
        let mut grid = people_grid();
        let (tx, mut rx) = unbounded_channel();
        grid.register_event_handler(tx);

        grid.toggle_sort(1); // Al (id 1) first
        let _ = rx.try_recv();
        grid.click_cell(0, 0);

        assert_eq!(rx.try_recv().unwrap(), GridEvent::CellClicked { row: 0, col: 0 });
        assert_eq!(rx.try_recv().unwrap(), GridEvent::RowClicked(1));
        assert_eq!(grid.focus().coord(), Some(FocusCoord { row: 0, col: 0 }));
    }

    #[test]
    fn test_export_table_uses_filtered_not_paginated_rows() {
        let columns = vec![
            ColumnSpec::new("name").with_display_name("Name"),
            ColumnSpec::new("age").with_sortable(true),
        ];
        let rows: Vec<Row> = (0..30)
            .map(|i| row(&[("name", json!(format!("p{i}"))), ("age", json!(i))]))
            .collect();
        let mut grid = GridState::new(columns, rows).unwrap();
        grid.set_page_size(5);
        grid.set_column_visible(1, false);

        let table = grid.export_table();
        assert_eq!(table[0], vec!["Name"]);
        // Header plus every filtered row, not just the 5-row page.
        assert_eq!(table.len(), 31);
        assert_eq!(table[1], vec!["p0"]);
    }

    #[test]
    fn test_schema_replacement_resets_index_filters() {
        let mut grid = people_grid();
        grid.toggle_filter_value(0, "Al");
        assert_eq!(grid.view().filtered_rows, 1);

        grid.set_columns(vec![
            ColumnSpec::new("age").with_sortable(true),
            ColumnSpec::new("name"),
        ])
        .unwrap();
        // Index-keyed filters do not survive a new canonical list.
        assert_eq!(grid.view().filtered_rows, 2);
    }
}
