//! The derived page view: a pure snapshot of what the grid renders, computed
//! atomically from current state. Rendering and tests consume this type and
//! never intermediate pipeline state.

use crate::grid::column::Column;
use crate::grid::{Row, RowId};

/// One row of the current page window.
#[derive(Debug)]
pub struct RowEntry<'a> {
    pub id: RowId,
    pub row: &'a Row,
}

/// The currently rendered page: visible columns (with their canonical
/// indices), the page's row slice, and the pipeline counts the pagination
/// footer displays.
#[derive(Debug)]
pub struct PageView<'a> {
    pub columns: Vec<(usize, &'a Column)>,
    pub rows: Vec<RowEntry<'a>>,
    pub total_rows: usize,
    pub filtered_rows: usize,
    pub page: usize,
    pub page_count: usize,
    /// 1-based "Showing X-Y of filtered" bounds; (0, 0) when empty.
    pub window: (usize, usize),
}

impl<'a> PageView<'a> {
    pub fn visible_column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Rendered text for a page-relative cell coordinate; empty when out of
    /// bounds.
    pub fn cell_text(&self, row: usize, col: usize) -> String {
        match (self.rows.get(row), self.columns.get(col)) {
            (Some(entry), Some((_, column))) => column.cell_text(entry.row),
            _ => String::new(),
        }
    }

    /// The canonical column index behind a visible-column position.
    pub fn canonical_col(&self, col: usize) -> Option<usize> {
        self.columns.get(col).map(|(index, _)| *index)
    }
}
