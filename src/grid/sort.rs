//! Sort stage: at most one active (column, direction) pair, applied as a
//! stable comparator so tie groups keep their filter-pipeline order.

use crate::grid::column::Column;
use crate::grid::value::cmp_cells;
use crate::grid::{Row, RowId};
use serde::{Deserialize, Serialize};
use strum::Display;

/// Sort direction for the active column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum SortDirection {
    #[default]
    #[strum(serialize = "asc")]
    Ascending,
    #[strum(serialize = "desc")]
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Active sort. `active = None` leaves rows in filter-pipeline order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortState {
    pub active: Option<usize>,
    pub direction: SortDirection,
}

impl SortState {
    /// Header-toggle semantics: a second toggle of the active column flips
    /// the direction; any other column becomes active ascending.
    pub fn toggle(&mut self, col: usize) {
        if self.active == Some(col) {
            self.direction = self.direction.toggled();
        } else {
            self.active = Some(col);
            self.direction = SortDirection::Ascending;
        }
    }

    pub fn set(&mut self, col: usize, direction: SortDirection) {
        self.active = Some(col);
        self.direction = direction;
    }

    pub fn clear(&mut self) {
        self.active = None;
        self.direction = SortDirection::Ascending;
    }
}

/// Stable sort of row ids by the given column's cell values. Equal keys keep
/// their relative input order under both directions, so repeated direction
/// toggles never scramble tie groups.
pub fn sort_ids(ids: &mut [RowId], rows: &[Row], column: &Column, direction: SortDirection) {
    ids.sort_by(|&a, &b| {
        let ordering = cmp_cells(
            rows.get(a).and_then(|row| row.get(&column.key)),
            rows.get(b).and_then(|row| row.get(&column.key)),
        );
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}
