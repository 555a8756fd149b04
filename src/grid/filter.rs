//! Filter pipeline: a global free-text filter AND per-column accepted-value
//! sets, with cascading facet option computation.

use crate::grid::column::Column;
use crate::grid::value::display_string;
use crate::grid::Row;
use std::collections::{BTreeMap, BTreeSet};

/// Combined filter state. A column absent from `per_column`, or present with
/// an empty set, imposes no restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub global_text: String,
    pub per_column: BTreeMap<usize, BTreeSet<String>>,
}

impl FilterState {
    /// True when no filter restricts anything.
    pub fn is_empty(&self) -> bool {
        self.global_text.is_empty() && self.per_column.values().all(BTreeSet::is_empty)
    }

    /// Reset to the empty identity.
    pub fn clear(&mut self) {
        self.global_text.clear();
        self.per_column.clear();
    }

    /// Whether column `col` currently restricts rows.
    pub fn column_active(&self, col: usize) -> bool {
        self.per_column.get(&col).is_some_and(|set| !set.is_empty())
    }

    /// The accepted-value set for a column, if any values are selected.
    pub fn accepted(&self, col: usize) -> Option<&BTreeSet<String>> {
        self.per_column.get(&col).filter(|set| !set.is_empty())
    }

    /// Toggle one accepted value for a column.
    pub fn toggle_value(&mut self, col: usize, value: &str) {
        let set = self.per_column.entry(col).or_default();
        if !set.remove(value) {
            set.insert(value.to_string());
        }
    }

    /// Replace a column's accepted set wholesale.
    pub fn set_accepted(&mut self, col: usize, values: BTreeSet<String>) {
        if values.is_empty() {
            self.per_column.remove(&col);
        } else {
            self.per_column.insert(col, values);
        }
    }

    /// Drop a column's restriction.
    pub fn clear_column(&mut self, col: usize) {
        self.per_column.remove(&col);
    }

    /// Combined predicate: global filter AND every active per-column filter.
    pub fn matches(&self, row: &Row, columns: &[Column]) -> bool {
        self.matches_global(row) && self.matches_column_sets(row, columns, None)
    }

    /// A row passes the global filter when any of its values, lowercased,
    /// contains the lowercase filter text. Empty text passes every row.
    fn matches_global(&self, row: &Row) -> bool {
        if self.global_text.is_empty() {
            return true;
        }
        let needle = self.global_text.to_lowercase();
        row.values()
            .any(|value| display_string(value).to_lowercase().contains(&needle))
    }

    /// Per-column predicate, optionally skipping one column (facet cascade).
    fn matches_column_sets(&self, row: &Row, columns: &[Column], skip: Option<usize>) -> bool {
        self.per_column.iter().all(|(&col, accepted)| {
            if accepted.is_empty() || Some(col) == skip {
                return true;
            }
            let Some(column) = columns.get(col) else {
                return true;
            };
            accepted.contains(&column.raw_text(row))
        })
    }

    /// Selectable option values for column `col`, in first-appearance order.
    ///
    /// Options are computed against rows filtered by every column's filter
    /// except `col`'s own, so a user can broaden this column's selection
    /// after narrowing others. The global text filter does not narrow the
    /// option list.
    pub fn options_for(&self, col: usize, rows: &[Row], columns: &[Column]) -> Vec<String> {
        let Some(column) = columns.get(col) else {
            return Vec::new();
        };
        if !column.filterable {
            return Vec::new();
        }

        let mut seen = BTreeSet::new();
        let mut options = Vec::new();
        for row in rows {
            if !self.matches_column_sets(row, columns, Some(col)) {
                continue;
            }
            let value = column.raw_text(row);
            if seen.insert(value.clone()) {
                options.push(value);
            }
        }
        options
    }
}
