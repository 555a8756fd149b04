//! Selection store: the set of selected rows by identity, independent of
//! filter/sort/page state.

use crate::grid::RowId;
use std::collections::BTreeSet;

/// Identity-based row selection. A selected row filtered out of view stays
/// selected and reappears selected when the filter is relaxed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    rows: BTreeSet<RowId>,
}

impl SelectionSet {
    /// Toggle membership; returns true when the row is now selected.
    pub fn toggle(&mut self, id: RowId) -> bool {
        if self.rows.remove(&id) {
            false
        } else {
            self.rows.insert(id);
            true
        }
    }

    pub fn contains(&self, id: RowId) -> bool {
        self.rows.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Snapshot of the full set, as handed to selection-changed callbacks.
    pub fn as_set(&self) -> &BTreeSet<RowId> {
        &self.rows
    }
}
