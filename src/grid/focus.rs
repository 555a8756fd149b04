//! Cell-focus state machine. Coordinates address the currently rendered
//! page's row slice and visible-column list, never the raw dataset.

use serde::{Deserialize, Serialize};

/// Focus coordinate within the current page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusCoord {
    pub row: usize,
    pub col: usize,
}

/// Directional key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Two states: unfocused, or focused at a coordinate that is always a valid
/// index into the current render output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FocusState {
    #[default]
    Unfocused,
    At(FocusCoord),
}

impl FocusState {
    pub fn coord(&self) -> Option<FocusCoord> {
        match self {
            Self::Unfocused => None,
            Self::At(coord) => Some(*coord),
        }
    }

    pub fn is_focused(&self) -> bool {
        matches!(self, Self::At(_))
    }

    /// Pointer focus on a cell. An out-of-bounds coordinate leaves the
    /// machine unfocused rather than storing a dangling reference.
    pub fn focus(&mut self, row: usize, col: usize, page_rows: usize, visible_cols: usize) {
        *self = if row < page_rows && col < visible_cols {
            Self::At(FocusCoord { row, col })
        } else {
            Self::Unfocused
        };
    }

    /// Directional movement, clamped to the page bounds. Navigation never
    /// crosses page boundaries. A no-op while unfocused.
    pub fn move_by(&mut self, direction: NavDirection, page_rows: usize, visible_cols: usize) {
        let Self::At(coord) = self else {
            return;
        };
        if page_rows == 0 || visible_cols == 0 {
            *self = Self::Unfocused;
            return;
        }
        match direction {
            NavDirection::Up => coord.row = coord.row.saturating_sub(1),
            NavDirection::Down => coord.row = (coord.row + 1).min(page_rows - 1),
            NavDirection::Left => coord.col = coord.col.saturating_sub(1),
            NavDirection::Right => coord.col = (coord.col + 1).min(visible_cols - 1),
        }
    }

    /// Pointer interaction outside the grid.
    pub fn blur(&mut self) {
        *self = Self::Unfocused;
    }

    /// Self-healing invalidation: a pipeline change that shrank the rendered
    /// page below the focused coordinate clears the focus.
    pub fn revalidate(&mut self, page_rows: usize, visible_cols: usize) {
        if let Self::At(coord) = self {
            if coord.row >= page_rows || coord.col >= visible_cols {
                *self = Self::Unfocused;
            }
        }
    }
}
