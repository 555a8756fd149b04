//! GridTable: renders the engine's derived page view as a ratatui table and
//! translates viewer actions into engine transitions.

use crate::grid::focus::NavDirection;
use crate::grid::GridState;
use crate::tui::{Action, Component, Focusable, Theme};
use color_eyre::Result;
use ratatui::{
    layout::{Constraint, Position, Rect},
    text::Line,
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

/// Column widths are modeled in pixels (default 150, bounds 50..500); the
/// terminal renders them at this scale.
pub const PIXELS_PER_CELL: u16 = 10;

/// Pointer hit-test result, in page-relative coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// A data cell: row within the page, column within the visible columns.
    Cell { row: usize, col: usize },
    /// A header cell.
    Header { col: usize },
    /// The spacing right of a header cell: the resize affordance.
    HeaderBoundary { col: usize },
    /// Inside the grid chrome but not on anything interactive.
    Inside,
    /// Outside the grid area.
    Outside,
}

/// Geometry of the last render, kept for pointer hit-testing.
#[derive(Debug, Clone)]
struct TableLayout {
    area: Rect,
    header_y: u16,
    first_row_y: u16,
    /// Per visible column: half-open x span in terminal cells.
    col_spans: Vec<(u16, u16)>,
    row_count: usize,
}

/// Interactive widget over the owned [`GridState`].
pub struct GridTable {
    grid: GridState,
    theme: Theme,
    focused: bool,
    layout: Option<TableLayout>,
}

impl GridTable {
    pub fn new(grid: GridState) -> Self {
        Self {
            grid,
            theme: Theme::default(),
            focused: true,
            layout: None,
        }
    }

    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut GridState {
        &mut self.grid
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Focus (0, 0) when nothing is focused yet, so column/selection actions
    /// always have a target.
    fn ensure_focus(&mut self) -> bool {
        if self.grid.focus().is_focused() {
            return true;
        }
        self.grid.focus_cell(0, 0);
        self.grid.focus().is_focused()
    }

    /// Canonical index of the column the focus cursor is on.
    pub fn cursor_canonical_col(&mut self) -> Option<usize> {
        if !self.ensure_focus() {
            return None;
        }
        let coord = self.grid.focus().coord()?;
        self.grid.view().canonical_col(coord.col)
    }

    fn move_cursor(&mut self, direction: NavDirection) {
        if self.ensure_focus() {
            self.grid.move_focus(direction);
        }
    }

    /// Reorder the cursor column one display position left or right.
    fn move_cursor_column(&mut self, delta: i32) {
        let Some(col) = self.cursor_canonical_col() else {
            return;
        };
        let Some(pos) = self.grid.display_order().iter().position(|&i| i == col) else {
            return;
        };
        let to = if delta < 0 {
            pos.saturating_sub(delta.unsigned_abs() as usize)
        } else {
            pos + delta as usize
        };
        self.grid.move_column(col, to);
    }

    /// Map a terminal position to a grid target.
    pub fn hit_test(&self, x: u16, y: u16) -> HitTarget {
        let Some(layout) = &self.layout else {
            return HitTarget::Outside;
        };
        if !layout.area.contains(Position { x, y }) {
            return HitTarget::Outside;
        }
        if y == layout.header_y {
            for (col, &(start, end)) in layout.col_spans.iter().enumerate() {
                if x == end {
                    return HitTarget::HeaderBoundary { col };
                }
                if x >= start && x < end {
                    return HitTarget::Header { col };
                }
            }
            return HitTarget::Inside;
        }
        if y >= layout.first_row_y {
            let row = usize::from(y - layout.first_row_y);
            if row < layout.row_count {
                for (col, &(start, end)) in layout.col_spans.iter().enumerate() {
                    if x >= start && x < end {
                        return HitTarget::Cell { row, col };
                    }
                }
            }
        }
        HitTarget::Inside
    }
}

impl Component for GridTable {
    fn handle_action(&mut self, action: Action) -> Result<bool> {
        match action {
            Action::MoveUp => self.move_cursor(NavDirection::Up),
            Action::MoveDown => self.move_cursor(NavDirection::Down),
            Action::MoveLeft => self.move_cursor(NavDirection::Left),
            Action::MoveRight => self.move_cursor(NavDirection::Right),

            Action::NextPage => self.grid.next_page(),
            Action::PrevPage => self.grid.prev_page(),
            Action::FirstPage => self.grid.set_page(1),
            Action::LastPage => {
                let last = self.grid.view().page_count;
                self.grid.set_page(last);
            }

            Action::ToggleSelect => {
                if self.ensure_focus() {
                    if let Some(coord) = self.grid.focus().coord() {
                        self.grid.toggle_selection_at(coord.row);
                    }
                }
            }

            Action::SortColumn => {
                if let Some(col) = self.cursor_canonical_col() {
                    self.grid.toggle_sort(col);
                }
            }
            Action::HideColumn => {
                if let Some(col) = self.cursor_canonical_col() {
                    self.grid.set_column_visible(col, false);
                }
            }
            Action::ShowAllColumns => self.grid.show_all_columns(),
            Action::WidenColumn => {
                if let Some(col) = self.cursor_canonical_col() {
                    self.grid.resize_column_by(col, i32::from(PIXELS_PER_CELL));
                }
            }
            Action::NarrowColumn => {
                if let Some(col) = self.cursor_canonical_col() {
                    self.grid.resize_column_by(col, -i32::from(PIXELS_PER_CELL));
                }
            }
            Action::AutosizeColumn => {
                if let Some(col) = self.cursor_canonical_col() {
                    self.grid.autosize_column(col);
                }
            }
            Action::ResetColumnWidth => {
                if let Some(col) = self.cursor_canonical_col() {
                    self.grid.reset_column_width(col);
                }
            }
            Action::MoveColumnLeft => self.move_cursor_column(-1),
            Action::MoveColumnRight => self.move_cursor_column(1),

            Action::ClearFilters => self.grid.clear_filters(),
            Action::Cancel => self.grid.blur(),

            _ => return Ok(false),
        }
        Ok(true)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let theme = self.theme.clone();
        let focus = self.grid.focus().coord();
        let sort = self.grid.sort();
        let view = self.grid.view();

        let mut header_cells = Vec::with_capacity(view.columns.len());
        let mut constraints = Vec::with_capacity(view.columns.len());
        for (canonical, column) in &view.columns {
            let mut label = column.display_name.clone();
            if sort.active == Some(*canonical) {
                label.push_str(match sort.direction {
                    crate::grid::SortDirection::Ascending => " ↑",
                    crate::grid::SortDirection::Descending => " ↓",
                });
            }
            if self.grid.filter().column_active(*canonical) {
                label.push_str(" ∗");
            }
            header_cells.push(Cell::from(label));
            constraints.push(Constraint::Length((column.width / PIXELS_PER_CELL).max(1)));
        }
        let header = Row::new(header_cells).style(theme.header_style());

        let mut rows = Vec::with_capacity(view.rows.len());
        for (row_idx, entry) in view.rows.iter().enumerate() {
            let row_style = if self.grid.selection().contains(entry.id) {
                theme.selected_row_style()
            } else if row_idx % 2 == 1 {
                theme.alt_row_style()
            } else {
                theme.normal_style()
            };

            let cells: Vec<Cell> = view
                .columns
                .iter()
                .enumerate()
                .map(|(col_idx, (_, column))| {
                    let mut cell = Cell::from(column.cell_text(entry.row));
                    if focus == Some(crate::grid::FocusCoord {
                        row: row_idx,
                        col: col_idx,
                    }) {
                        cell = cell.style(theme.focused_cell_style());
                    }
                    cell
                })
                .collect();
            rows.push(Row::new(cells).style(row_style));
        }

        let (from, to) = view.window;
        let mut status = format!(
            "Showing {from}-{to} of {} • Page {}/{} • {} selected",
            view.filtered_rows,
            view.page,
            view.page_count,
            self.grid.selection().len()
        );
        let filter_text = &self.grid.filter().global_text;
        if !filter_text.is_empty() {
            status.push_str(&format!(" • filter: {filter_text}"));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(
                "TabGrid [{}/{}]",
                view.filtered_rows, view.total_rows
            ))
            .title_bottom(Line::styled(status, theme.status_style()))
            .border_style(if self.focused {
                theme.focused_border_style()
            } else {
                theme.border_style()
            });
        let inner = block.inner(area);

        // Record geometry for pointer hit-testing. The table's first inner
        // line is the header; column spans follow the constraints plus the
        // default single-cell column spacing.
        let mut col_spans = Vec::with_capacity(constraints.len());
        let mut x = inner.x;
        for constraint in &constraints {
            let width = match constraint {
                Constraint::Length(w) => *w,
                _ => 0,
            };
            let end = (x + width).min(inner.x + inner.width);
            col_spans.push((x, end));
            x = end + 1;
        }
        self.layout = Some(TableLayout {
            area,
            header_y: inner.y,
            first_row_y: inner.y + 1,
            col_spans,
            row_count: view.rows.len(),
        });

        let table = Table::new(rows, constraints).header(header).block(block);
        frame.render_widget(table, area);
    }

    fn name(&self) -> &str {
        "GridTable"
    }
}

impl Focusable for GridTable {
    fn is_focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::ColumnSpec;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn table() -> GridTable {
        let columns = vec![
            ColumnSpec::new("name"),
            ColumnSpec::new("age").with_sortable(true),
        ];
        let rows = (0..12)
            .map(|i| {
                let mut row = crate::grid::Row::new();
                row.insert("name".into(), json!(format!("p{i}")));
                row.insert("age".into(), json!(20 + i));
                row
            })
            .collect();
        GridTable::new(GridState::new(columns, rows).unwrap())
    }

    #[test]
    fn test_first_move_establishes_focus() {
        let mut table = table();
        assert!(table.grid().focus().coord().is_none());

        table.handle_action(Action::MoveDown).unwrap();
        assert!(table.grid().focus().coord().is_some());
    }

    #[test]
    fn test_sort_action_targets_cursor_column() {
        let mut table = table();
        table.handle_action(Action::MoveRight).unwrap();
        table.handle_action(Action::SortColumn).unwrap();
        assert_eq!(table.grid().sort().active, Some(1));
    }

    #[test]
    fn test_sort_action_on_non_sortable_column_is_noop() {
        let mut table = table();
        table.handle_action(Action::MoveDown).unwrap();
        table.handle_action(Action::SortColumn).unwrap();
        assert_eq!(table.grid().sort().active, None);
    }

    #[test]
    fn test_page_actions() {
        let mut table = table();
        table.grid_mut().set_page_size(5);

        table.handle_action(Action::NextPage).unwrap();
        assert_eq!(table.grid().page().current_page, 2);

        table.handle_action(Action::LastPage).unwrap();
        assert_eq!(table.grid().page().current_page, 3);

        table.handle_action(Action::FirstPage).unwrap();
        assert_eq!(table.grid().page().current_page, 1);
    }

    #[test]
    fn test_toggle_select_uses_page_row_identity() {
        let mut table = table();
        table.grid_mut().set_page_size(5);
        table.grid_mut().set_page(2);

        table.handle_action(Action::MoveDown).unwrap();
        table.handle_action(Action::ToggleSelect).unwrap();
        // Page 2 row 1 is raw row 6.
        assert!(table.grid().selection().contains(6));
    }

    #[test]
    fn test_move_column_right_reorders_display() {
        let mut table = table();
        table.handle_action(Action::MoveDown).unwrap();
        table.handle_action(Action::MoveColumnRight).unwrap();
        assert_eq!(table.grid().view().canonical_col(0), Some(1));
        assert_eq!(table.grid().view().canonical_col(1), Some(0));
    }

    #[test]
    fn test_unhandled_action_propagates() {
        let mut table = table();
        assert!(!table.handle_action(Action::Quit).unwrap());
    }
}
