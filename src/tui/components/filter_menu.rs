//! FilterMenu: singleton overlay for one column's facet filter.
//!
//! The option list and Select All state mirror the engine's cascaded facet
//! options; value toggles commit to the engine immediately. The search text
//! only narrows the visible option list and is discarded when the menu
//! closes, committed selections are not.

use crate::grid::GridState;
use crate::tui::{Action, Component, Theme};
use color_eyre::Result;
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, Clear},
    Frame,
};
use std::collections::BTreeSet;

/// What the cursor is on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    SelectAll,
    Value(String),
}

/// Facet filter overlay for a single column (canonical index).
pub struct FilterMenu {
    col: usize,
    title: String,
    options: Vec<String>,
    selected: BTreeSet<String>,
    search_text: String,
    cursor: usize,
    scroll: usize,
    last_area: Option<Rect>,
}

impl FilterMenu {
    /// Open the menu for a column, snapshotting its current facet options
    /// and committed selection.
    pub fn open(col: usize, grid: &GridState) -> Option<Self> {
        let column = grid.columns().get(col)?;
        if !column.filterable {
            return None;
        }
        let mut menu = Self {
            col,
            title: format!("Filter by {}", column.display_name),
            options: Vec::new(),
            selected: BTreeSet::new(),
            search_text: String::new(),
            cursor: 0,
            scroll: 0,
            last_area: None,
        };
        menu.sync(grid);
        Some(menu)
    }

    /// Canonical index of the column this menu filters.
    pub fn column(&self) -> usize {
        self.col
    }

    /// Refresh options and committed selection from the engine, after a
    /// toggle commits or the pipeline changes underneath the menu.
    pub fn sync(&mut self, grid: &GridState) {
        self.options = grid.filter_options(self.col);
        self.selected = grid
            .filter()
            .accepted(self.col)
            .cloned()
            .unwrap_or_default();
        let count = self.visible_options().len();
        self.cursor = self.cursor.min(count);
    }

    /// Options narrowed by the uncommitted search text.
    pub fn visible_options(&self) -> Vec<&String> {
        let needle = self.search_text.to_lowercase();
        self.options
            .iter()
            .filter(|option| needle.is_empty() || option.to_lowercase().contains(&needle))
            .collect()
    }

    /// Entry under the cursor: index 0 is Select All, the rest are options.
    pub fn current_entry(&self) -> MenuEntry {
        if self.cursor == 0 {
            MenuEntry::SelectAll
        } else {
            match self.visible_options().get(self.cursor - 1) {
                Some(option) => MenuEntry::Value((*option).clone()),
                None => MenuEntry::SelectAll,
            }
        }
    }

    /// Whether every currently available option is accepted.
    pub fn all_selected(&self) -> bool {
        !self.options.is_empty() && self.options.iter().all(|o| self.selected.contains(o))
    }

    pub fn is_selected(&self, option: &str) -> bool {
        self.selected.contains(option)
    }

    pub fn push_char(&mut self, c: char) {
        self.search_text.push(c);
        self.cursor = self.cursor.min(self.visible_options().len());
    }

    pub fn backspace(&mut self) {
        self.search_text.pop();
    }

    /// Whether a terminal position lies inside the rendered menu; pointer
    /// interactions outside it close the menu.
    pub fn contains(&self, x: u16, y: u16) -> bool {
        self.last_area
            .is_some_and(|area| area.contains(Position { x, y }))
    }

    fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
        self.scroll = self.scroll.min(self.cursor.saturating_sub(1));
    }

    fn move_down(&mut self) {
        self.cursor = (self.cursor + 1).min(self.visible_options().len());
    }
}

impl Component for FilterMenu {
    fn handle_action(&mut self, action: Action) -> Result<bool> {
        match action {
            Action::MoveUp => {
                self.move_up();
                Ok(true)
            }
            Action::MoveDown => {
                self.move_down();
                Ok(true)
            }
            // Confirm (OK) and Cancel both close; the owner interprets the
            // false return as "close me". Committed toggles stay either way.
            Action::Cancel | Action::Confirm => Ok(false),
            _ => Ok(true),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.last_area = Some(area);
        frame.render_widget(Clear, area);

        let theme = Theme::default();
        let block = Block::default()
            .title(self.title.clone())
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(theme.focused_border_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let buf = frame.buffer_mut();
        let x = inner.x + 1;
        let mut y = inner.y;

        // Search line (uncommitted)
        buf.set_string(x, y, "Search: ", Style::default().add_modifier(Modifier::BOLD));
        buf.set_string(x + 8, y, &self.search_text, theme.normal_style());
        buf.set_string(
            x + 8 + self.search_text.len() as u16,
            y,
            " ",
            theme.focused_cell_style(),
        );
        y += 2;

        // Select All
        let all_check = if self.all_selected() { "[✓]" } else { "[ ]" };
        let all_style = if self.cursor == 0 {
            theme.focused_cell_style()
        } else {
            theme.normal_style()
        };
        buf.set_string(x, y, format!("{all_check} (Select All)"), all_style);
        y += 1;

        // Scrollable option list; keep the cursor row in view
        let visible_rows = usize::from(inner.height.saturating_sub(4)).max(1);
        if self.cursor > 0 {
            let row = self.cursor - 1;
            if row < self.scroll {
                self.scroll = row;
            } else if row >= self.scroll + visible_rows {
                self.scroll = row + 1 - visible_rows;
            }
        }
        for (i, option) in self
            .visible_options()
            .into_iter()
            .enumerate()
            .skip(self.scroll)
            .take(visible_rows)
        {
            let check = if self.is_selected(option) { "[✓]" } else { "[ ]" };
            let label = if option.is_empty() { "(empty)" } else { option.as_str() };
            let style = if self.cursor == i + 1 {
                theme.focused_cell_style()
            } else {
                theme.normal_style()
            };
            buf.set_string(x, y, format!("{check} {label}"), style);
            y += 1;
        }
    }

    fn name(&self) -> &str {
        "FilterMenu"
    }
}
