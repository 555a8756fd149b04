//! Application state: routes terminal input through the keybindings to
//! engine transitions, owns the singleton filter-menu overlay and resize
//! gesture, and drains engine events.

use crate::grid::{GridEvent, GridState};
use crate::services::export::write_csv;
use crate::tui::components::{FilterMenu, GridTable, HitTarget, MenuEntry, PIXELS_PER_CELL};
use crate::tui::{Action, Component, KeyBindings, Theme};
use color_eyre::Result;
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use tracing::{debug, error, info};

/// Two clicks on the same cell within this window count as a double click.
const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(400);

/// Default export target for the Export action.
const EXPORT_FILE: &str = "tabgrid_export.csv";

/// Application state
///
/// Manages the TUI components, event routing, and application lifecycle.
pub struct App {
    /// The grid widget owning the state engine
    grid_table: GridTable,

    /// Filter menu overlay (at most one open at a time)
    filter_menu: Option<FilterMenu>,

    /// Global filter text entry mode; keystrokes commit live
    editing_filter: bool,

    /// Whether the help overlay is shown
    show_help: bool,

    /// Keybindings configuration
    keybindings: KeyBindings,

    /// Current theme
    theme: Theme,

    /// Engine event drain
    events: UnboundedReceiver<GridEvent>,

    /// Anchor x of an in-flight resize drag
    resize_anchor_x: Option<u16>,

    /// Last cell click, for double-click detection
    last_click: Option<(Instant, usize, usize)>,

    /// Whether the app should quit
    should_quit: bool,
}

impl App {
    /// Create a new App around a grid engine.
    pub fn new(mut grid: GridState) -> Self {
        let (tx, rx) = unbounded_channel();
        grid.register_event_handler(tx);
        Self {
            grid_table: GridTable::new(grid),
            filter_menu: None,
            editing_filter: false,
            show_help: false,
            keybindings: KeyBindings::default(),
            theme: Theme::default(),
            events: rx,
            resize_anchor_x: None,
            last_click: None,
            should_quit: false,
        }
    }

    pub fn grid(&self) -> &GridState {
        self.grid_table.grid()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn set_keybindings(&mut self, keybindings: KeyBindings) {
        self.keybindings = keybindings;
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.grid_table.set_theme(theme.clone());
        self.theme = theme;
    }

    /// Log engine events as they arrive. Called once per loop turn.
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            debug!(?event, "grid event");
        }
    }

    /// Handle a key event
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        // Only handle key press events, ignore release/repeat
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        // Global filter entry commits each keystroke (the engine clamps the
        // page and revalidates focus per change).
        if self.editing_filter {
            match key.code {
                KeyCode::Char(c)
                    if !key.modifiers.contains(KeyModifiers::CONTROL)
                        && !key.modifiers.contains(KeyModifiers::ALT) =>
                {
                    let mut text = self.grid().filter().global_text.clone();
                    text.push(c);
                    self.grid_table.grid_mut().set_global_filter(text);
                }
                KeyCode::Backspace => {
                    let mut text = self.grid().filter().global_text.clone();
                    text.pop();
                    self.grid_table.grid_mut().set_global_filter(text);
                }
                KeyCode::Enter | KeyCode::Esc => self.editing_filter = false,
                _ => {}
            }
            return Ok(());
        }

        // The open filter menu takes character input for its search text;
        // Space toggles the entry under the cursor.
        if self.filter_menu.is_some() {
            match key.code {
                KeyCode::Char(' ') => {
                    self.toggle_menu_entry();
                    return Ok(());
                }
                KeyCode::Char(c)
                    if !key.modifiers.contains(KeyModifiers::CONTROL)
                        && !key.modifiers.contains(KeyModifiers::ALT) =>
                {
                    if let Some(menu) = &mut self.filter_menu {
                        menu.push_char(c);
                    }
                    return Ok(());
                }
                KeyCode::Backspace => {
                    if let Some(menu) = &mut self.filter_menu {
                        menu.backspace();
                    }
                    return Ok(());
                }
                _ => {}
            }
        }

        if let Some(action) = self.keybindings.get_action(&key) {
            self.handle_action(action)?;
        }

        Ok(())
    }

    /// Handle an action
    fn handle_action(&mut self, action: Action) -> Result<()> {
        if self.show_help {
            self.show_help = false;
            return Ok(());
        }

        match action {
            Action::Quit => {
                self.should_quit = true;
                return Ok(());
            }
            Action::ToggleHelp => {
                self.show_help = true;
                return Ok(());
            }
            Action::GlobalFilter => {
                self.editing_filter = true;
                return Ok(());
            }
            Action::FilterMenu => {
                // Singleton: opening for another column replaces the menu,
                // discarding only the old menu's uncommitted search text.
                if let Some(col) = self.grid_table.cursor_canonical_col() {
                    self.filter_menu = FilterMenu::open(col, self.grid());
                }
                return Ok(());
            }
            Action::ClearFilters => {
                self.grid_table.grid_mut().clear_filters();
                self.sync_menu();
                return Ok(());
            }
            Action::Export => {
                let table = self.grid().export_table();
                match write_csv(&table, EXPORT_FILE) {
                    Ok(()) => info!(file = EXPORT_FILE, "export complete"),
                    Err(e) => error!("export failed: {e}"),
                }
                return Ok(());
            }
            _ => {}
        }

        // Route to the open filter menu; a false return closes it and
        // discards its uncommitted search text.
        if let Some(menu) = &mut self.filter_menu {
            let keep_open = menu.handle_action(action)?;
            if !keep_open {
                self.filter_menu = None;
            }
            return Ok(());
        }

        self.grid_table.handle_action(action)?;
        Ok(())
    }

    /// Toggle the filter-menu entry under the cursor; commits immediately.
    fn toggle_menu_entry(&mut self) {
        let Some(menu) = &self.filter_menu else {
            return;
        };
        let col = menu.column();
        let entry = menu.current_entry();
        let all_selected = menu.all_selected();

        let grid = self.grid_table.grid_mut();
        match entry {
            MenuEntry::SelectAll => {
                if all_selected {
                    grid.clear_column_filter(col);
                } else {
                    grid.select_all_filter(col);
                }
            }
            MenuEntry::Value(value) => grid.toggle_filter_value(col, &value),
        }
        self.sync_menu();
    }

    fn sync_menu(&mut self) {
        if let Some(menu) = &mut self.filter_menu {
            menu.sync(self.grid_table.grid());
        }
    }

    /// Handle a mouse event: cell focus/clicks, header sort, resize drags,
    /// and outside-click defocus/menu dismissal.
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<()> {
        let (x, y) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                // Outside click closes the open menu (committed selections
                // stay, the search text does not).
                if let Some(menu) = &self.filter_menu {
                    if !menu.contains(x, y) {
                        self.filter_menu = None;
                    }
                    return Ok(());
                }

                match self.grid_table.hit_test(x, y) {
                    HitTarget::HeaderBoundary { col } => {
                        if let Some(canonical) = self.grid().view().canonical_col(col) {
                            self.grid_table.grid_mut().begin_resize(canonical);
                            self.resize_anchor_x = Some(x);
                        }
                    }
                    HitTarget::Header { col } => {
                        if let Some(canonical) = self.grid().view().canonical_col(col) {
                            self.grid_table.grid_mut().toggle_sort(canonical);
                        }
                    }
                    HitTarget::Cell { row, col } => {
                        let now = Instant::now();
                        let double = self.last_click.is_some_and(|(at, r, c)| {
                            r == row && c == col && now.duration_since(at) < DOUBLE_CLICK_WINDOW
                        });
                        if double {
                            self.grid_table.grid_mut().double_click_cell(row, col);
                            self.last_click = None;
                        } else {
                            self.grid_table.grid_mut().click_cell(row, col);
                            self.last_click = Some((now, row, col));
                        }
                    }
                    HitTarget::Outside => self.grid_table.grid_mut().blur(),
                    HitTarget::Inside => {}
                }
            }
            MouseEventKind::Down(MouseButton::Right) => {
                if let HitTarget::Cell { row, col } = self.grid_table.hit_test(x, y) {
                    self.grid_table.grid_mut().right_click_cell(row, col);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(anchor) = self.resize_anchor_x {
                    let delta = (i32::from(x) - i32::from(anchor)) * i32::from(PIXELS_PER_CELL);
                    self.grid_table.grid_mut().resize_by(delta);
                    self.resize_anchor_x = Some(x);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                // Gesture end commits whatever width was last computed.
                if self.resize_anchor_x.take().is_some() {
                    self.grid_table.grid_mut().end_resize();
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Render the app
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.grid_table.render(frame, area);

        if let Some(menu) = &mut self.filter_menu {
            let menu_area = Self::centered_rect(40, 60, area);
            menu.render(frame, menu_area);
        }

        if self.editing_filter {
            self.render_filter_input(frame, area);
        }

        if self.show_help {
            self.render_help(frame, area);
        }
    }

    fn render_filter_input(&self, frame: &mut Frame, area: Rect) {
        let width = area.width.saturating_sub(8).min(60).max(20);
        let input_area = Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + area.height.saturating_sub(4),
            width,
            height: 3,
        };
        frame.render_widget(Clear, input_area);
        let text = &self.grid().filter().global_text;
        let input = Paragraph::new(format!("{text}_")).block(
            Block::default()
                .title("Global filter (Enter to finish)")
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(self.theme.focused_border_style()),
        );
        frame.render_widget(input, input_area);
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        let mut last_category = None;
        for action in Action::all() {
            let category = action.category();
            if last_category != Some(category) {
                if last_category.is_some() {
                    lines.push(Line::from(""));
                }
                lines.push(Line::styled(
                    category.to_string(),
                    self.theme.header_style(),
                ));
                last_category = Some(category);
            }
            let keys = self.keybindings.get_keys_for_action(action).join(", ");
            lines.push(Line::from(format!(
                "  {:<18} {}",
                keys,
                action.description()
            )));
        }

        let help_area = Self::centered_rect(60, 80, area);
        frame.render_widget(Clear, help_area);
        let help = Paragraph::new(lines).block(
            Block::default()
                .title("Help (any key to close)")
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(self.theme.focused_border_style()),
        );
        frame.render_widget(help, help_area);
    }

    /// Helper to create centered rectangle
    fn centered_rect(percent_w: u16, percent_h: u16, area: Rect) -> Rect {
        let width = (area.width * percent_w) / 100;
        let height = (area.height * percent_h) / 100;
        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let y = area.y + (area.height.saturating_sub(height)) / 2;
        Rect {
            x,
            y,
            width,
            height,
        }
    }
}
