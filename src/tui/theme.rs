use ratatui::style::{Color, Modifier, Style};

/// Color scheme for the grid viewer.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // General UI colors
    pub background: Color,
    pub foreground: Color,
    pub border: Color,
    pub border_focused: Color,

    // Grid colors
    pub header_fg: Color,
    pub header_bg: Color,
    pub focused_cell_fg: Color,
    pub focused_cell_bg: Color,
    pub selected_row_bg: Color,
    pub row_alt_bg: Color,

    // Status/feedback colors
    pub status_fg: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Default dark theme
    pub fn dark() -> Self {
        Self {
            name: "Dark".to_string(),
            background: Color::Reset,
            foreground: Color::Gray,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            header_fg: Color::Cyan,
            header_bg: Color::Reset,
            focused_cell_fg: Color::Black,
            focused_cell_bg: Color::Yellow,
            selected_row_bg: Color::Rgb(35, 50, 65),
            row_alt_bg: Color::Rgb(25, 25, 35),
            status_fg: Color::DarkGray,
            error: Color::Red,
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            name: "Light".to_string(),
            background: Color::White,
            foreground: Color::Black,
            border: Color::Gray,
            border_focused: Color::Blue,
            header_fg: Color::Blue,
            header_bg: Color::Rgb(240, 240, 240),
            focused_cell_fg: Color::White,
            focused_cell_bg: Color::Blue,
            selected_row_bg: Color::Rgb(215, 230, 250),
            row_alt_bg: Color::Rgb(250, 250, 250),
            status_fg: Color::Gray,
            error: Color::Red,
        }
    }

    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.header_fg)
            .bg(self.header_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for the focused cell
    pub fn focused_cell_style(&self) -> Style {
        Style::default()
            .fg(self.focused_cell_fg)
            .bg(self.focused_cell_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for selected rows
    pub fn selected_row_style(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.selected_row_bg)
    }

    pub fn normal_style(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    pub fn alt_row_style(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.row_alt_bg)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn focused_border_style(&self) -> Style {
        Style::default().fg(self.border_focused)
    }

    pub fn status_style(&self) -> Style {
        Style::default().fg(self.status_fg)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }
}
