use serde::{Deserialize, Serialize};
use std::fmt;

/// All possible actions in the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Action {
    // Navigation
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,

    // Data Operations
    SortColumn,
    FilterMenu,
    GlobalFilter,
    ClearFilters,
    Export,

    // Column Operations
    HideColumn,
    ShowAllColumns,
    WidenColumn,
    NarrowColumn,
    AutosizeColumn,
    ResetColumnWidth,
    MoveColumnLeft,
    MoveColumnRight,

    // Selection
    ToggleSelect,

    // View
    ToggleHelp,

    // Application
    Quit,
    Confirm,
    Cancel,
}

impl Action {
    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Action::MoveUp => "Move focus up",
            Action::MoveDown => "Move focus down",
            Action::MoveLeft => "Move focus left",
            Action::MoveRight => "Move focus right",
            Action::NextPage => "Next page",
            Action::PrevPage => "Previous page",
            Action::FirstPage => "Go to first page",
            Action::LastPage => "Go to last page",
            Action::SortColumn => "Sort by focused column",
            Action::FilterMenu => "Open filter menu for focused column",
            Action::GlobalFilter => "Edit global filter text",
            Action::ClearFilters => "Clear all filters",
            Action::Export => "Export filtered rows to CSV",
            Action::HideColumn => "Hide focused column",
            Action::ShowAllColumns => "Show all columns",
            Action::WidenColumn => "Widen focused column",
            Action::NarrowColumn => "Narrow focused column",
            Action::AutosizeColumn => "Autosize focused column",
            Action::ResetColumnWidth => "Reset focused column width",
            Action::MoveColumnLeft => "Move focused column left",
            Action::MoveColumnRight => "Move focused column right",
            Action::ToggleSelect => "Toggle row selection",
            Action::ToggleHelp => "Toggle help screen",
            Action::Quit => "Quit",
            Action::Confirm => "Confirm",
            Action::Cancel => "Cancel / close overlay",
        }
    }

    /// Get category for grouping in help screen
    pub fn category(&self) -> ActionCategory {
        match self {
            Action::MoveUp
            | Action::MoveDown
            | Action::MoveLeft
            | Action::MoveRight
            | Action::NextPage
            | Action::PrevPage
            | Action::FirstPage
            | Action::LastPage => ActionCategory::Navigation,

            Action::SortColumn
            | Action::FilterMenu
            | Action::GlobalFilter
            | Action::ClearFilters
            | Action::Export => ActionCategory::DataOps,

            Action::HideColumn
            | Action::ShowAllColumns
            | Action::WidenColumn
            | Action::NarrowColumn
            | Action::AutosizeColumn
            | Action::ResetColumnWidth
            | Action::MoveColumnLeft
            | Action::MoveColumnRight => ActionCategory::Columns,

            Action::ToggleSelect => ActionCategory::Selection,

            Action::ToggleHelp => ActionCategory::View,

            Action::Quit | Action::Confirm | Action::Cancel => ActionCategory::Application,
        }
    }

    /// Get all possible actions (for validation)
    pub fn all() -> Vec<Action> {
        vec![
            Action::MoveUp,
            Action::MoveDown,
            Action::MoveLeft,
            Action::MoveRight,
            Action::NextPage,
            Action::PrevPage,
            Action::FirstPage,
            Action::LastPage,
            Action::SortColumn,
            Action::FilterMenu,
            Action::GlobalFilter,
            Action::ClearFilters,
            Action::Export,
            Action::HideColumn,
            Action::ShowAllColumns,
            Action::WidenColumn,
            Action::NarrowColumn,
            Action::AutosizeColumn,
            Action::ResetColumnWidth,
            Action::MoveColumnLeft,
            Action::MoveColumnRight,
            Action::ToggleSelect,
            Action::ToggleHelp,
            Action::Quit,
            Action::Confirm,
            Action::Cancel,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCategory {
    Navigation,
    DataOps,
    Columns,
    Selection,
    View,
    Application,
}

impl fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionCategory::Navigation => write!(f, "Navigation"),
            ActionCategory::DataOps => write!(f, "Data Operations"),
            ActionCategory::Columns => write!(f, "Columns"),
            ActionCategory::Selection => write!(f, "Selection"),
            ActionCategory::View => write!(f, "View"),
            ActionCategory::Application => write!(f, "Application"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_actions_have_descriptions() {
        for action in Action::all() {
            assert!(!action.description().is_empty());
        }
    }

    #[test]
    fn test_action_serialization() {
        let action = Action::FilterMenu;
        let json = serde_json::to_string(&action).unwrap();
        assert_eq!(json, "\"FilterMenu\"");

        let restored: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, action);
    }
}
