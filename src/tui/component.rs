use crate::tui::action::Action;
use color_eyre::Result;
use ratatui::{layout::Rect, Frame};

/// Base trait for all TUI components
///
/// All interactive UI elements implement this trait to provide consistent
/// behavior for action handling and rendering.
pub trait Component {
    /// Handle an action
    ///
    /// Returns Ok(true) if the action was handled and consumed.
    /// Returns Ok(false) if the action was not handled and should propagate.
    fn handle_action(&mut self, action: Action) -> Result<bool>;

    /// Render the component within the given area
    fn render(&mut self, frame: &mut Frame, area: Rect);

    /// Get component name for debugging/logging
    fn name(&self) -> &str;
}

/// Focusable component trait
///
/// Components that can receive keyboard input implement this trait.
pub trait Focusable: Component {
    /// Check if component currently has focus
    fn is_focused(&self) -> bool;

    /// Set focus state
    fn set_focused(&mut self, focused: bool);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockComponent {
        name: String,
        focused: bool,
    }

    impl Component for MockComponent {
        fn handle_action(&mut self, action: Action) -> Result<bool> {
            Ok(matches!(action, Action::MoveUp | Action::MoveDown))
        }

        fn render(&mut self, _frame: &mut Frame, _area: Rect) {}

        fn name(&self) -> &str {
            &self.name
        }
    }

    impl Focusable for MockComponent {
        fn is_focused(&self) -> bool {
            self.focused
        }

        fn set_focused(&mut self, focused: bool) {
            self.focused = focused;
        }
    }

    #[test]
    fn test_component_action_handling() {
        let mut comp = MockComponent {
            name: "test".into(),
            focused: false,
        };

        assert!(comp.handle_action(Action::MoveUp).unwrap());
        assert!(!comp.handle_action(Action::Quit).unwrap());
    }

    #[test]
    fn test_focusable() {
        let mut comp = MockComponent {
            name: "test".into(),
            focused: false,
        };

        assert!(!comp.is_focused());
        comp.set_focused(true);
        assert!(comp.is_focused());
    }
}
