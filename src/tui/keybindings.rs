use crate::tui::action::Action;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Maps KeyEvents to Actions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBindings {
    #[serde(rename = "bindings")]
    bindings_list: Vec<KeyBinding>,

    #[serde(skip)]
    bindings_map: HashMap<KeyPattern, Action>,
}

/// Single keybinding entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBinding {
    pub key: String,
    pub action: Action,
}

/// Pattern for matching key events
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPattern {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let bindings_list = vec![
            // Navigation - Arrow keys
            KeyBinding::new("Up", Action::MoveUp),
            KeyBinding::new("Down", Action::MoveDown),
            KeyBinding::new("Left", Action::MoveLeft),
            KeyBinding::new("Right", Action::MoveRight),
            // Navigation - Vim-style
            KeyBinding::new("k", Action::MoveUp),
            KeyBinding::new("j", Action::MoveDown),
            KeyBinding::new("h", Action::MoveLeft),
            KeyBinding::new("l", Action::MoveRight),
            // Pages
            KeyBinding::new("PageDown", Action::NextPage),
            KeyBinding::new("PageUp", Action::PrevPage),
            KeyBinding::new("n", Action::NextPage),
            KeyBinding::new("p", Action::PrevPage),
            KeyBinding::new("Home", Action::FirstPage),
            KeyBinding::new("End", Action::LastPage),
            KeyBinding::new("g", Action::FirstPage),
            KeyBinding::new("G", Action::LastPage),
            // Data operations
            KeyBinding::new("s", Action::SortColumn),
            KeyBinding::new("f", Action::FilterMenu),
            KeyBinding::new("/", Action::GlobalFilter),
            KeyBinding::new("c", Action::ClearFilters),
            KeyBinding::new("e", Action::Export),
            // Columns
            KeyBinding::new("x", Action::HideColumn),
            KeyBinding::new("u", Action::ShowAllColumns),
            KeyBinding::new(">", Action::WidenColumn),
            KeyBinding::new("<", Action::NarrowColumn),
            KeyBinding::new("a", Action::AutosizeColumn),
            KeyBinding::new("r", Action::ResetColumnWidth),
            KeyBinding::new("Ctrl+Left", Action::MoveColumnLeft),
            KeyBinding::new("Ctrl+Right", Action::MoveColumnRight),
            // Selection
            KeyBinding::new("Space", Action::ToggleSelect),
            // Help
            KeyBinding::new("?", Action::ToggleHelp),
            KeyBinding::new("F1", Action::ToggleHelp),
            // Application
            KeyBinding::new("q", Action::Quit),
            KeyBinding::new("Ctrl+c", Action::Quit),
            KeyBinding::new("Esc", Action::Cancel),
            KeyBinding::new("Enter", Action::Confirm),
        ];

        let bindings_map = Self::build_map(&bindings_list);

        Self {
            bindings_list,
            bindings_map,
        }
    }
}

impl KeyBindings {
    /// Build hashmap from bindings list
    fn build_map(bindings: &[KeyBinding]) -> HashMap<KeyPattern, Action> {
        bindings
            .iter()
            .filter_map(|b| {
                KeyPattern::parse(&b.key)
                    .ok()
                    .map(|pattern| (pattern, b.action))
            })
            .collect()
    }

    /// Get action for key event
    pub fn get_action(&self, key: &KeyEvent) -> Option<Action> {
        let pattern = KeyPattern::from_event(key);
        self.bindings_map.get(&pattern).copied()
    }

    /// Load from JSON config file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut bindings: KeyBindings = serde_json::from_str(&content)?;
        bindings.bindings_map = Self::build_map(&bindings.bindings_list);
        Ok(bindings)
    }

    /// Save to JSON config file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get all bindings for an action (for help display)
    pub fn get_keys_for_action(&self, action: Action) -> Vec<String> {
        self.bindings_list
            .iter()
            .filter(|b| b.action == action)
            .map(|b| b.key.clone())
            .collect()
    }
}

impl KeyBinding {
    pub fn new(key: &str, action: Action) -> Self {
        Self {
            key: key.to_string(),
            action,
        }
    }
}

impl KeyPattern {
    pub fn from_event(event: &KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }

    /// Parse from string (e.g., "Ctrl+c", "?", "F1", "Up")
    pub fn parse(s: &str) -> Result<Self, String> {
        let parts: Vec<&str> = s.split('+').collect();

        let mut modifiers = KeyModifiers::empty();
        let key_part = if parts.len() > 1 {
            for part in &parts[..parts.len() - 1] {
                match part.to_lowercase().as_str() {
                    "ctrl" => modifiers |= KeyModifiers::CONTROL,
                    "alt" => modifiers |= KeyModifiers::ALT,
                    "shift" => modifiers |= KeyModifiers::SHIFT,
                    _ => return Err(format!("Unknown modifier: {}", part)),
                }
            }
            parts[parts.len() - 1]
        } else {
            // Single shifted characters carry an implicit SHIFT modifier
            if s.len() == 1 {
                let ch = s.chars().next().ok_or("empty key")?;
                if ch.is_uppercase() || "!@#$%^&*()_+{}|:\"<>?".contains(ch) {
                    modifiers |= KeyModifiers::SHIFT;
                }
            }
            parts[0]
        };

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "tab" => KeyCode::Tab,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "backspace" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "space" => KeyCode::Char(' '),

            // Single characters (before the function-key arm so 'f' parses
            // as a character). Shifted characters keep their case so the
            // pattern matches the event crossterm reports.
            s if s.len() == 1 => {
                let ch = key_part.chars().next().ok_or("empty key")?;
                if modifiers.contains(KeyModifiers::SHIFT) {
                    KeyCode::Char(ch)
                } else {
                    KeyCode::Char(ch.to_ascii_lowercase())
                }
            }

            s if s.starts_with('f') && s.len() >= 2 && s.len() <= 3 => {
                match s[1..].parse::<u8>() {
                    Ok(n) if (1..=12).contains(&n) => KeyCode::F(n),
                    _ => return Err(format!("Invalid function key: {}", s)),
                }
            }

            _ => return Err(format!("Unknown key: {}", key_part)),
        };

        Ok(Self { code, modifiers })
    }
}
