//! Event handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Key action that can be performed in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    // Navigation
    MoveUp,
    MoveDown,
    JumpToTop,
    JumpToBottom,
    PageUp,
    PageDown,

    // Tree operations
    ToggleExpand,

    // Activation
    /// Select the directory under the cursor, or open a file.
    Select,
    /// Move the selection to its parent directory.
    GoToParent,

    // Pane focus
    SwitchPane,

    // Bucket operations
    Refresh,
    /// Open the creation panel.
    Create,
    /// Delete the highlighted entry (with confirmation).
    Delete,

    // UI toggles
    Configure,
    ToggleTheme,
    ToggleHelp,

    // Confirmation
    Confirm,
    Cancel,

    // Application
    Quit,
    ForceQuit,

    // No action
    None,
}

impl KeyAction {
    /// Convert a key event to an action.
    pub fn from_key_event(event: KeyEvent) -> Self {
        match (event.code, event.modifiers) {
            // Quit - only 'q' quits, Esc dismisses dialogs and status lines
            (KeyCode::Char('q'), KeyModifiers::NONE) => KeyAction::Quit,
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::ForceQuit,

            (KeyCode::Esc, _) => KeyAction::Cancel,

            // Navigation - vim style
            (KeyCode::Char('j'), KeyModifiers::NONE) => KeyAction::MoveDown,
            (KeyCode::Char('k'), KeyModifiers::NONE) => KeyAction::MoveUp,

            // Navigation - arrow keys
            (KeyCode::Down, _) => KeyAction::MoveDown,
            (KeyCode::Up, _) => KeyAction::MoveUp,

            // Jump
            (KeyCode::Char('g'), KeyModifiers::NONE) => KeyAction::JumpToTop,
            (KeyCode::Char('G'), KeyModifiers::SHIFT) => KeyAction::JumpToBottom,
            (KeyCode::Home, _) => KeyAction::JumpToTop,
            (KeyCode::End, _) => KeyAction::JumpToBottom,

            // Page navigation
            (KeyCode::PageUp, _) => KeyAction::PageUp,
            (KeyCode::PageDown, _) => KeyAction::PageDown,
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => KeyAction::PageUp,
            (KeyCode::Char('d'), KeyModifiers::CONTROL) => KeyAction::PageDown,

            // Tree expand/collapse
            (KeyCode::Char('o'), KeyModifiers::NONE) => KeyAction::ToggleExpand,
            (KeyCode::Char('l'), KeyModifiers::NONE) => KeyAction::ToggleExpand,
            (KeyCode::Right, _) => KeyAction::ToggleExpand,

            // Activation
            (KeyCode::Enter, _) => KeyAction::Select,
            (KeyCode::Backspace, _) => KeyAction::GoToParent,
            (KeyCode::Char('-'), KeyModifiers::NONE) => KeyAction::GoToParent,
            (KeyCode::Char('h'), KeyModifiers::NONE) => KeyAction::GoToParent,
            (KeyCode::Left, _) => KeyAction::GoToParent,

            // Pane focus
            (KeyCode::Tab, KeyModifiers::NONE) => KeyAction::SwitchPane,
            (KeyCode::BackTab, _) => KeyAction::SwitchPane,

            // Bucket operations
            (KeyCode::Char('R'), KeyModifiers::SHIFT) => KeyAction::Refresh,
            (KeyCode::Char('a'), KeyModifiers::NONE) => KeyAction::Create,
            (KeyCode::Char('d'), KeyModifiers::NONE) => KeyAction::Delete,
            (KeyCode::Delete, _) => KeyAction::Delete,

            // UI toggles
            (KeyCode::Char('c'), KeyModifiers::NONE) => KeyAction::Configure,
            (KeyCode::Char('t'), KeyModifiers::NONE) => KeyAction::ToggleTheme,
            (KeyCode::Char('?'), KeyModifiers::NONE) => KeyAction::ToggleHelp,

            // Confirmation (for dialogs)
            (KeyCode::Char('y'), KeyModifiers::NONE) => KeyAction::Confirm,
            (KeyCode::Char('n'), KeyModifiers::NONE) => KeyAction::Cancel,

            _ => KeyAction::None,
        }
    }
}

/// A section of key bindings for the help display.
pub struct HelpSection {
    pub title: &'static str,
    pub bindings: Vec<KeyBinding>,
}

/// Key binding for display in help.
pub struct KeyBinding {
    pub keys: &'static str,
    pub description: &'static str,
}

/// Get all key bindings organized by section for help display.
pub fn get_help_sections() -> Vec<HelpSection> {
    vec![
        HelpSection {
            title: "Navigation",
            bindings: vec![
                KeyBinding { keys: "j/k ↑/↓", description: "Move up/down" },
                KeyBinding { keys: "l/o →", description: "Expand/collapse directory" },
                KeyBinding { keys: "Enter", description: "Select directory / open file" },
                KeyBinding { keys: "h/Bksp/-", description: "Go to parent directory" },
                KeyBinding { keys: "g/G", description: "Jump to top/bottom" },
                KeyBinding { keys: "Ctrl-u/d", description: "Page up/down" },
                KeyBinding { keys: "Tab", description: "Switch pane" },
            ],
        },
        HelpSection {
            title: "Bucket",
            bindings: vec![
                KeyBinding { keys: "a", description: "Create file or folder" },
                KeyBinding { keys: "d/Del", description: "Delete entry (childless only)" },
                KeyBinding { keys: "R", description: "Refresh listing" },
            ],
        },
        HelpSection {
            title: "Display",
            bindings: vec![
                KeyBinding { keys: "c", description: "Edit credentials" },
                KeyBinding { keys: "t", description: "Toggle dark/light theme" },
                KeyBinding { keys: "?", description: "Show this help" },
            ],
        },
        HelpSection {
            title: "Application",
            bindings: vec![
                KeyBinding { keys: "Esc", description: "Dismiss dialog or status" },
                KeyBinding { keys: "q", description: "Quit" },
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_browse_bindings() {
        assert_eq!(
            KeyAction::from_key_event(key(KeyCode::Char('j'), KeyModifiers::NONE)),
            KeyAction::MoveDown
        );
        assert_eq!(
            KeyAction::from_key_event(key(KeyCode::Enter, KeyModifiers::NONE)),
            KeyAction::Select
        );
        assert_eq!(
            KeyAction::from_key_event(key(KeyCode::Char('R'), KeyModifiers::SHIFT)),
            KeyAction::Refresh
        );
        assert_eq!(
            KeyAction::from_key_event(key(KeyCode::Backspace, KeyModifiers::NONE)),
            KeyAction::GoToParent
        );
    }

    #[test]
    fn test_ctrl_c_force_quits() {
        assert_eq!(
            KeyAction::from_key_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            KeyAction::ForceQuit
        );
        assert_eq!(
            KeyAction::from_key_event(key(KeyCode::Char('c'), KeyModifiers::NONE)),
            KeyAction::Configure
        );
    }

    #[test]
    fn test_unmapped_keys_are_none() {
        assert_eq!(
            KeyAction::from_key_event(key(KeyCode::Char('z'), KeyModifiers::NONE)),
            KeyAction::None
        );
    }
}
