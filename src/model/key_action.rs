//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
/// Text entry (printable characters, Backspace, Delete) is not an action: it
/// is always routed to the query editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Move the highlight one row down while open. Default: ↓
    MoveDown,
    /// Move the highlight one row up while open. Default: ↑
    MoveUp,
    /// Move the highlight one page down while open. Default: Page Down
    PageDown,
    /// Move the highlight one page up while open. Default: Page Up
    PageUp,
    /// Confirm the highlighted row, or open the menu when closed. Default: Enter
    Confirm,
    /// Clear the selection and query, then close. Default: Esc
    Clear,
    /// Open or close the menu without touching the query. Default: Alt+↓
    ToggleMenu,
    /// Move the text cursor one character left. Default: ←
    CursorLeft,
    /// Move the text cursor one character right. Default: →
    CursorRight,
    /// Move the text cursor to the start of the query. Default: Home
    CursorHome,
    /// Move the text cursor to the end of the query. Default: End
    CursorEnd,
}

impl KeyAction {
    /// Every action, in the order used for config files and help text.
    pub const ALL: [KeyAction; 11] = [
        KeyAction::MoveDown,
        KeyAction::MoveUp,
        KeyAction::PageDown,
        KeyAction::PageUp,
        KeyAction::Confirm,
        KeyAction::Clear,
        KeyAction::ToggleMenu,
        KeyAction::CursorLeft,
        KeyAction::CursorRight,
        KeyAction::CursorHome,
        KeyAction::CursorEnd,
    ];

    /// Name used for this action in the `[keybindings]` config table.
    pub fn config_name(self) -> &'static str {
        match self {
            KeyAction::MoveDown => "move_down",
            KeyAction::MoveUp => "move_up",
            KeyAction::PageDown => "page_down",
            KeyAction::PageUp => "page_up",
            KeyAction::Confirm => "confirm",
            KeyAction::Clear => "clear",
            KeyAction::ToggleMenu => "toggle_menu",
            KeyAction::CursorLeft => "cursor_left",
            KeyAction::CursorRight => "cursor_right",
            KeyAction::CursorHome => "cursor_home",
            KeyAction::CursorEnd => "cursor_end",
        }
    }

    /// Look up an action by its config name.
    pub fn from_config_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.config_name() == name)
    }
}
