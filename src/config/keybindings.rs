//! Keyboard bindings configuration.

use crate::config::ConfigError;
use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Provides default bindings with the option to override them per action via
/// the `[keybindings]` config table. Plain printable characters are always
/// text input and never reach these bindings.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&key).copied()
    }

    /// Bind `key` to `action`, replacing any previous binding of that key.
    pub fn bind(&mut self, key: KeyEvent, action: KeyAction) {
        self.bindings.insert(key, action);
    }

    /// Defaults with per-action overrides from the config file.
    ///
    /// Each listed action loses its default keys and gets exactly the listed
    /// ones. Unlisted actions keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownAction` for an unknown action name and
    /// `ConfigError::InvalidKeySpec` for an unparsable key.
    pub fn from_overrides(overrides: &HashMap<String, Vec<String>>) -> Result<Self, ConfigError> {
        let mut bindings = Self::default();

        for (name, specs) in overrides {
            let action = KeyAction::from_config_name(name)
                .ok_or_else(|| ConfigError::UnknownAction(name.clone()))?;

            bindings.bindings.retain(|_, a| *a != action);
            for spec in specs {
                bindings.bind(parse_key_spec(spec)?, action);
            }
        }

        Ok(bindings)
    }
}

/// Parse a key spec such as `"down"`, `"ctrl+n"` or `"alt+pagedown"`.
///
/// Modifiers (`ctrl`, `alt`, `shift`) are joined with `+` before the key
/// name. Single characters need a `ctrl` or `alt` modifier, since unmodified
/// characters are typed into the query.
///
/// # Errors
///
/// Returns `ConfigError::InvalidKeySpec` describing what was wrong.
pub fn parse_key_spec(spec: &str) -> Result<KeyEvent, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidKeySpec {
        spec: spec.to_string(),
        reason: reason.to_string(),
    };

    let mut parts: Vec<&str> = spec.split('+').map(str::trim).collect();
    let key_name = parts
        .pop()
        .filter(|k| !k.is_empty())
        .ok_or_else(|| invalid("missing key name"))?;

    let mut modifiers = KeyModifiers::NONE;
    for part in parts {
        modifiers |= match part.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => KeyModifiers::CONTROL,
            "alt" => KeyModifiers::ALT,
            "shift" => KeyModifiers::SHIFT,
            _ => return Err(invalid("unknown modifier")),
        };
    }

    let code = match key_name.to_ascii_lowercase().as_str() {
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "enter" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        _ => {
            let mut chars = key_name.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => {
                    if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
                        return Err(invalid("characters need a ctrl or alt modifier"));
                    }
                    KeyCode::Char(ch.to_ascii_lowercase())
                }
                _ => return Err(invalid("unknown key name")),
            }
        }
    };

    Ok(KeyEvent::new(code, modifiers))
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = HashMap::new();

        // Highlight movement
        bindings.insert(
            KeyEvent::new(KeyCode::Down, KeyModifiers::NONE),
            KeyAction::MoveDown,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Up, KeyModifiers::NONE),
            KeyAction::MoveUp,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL),
            KeyAction::MoveDown,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('p'), KeyModifiers::CONTROL),
            KeyAction::MoveUp,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::PageDown, KeyModifiers::NONE),
            KeyAction::PageDown,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::PageUp, KeyModifiers::NONE),
            KeyAction::PageUp,
        );

        // Selection
        bindings.insert(
            KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
            KeyAction::Confirm,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
            KeyAction::Clear,
        );

        // Menu toggle
        bindings.insert(
            KeyEvent::new(KeyCode::Down, KeyModifiers::ALT),
            KeyAction::ToggleMenu,
        );

        // Text cursor
        bindings.insert(
            KeyEvent::new(KeyCode::Left, KeyModifiers::NONE),
            KeyAction::CursorLeft,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Right, KeyModifiers::NONE),
            KeyAction::CursorRight,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Home, KeyModifiers::NONE),
            KeyAction::CursorHome,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::End, KeyModifiers::NONE),
            KeyAction::CursorEnd,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL),
            KeyAction::CursorHome,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('e'), KeyModifiers::CONTROL),
            KeyAction::CursorEnd,
        );

        Self { bindings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings_map_arrows_to_highlight_moves() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE)),
            Some(KeyAction::MoveDown)
        );
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE)),
            Some(KeyAction::MoveUp)
        );
    }

    #[test]
    fn default_bindings_map_enter_and_escape() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
            Some(KeyAction::Confirm)
        );
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
            Some(KeyAction::Clear)
        );
    }

    #[test]
    fn default_bindings_leave_space_unbound() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE)),
            None,
            "Space must stay text input"
        );
    }

    #[test]
    fn parse_key_spec_reads_named_keys_and_modifiers() {
        assert_eq!(
            parse_key_spec("down"),
            Ok(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE))
        );
        assert_eq!(
            parse_key_spec("ctrl+j"),
            Ok(KeyEvent::new(KeyCode::Char('j'), KeyModifiers::CONTROL))
        );
        assert_eq!(
            parse_key_spec("Alt+PageDown"),
            Ok(KeyEvent::new(KeyCode::PageDown, KeyModifiers::ALT))
        );
    }

    #[test]
    fn parse_key_spec_rejects_bare_characters() {
        assert!(matches!(
            parse_key_spec("j"),
            Err(ConfigError::InvalidKeySpec { .. })
        ));
    }

    #[test]
    fn parse_key_spec_rejects_unknown_modifier_and_empty_key() {
        assert!(parse_key_spec("hyper+j").is_err());
        assert!(parse_key_spec("ctrl+").is_err());
        assert!(parse_key_spec("").is_err());
    }

    #[test]
    fn overrides_replace_defaults_for_listed_actions_only() {
        let mut overrides = HashMap::new();
        overrides.insert("move_down".to_string(), vec!["ctrl+j".to_string()]);

        let bindings = KeyBindings::from_overrides(&overrides).expect("valid overrides");

        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Char('j'), KeyModifiers::CONTROL)),
            Some(KeyAction::MoveDown)
        );
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE)),
            None,
            "Default Down binding should be replaced"
        );
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE)),
            Some(KeyAction::MoveUp),
            "Unlisted actions keep defaults"
        );
    }

    #[test]
    fn overrides_reject_unknown_action() {
        let mut overrides = HashMap::new();
        overrides.insert("scroll_down".to_string(), vec!["down".to_string()]);

        assert_eq!(
            KeyBindings::from_overrides(&overrides).unwrap_err(),
            ConfigError::UnknownAction("scroll_down".to_string())
        );
    }
}
