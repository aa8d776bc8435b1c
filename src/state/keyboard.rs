//! Keyboard dispatch for the combo box.
//!
//! Printable characters (space included), Backspace and Delete always edit
//! the query and open a closed menu. Every other key goes through
//! [`KeyBindings`] and becomes a [`KeyAction`].

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::config::KeyBindings;
use crate::model::KeyAction;
use crate::state::combo_box::ComboBox;
use crate::state::input_handler::{
    handle_backspace, handle_char_input, handle_cursor_end, handle_cursor_home,
    handle_cursor_left, handle_cursor_right, handle_delete, QueryInput,
};

/// Whether a key was used by the combo box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The key was handled (the state may or may not have changed).
    Consumed,
    /// The key has no meaning here; the host may use it.
    Ignored,
}

/// Route a key event to the combo box.
pub fn handle_key<T: Clone + PartialEq>(
    combo: &mut ComboBox<T>,
    bindings: &KeyBindings,
    key: KeyEvent,
) -> KeyOutcome {
    if combo.is_disabled() {
        return KeyOutcome::Ignored;
    }

    let text_modifiers = !key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

    match key.code {
        KeyCode::Char(ch) if text_modifiers => {
            combo.open();
            combo.edit_query(|input| handle_char_input(input, ch));
            KeyOutcome::Consumed
        }
        KeyCode::Backspace if text_modifiers => {
            combo.open();
            combo.edit_query(handle_backspace);
            KeyOutcome::Consumed
        }
        KeyCode::Delete if text_modifiers => {
            combo.open();
            combo.edit_query(handle_delete);
            KeyOutcome::Consumed
        }
        _ => match bindings.get(key) {
            Some(action) => handle_action(combo, action),
            None => KeyOutcome::Ignored,
        },
    }
}

/// Apply a bound action.
pub fn handle_action<T: Clone + PartialEq>(combo: &mut ComboBox<T>, action: KeyAction) -> KeyOutcome {
    if combo.is_disabled() {
        return KeyOutcome::Ignored;
    }
    debug!(id = %combo.id(), ?action, open = combo.is_open(), "key action");

    let page = combo.presentation().size.max_visible_rows() as isize;
    match action {
        KeyAction::MoveDown => move_if_open(combo, 1),
        KeyAction::MoveUp => move_if_open(combo, -1),
        KeyAction::PageDown => move_if_open(combo, page),
        KeyAction::PageUp => move_if_open(combo, -page),
        KeyAction::Confirm => {
            if !combo.is_open() {
                combo.open();
            } else if combo.highlighted_index().is_some() {
                combo.confirm_selection();
            } else {
                combo.close();
            }
            KeyOutcome::Consumed
        }
        KeyAction::Clear => {
            combo.clear_selection();
            combo.close();
            KeyOutcome::Consumed
        }
        KeyAction::ToggleMenu => {
            combo.toggle();
            KeyOutcome::Consumed
        }
        KeyAction::CursorLeft => edit(combo, handle_cursor_left),
        KeyAction::CursorRight => edit(combo, handle_cursor_right),
        KeyAction::CursorHome => edit(combo, handle_cursor_home),
        KeyAction::CursorEnd => edit(combo, handle_cursor_end),
    }
}

fn move_if_open<T: Clone + PartialEq>(combo: &mut ComboBox<T>, delta: isize) -> KeyOutcome {
    if !combo.is_open() {
        return KeyOutcome::Ignored;
    }
    combo.move_highlight(delta);
    KeyOutcome::Consumed
}

fn edit<T: Clone + PartialEq>(
    combo: &mut ComboBox<T>,
    f: fn(QueryInput) -> QueryInput,
) -> KeyOutcome {
    combo.edit_query(f);
    KeyOutcome::Consumed
}

#[cfg(test)]
#[path = "keyboard_tests.rs"]
mod tests;
