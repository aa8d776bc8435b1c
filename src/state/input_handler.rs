//! Query text editing (pure state transitions).
//!
//! The cursor is a character index, not a byte index, so editing stays
//! correct for non-ASCII labels. All functions take the input by value and
//! return the edited input.

/// Query text plus cursor position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryInput {
    text: String,
    cursor: usize,
}

impl QueryInput {
    /// Input holding `text` with the cursor at the end.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in characters, `0..=char_len()`.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Length of the text in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map_or(self.text.len(), |(offset, _)| offset)
    }
}

/// Insert `ch` at the cursor and advance the cursor.
pub fn handle_char_input(mut input: QueryInput, ch: char) -> QueryInput {
    let offset = input.byte_offset(input.cursor);
    input.text.insert(offset, ch);
    input.cursor += 1;
    input
}

/// Delete the character before the cursor. No-op at position 0.
pub fn handle_backspace(mut input: QueryInput) -> QueryInput {
    if input.cursor == 0 {
        return input;
    }
    let offset = input.byte_offset(input.cursor - 1);
    input.text.remove(offset);
    input.cursor -= 1;
    input
}

/// Delete the character under the cursor. No-op at the end.
pub fn handle_delete(mut input: QueryInput) -> QueryInput {
    if input.cursor >= input.char_len() {
        return input;
    }
    let offset = input.byte_offset(input.cursor);
    input.text.remove(offset);
    input
}

/// Move cursor left by one position. Saturates at 0.
pub fn handle_cursor_left(mut input: QueryInput) -> QueryInput {
    input.cursor = input.cursor.saturating_sub(1);
    input
}

/// Move cursor right by one position. Saturates at the text length.
pub fn handle_cursor_right(mut input: QueryInput) -> QueryInput {
    input.cursor = (input.cursor + 1).min(input.char_len());
    input
}

/// Move cursor to the start.
pub fn handle_cursor_home(mut input: QueryInput) -> QueryInput {
    input.cursor = 0;
    input
}

/// Move cursor to the end.
pub fn handle_cursor_end(mut input: QueryInput) -> QueryInput {
    input.cursor = input.char_len();
    input
}

// ===== Tests =====

#[cfg(test)]
#[path = "input_handler_tests.rs"]
mod tests;
