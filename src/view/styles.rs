//! Combo box styling.
//!
//! Two palettes (dark and light terminals), plus a colorless fallback when
//! `NO_COLOR` is set or `--no-color` is passed.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Colors on, regardless of environment.
    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== ComboBoxStyles =====

/// Styles for every part of the combo box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComboBoxStyles {
    /// Title text.
    pub title: Style,
    /// Query text.
    pub text: Style,
    /// Placeholder shown for an empty query.
    pub placeholder: Style,
    /// Text cursor cell.
    pub cursor: Style,
    /// Field border without focus.
    pub border: Style,
    /// Field border with focus.
    pub border_focused: Style,
    /// Field border while invalid.
    pub border_invalid: Style,
    /// Clear and toggle affordances.
    pub affordance: Style,
    /// Invalid marker and invalid text.
    pub invalid: Style,
    /// Menu border.
    pub menu_border: Style,
    /// Menu row.
    pub item: Style,
    /// Highlighted menu row.
    pub highlight: Style,
    /// Selected-item check mark.
    pub selected_mark: Style,
    /// Helper text and the empty-menu message.
    pub helper: Style,
    /// Applied over everything while disabled.
    pub disabled: Style,
}

impl ComboBoxStyles {
    /// Dark-terminal palette.
    pub fn dark() -> Self {
        Self {
            title: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            text: Style::default().fg(Color::White),
            placeholder: Style::default().fg(Color::DarkGray),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
            border: Style::default().fg(Color::Gray),
            border_focused: Style::default().fg(Color::Cyan),
            border_invalid: Style::default().fg(Color::Red),
            affordance: Style::default().fg(Color::Gray),
            invalid: Style::default().fg(Color::Red),
            menu_border: Style::default().fg(Color::Gray),
            item: Style::default().fg(Color::White),
            highlight: Style::default()
                .bg(Color::Cyan)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            selected_mark: Style::default().fg(Color::Green),
            helper: Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
            disabled: Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
        }
    }

    /// Light-terminal palette.
    pub fn light() -> Self {
        Self {
            title: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            text: Style::default().fg(Color::Black),
            placeholder: Style::default().fg(Color::Gray),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
            border: Style::default().fg(Color::DarkGray),
            border_focused: Style::default().fg(Color::Blue),
            border_invalid: Style::default().fg(Color::Red),
            affordance: Style::default().fg(Color::DarkGray),
            invalid: Style::default().fg(Color::Red),
            menu_border: Style::default().fg(Color::DarkGray),
            item: Style::default().fg(Color::Black),
            highlight: Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            selected_mark: Style::default().fg(Color::Green),
            helper: Style::default().fg(Color::DarkGray),
            disabled: Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
        }
    }

    /// Colorless styles: modifiers only, so highlight and cursor stay visible.
    pub fn plain() -> Self {
        let none = Style::default();
        Self {
            title: none.add_modifier(Modifier::BOLD),
            text: none,
            placeholder: none.add_modifier(Modifier::DIM),
            cursor: none.add_modifier(Modifier::REVERSED),
            border: none,
            border_focused: none.add_modifier(Modifier::BOLD),
            border_invalid: none,
            affordance: none,
            invalid: none.add_modifier(Modifier::BOLD),
            menu_border: none,
            item: none,
            highlight: none.add_modifier(Modifier::REVERSED),
            selected_mark: none,
            helper: none.add_modifier(Modifier::DIM),
            disabled: none.add_modifier(Modifier::DIM),
        }
    }

    /// Pick the palette for a theme flag and color setting.
    pub fn select(light: bool, colors: ColorConfig) -> Self {
        match (colors.colors_enabled(), light) {
            (false, _) => Self::plain(),
            (true, true) => Self::light(),
            (true, false) => Self::dark(),
        }
    }
}

impl Default for ComboBoxStyles {
    fn default() -> Self {
        Self::dark()
    }
}

// ===== Tests =====
