//! Combo box render projection.
//!
//! A pure mapping from [`ComboBox`] state to a ratatui buffer. Geometry is
//! computed once by [`ComboBoxLayout::compute`] and shared between rendering
//! and mouse hit testing, so clicks land on exactly what was drawn.

use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, StatefulWidget, Widget};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::state::{ComboBox, Direction, ListBoxType, Presentation};
use crate::view::styles::ComboBoxStyles;

/// Clear-selection affordance.
pub const CLEAR_SYMBOL: &str = "×";
/// Toggle affordance while the menu is closed.
pub const CLOSED_SYMBOL: &str = "▾";
/// Toggle affordance while the menu is open.
pub const OPEN_SYMBOL: &str = "▴";
/// Marker shown while the value is invalid.
pub const INVALID_SYMBOL: &str = "⚠";
/// Prefix of the selected row.
pub const SELECTED_MARK: &str = "✓ ";
/// Prefix of every other row.
pub const UNSELECTED_MARK: &str = "  ";
/// Row shown when the open menu has nothing to list.
pub const EMPTY_MENU_TEXT: &str = "No matching items";

/// What a mouse position points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// The input field or its title.
    Input,
    /// The clear affordance.
    Clear,
    /// The open/close affordance.
    Toggle,
    /// A menu row, as an index into the visible list.
    Row(usize),
    /// The menu frame.
    Menu,
    /// Outside the widget.
    Outside,
}

/// Screen geometry of one rendered combo box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComboBoxLayout {
    /// Title line (or inline title prefix).
    pub title: Option<Rect>,
    /// Input field including its border.
    pub field: Rect,
    /// Region holding the query text or placeholder.
    pub query: Rect,
    /// Invalid marker cell.
    pub invalid_marker: Option<Rect>,
    /// Clear affordance cell, present while there is something to clear.
    pub clear: Option<Rect>,
    /// Toggle affordance cell.
    pub toggle: Rect,
    /// Menu including its border, while open.
    pub menu: Option<Rect>,
    /// Menu rows inside the border.
    pub rows: Rect,
    /// Visible-list index of the first drawn row.
    pub row_offset: usize,
    /// Helper or invalid text line.
    pub helper: Option<Rect>,
}

impl ComboBoxLayout {
    /// Lay out `combo` inside `area`.
    ///
    /// Top to bottom: title, input field, menu (above the field when the
    /// direction is `Top`), helper text. Parts that do not fit are clipped.
    pub fn compute<T: Clone + PartialEq>(combo: &ComboBox<T>, area: Rect) -> Self {
        let p = combo.presentation();
        let inline = p.list_box_type == ListBoxType::Inline;

        let menu_height = if combo.is_open() {
            let rows = combo.visible_len().clamp(1, p.size.max_visible_rows());
            rows as u16 + 2
        } else {
            0
        };

        let mut y = area.y;
        let mut take = |height: u16| {
            let rect = Rect::new(area.x, y, area.width, height).intersection(area);
            y = y.saturating_add(height);
            rect
        };

        let title = (p.title_text.is_some() && !inline).then(|| take(1));
        let field_height = if inline { 1 } else { 3 };
        let (menu, field) = match p.direction {
            Direction::Top => {
                let menu = combo.is_open().then(|| take(menu_height));
                (menu, take(field_height))
            }
            Direction::Bottom => {
                let field = take(field_height);
                (combo.is_open().then(|| take(menu_height)), field)
            }
        };
        let helper = bottom_text(p).is_some().then(|| take(1));

        let (title, text) = if inline {
            let prefix = p
                .title_text
                .as_deref()
                .map_or(0, |t| (t.width() + 1) as u16)
                .min(field.width);
            let title = (prefix > 0).then(|| Rect::new(field.x, field.y, prefix, field.height));
            let text = Rect::new(field.x + prefix, field.y, field.width - prefix, field.height);
            (title, text)
        } else {
            (title, bordered().inner(field))
        };

        // Affordances sit at the right end of the text row: [⚠ ][× ]▾
        let show_clear = !p.disabled && !combo.query().is_empty();
        let tail_width = 1 + if p.invalid { 2 } else { 0 } + if show_clear { 2 } else { 0 };
        let tail_x = text.right().saturating_sub(tail_width).max(text.x);
        let text_row = text.height.min(1);
        let cell = |x: u16| Rect::new(x, text.y, u16::from(x < text.right()), text_row);

        let mut x = tail_x;
        let invalid_marker = p.invalid.then(|| {
            let rect = cell(x);
            x += 2;
            rect
        });
        let clear = show_clear.then(|| {
            let rect = cell(x);
            x += 2;
            rect
        });
        let toggle = cell(x);

        let query = Rect::new(
            text.x,
            text.y,
            tail_x.saturating_sub(text.x).saturating_sub(1),
            text_row,
        );

        let rows = menu.map(|m| bordered().inner(m)).unwrap_or_default();
        let row_offset = menu_offset(combo.highlighted_index(), rows.height as usize);

        Self {
            title,
            field,
            query,
            invalid_marker,
            clear,
            toggle,
            menu,
            rows,
            row_offset,
            helper,
        }
    }

    /// Resolve a mouse position.
    pub fn hit_test(&self, column: u16, row: u16) -> Hit {
        let pos = Position::new(column, row);
        if self.clear.is_some_and(|r| r.contains(pos)) {
            return Hit::Clear;
        }
        if self.toggle.contains(pos) {
            return Hit::Toggle;
        }
        if self.field.contains(pos) || self.title.is_some_and(|r| r.contains(pos)) {
            return Hit::Input;
        }
        if self.rows.contains(pos) {
            return Hit::Row(self.row_offset + usize::from(row - self.rows.y));
        }
        if self.menu.is_some_and(|r| r.contains(pos)) {
            return Hit::Menu;
        }
        Hit::Outside
    }
}

/// First drawn row so that the highlight stays on screen.
pub fn menu_offset(highlight: Option<usize>, rows: usize) -> usize {
    match highlight {
        Some(h) if rows > 0 && h >= rows => h + 1 - rows,
        _ => 0,
    }
}

fn bordered() -> Block<'static> {
    Block::default().borders(Borders::ALL)
}

/// `rect` when it has cells to draw into.
fn drawable(rect: Option<Rect>) -> Option<Rect> {
    rect.filter(|r| !r.is_empty())
}

/// Text under the field: the invalid text while invalid, else helper text.
fn bottom_text(p: &Presentation) -> Option<(&str, bool)> {
    if p.invalid {
        p.invalid_text.as_deref().map(|t| (t, true))
    } else if p.shows_helper_text() {
        p.helper_text.as_deref().map(|t| (t, false))
    } else {
        None
    }
}

/// Ratatui widget drawing a [`ComboBox`].
pub struct ComboBoxWidget<'a, T> {
    combo: &'a ComboBox<T>,
    styles: ComboBoxStyles,
    focused: bool,
    item_to_element: Option<&'a dyn Fn(&T) -> Line<'static>>,
}

impl<'a, T: Clone + PartialEq> ComboBoxWidget<'a, T> {
    /// Widget for `combo` with the default styles, unfocused.
    pub fn new(combo: &'a ComboBox<T>) -> Self {
        Self {
            combo,
            styles: ComboBoxStyles::default(),
            focused: false,
            item_to_element: None,
        }
    }

    /// Use `styles`.
    pub fn styles(mut self, styles: ComboBoxStyles) -> Self {
        self.styles = styles;
        self
    }

    /// Draw the focus border and the text cursor.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Render rows with `f` instead of the item label.
    pub fn item_to_element(mut self, f: &'a dyn Fn(&T) -> Line<'static>) -> Self {
        self.item_to_element = Some(f);
        self
    }

    fn render_title(&self, layout: &ComboBoxLayout, buf: &mut Buffer) {
        let title = &self.combo.presentation().title_text;
        let (Some(rect), Some(title)) = (drawable(layout.title), title) else {
            return;
        };
        buf.set_stringn(rect.x, rect.y, title, rect.width as usize, self.styles.title);
    }

    fn render_field(&self, layout: &ComboBoxLayout, buf: &mut Buffer) {
        let p = self.combo.presentation();

        if p.list_box_type == ListBoxType::Default {
            let border_style = if p.invalid {
                self.styles.border_invalid
            } else if self.focused {
                self.styles.border_focused
            } else {
                self.styles.border
            };
            bordered().border_style(border_style).render(layout.field, buf);
        }

        self.render_query(layout.query, buf);

        if let Some(rect) = drawable(layout.invalid_marker) {
            buf.set_string(rect.x, rect.y, INVALID_SYMBOL, self.styles.invalid);
        }
        if let Some(rect) = drawable(layout.clear) {
            buf.set_string(rect.x, rect.y, CLEAR_SYMBOL, self.styles.affordance);
        }
        if !layout.toggle.is_empty() {
            let symbol = if self.combo.is_open() {
                OPEN_SYMBOL
            } else {
                CLOSED_SYMBOL
            };
            buf.set_string(layout.toggle.x, layout.toggle.y, symbol, self.styles.affordance);
        }
    }

    fn render_query(&self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let width = area.width as usize;
        let query = self.combo.query();
        let widths: Vec<usize> = query.chars().map(|c| c.width().unwrap_or(0)).collect();
        let cursor = self.combo.cursor().min(widths.len());

        // Scroll horizontally so the cursor cell stays visible; widths are in cells.
        let mut start = cursor;
        let mut before_cursor = 0;
        while start > 0 && before_cursor + widths[start - 1] < width {
            start -= 1;
            before_cursor += widths[start];
        }

        if query.is_empty() {
            let placeholder = &self.combo.presentation().placeholder;
            buf.set_stringn(area.x, area.y, placeholder, width, self.styles.placeholder);
        } else {
            let mut used = 0;
            let shown: String = query
                .chars()
                .zip(&widths)
                .skip(start)
                .take_while(|(_, w)| {
                    used += **w;
                    used <= width
                })
                .map(|(c, _)| c)
                .collect();
            buf.set_stringn(area.x, area.y, shown, width, self.styles.text);
        }

        if self.focused && !self.combo.is_disabled() {
            let x = area.x + before_cursor as u16;
            if let Some(cell) = buf.cell_mut((x, area.y)) {
                cell.set_style(self.styles.cursor);
            }
        }
    }

    fn render_menu(&self, layout: &ComboBoxLayout, buf: &mut Buffer) {
        let Some(menu) = drawable(layout.menu) else {
            return;
        };

        let items: Vec<ListItem> = if self.combo.visible_len() == 0 {
            vec![ListItem::new(Line::from(Span::styled(
                format!("{UNSELECTED_MARK}{EMPTY_MENU_TEXT}"),
                self.styles.helper,
            )))]
        } else {
            self.combo
                .visible_items()
                .map(|item| ListItem::new(self.row_line(item)))
                .collect()
        };

        let list = List::new(items)
            .block(bordered().border_style(self.styles.menu_border))
            .highlight_style(self.styles.highlight);
        let mut list_state = ListState::default()
            .with_offset(layout.row_offset)
            .with_selected(self.combo.highlighted_index());

        Clear.render(menu, buf);
        StatefulWidget::render(list, menu, buf, &mut list_state);
    }

    fn row_line(&self, item: &T) -> Line<'static> {
        let mark = if self.combo.is_selected(item) {
            Span::styled(SELECTED_MARK, self.styles.selected_mark)
        } else {
            Span::raw(UNSELECTED_MARK)
        };

        let mut spans = vec![mark];
        match self.item_to_element {
            Some(element) => spans.extend(element(item).spans),
            None => spans.push(Span::styled(self.combo.label_of(item), self.styles.item)),
        }
        Line::from(spans)
    }

    fn render_helper(&self, layout: &ComboBoxLayout, buf: &mut Buffer) {
        let Some(rect) = drawable(layout.helper) else {
            return;
        };
        let Some((text, invalid)) = bottom_text(self.combo.presentation()) else {
            return;
        };
        let style: Style = if invalid {
            self.styles.invalid
        } else {
            self.styles.helper
        };
        buf.set_stringn(rect.x, rect.y, text, rect.width as usize, style);
    }
}

impl<T: Clone + PartialEq> Widget for ComboBoxWidget<'_, T> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = ComboBoxLayout::compute(self.combo, area);

        self.render_title(&layout, buf);
        self.render_field(&layout, buf);
        self.render_menu(&layout, buf);
        self.render_helper(&layout, buf);

        if self.combo.is_disabled() {
            buf.set_style(area, self.styles.disabled);
        }
    }
}

#[cfg(test)]
#[path = "combo_box_tests.rs"]
mod tests;
