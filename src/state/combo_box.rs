//! Combo box state controller.
//!
//! Owns the open state, the query, the highlight and the selection, and keeps
//! the visible list in sync with the query. Transitions are synchronous and
//! report whether they changed anything; notifications go straight to the
//! callbacks supplied in [`ComboBoxProps`].
//!
//! # Invariants
//! - `visible` holds indices into `items`, ascending, recomputed whenever the
//!   query text or the item set changes
//! - `highlight`, when set, is `< visible.len()` and the menu is open
//! - `selected` only changes through confirm, clear, or `set_selected_item`

use std::fmt;

use tracing::debug;

use crate::model::item::LabelFn;
use crate::model::{AccessibilityIds, ComboBoxId, InstanceId, InstanceIdGenerator};
use crate::state::filter::{filter_indices, FilterPolicy};
use crate::state::input_handler::QueryInput;
use crate::state::props::{
    ChangeFn, ComboBoxProps, InputChangeFn, MessageId, Presentation, ToggleClickFn, TranslateFn,
};

/// Accessibility attributes of the combo box in its current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessibilityState {
    /// Accessible name of the list box.
    pub aria_label: String,
    /// Whether the menu is expanded.
    pub aria_expanded: bool,
    /// Id of the highlighted row, if any.
    pub aria_activedescendant: Option<String>,
    /// Whether the value is marked invalid.
    pub aria_invalid: bool,
    /// Whether interaction is disabled.
    pub aria_disabled: bool,
    /// Id of the helper text while it is shown.
    pub aria_describedby: Option<String>,
}

/// Filterable single-select combo box.
pub struct ComboBox<T> {
    id: ComboBoxId,
    instance: InstanceId,
    ids: AccessibilityIds,
    items: Vec<T>,
    item_to_label: LabelFn<T>,
    filter: FilterPolicy<T>,
    on_change: ChangeFn<T>,
    on_input_change: Option<InputChangeFn>,
    on_toggle_click: Option<ToggleClickFn>,
    translate_with_id: Option<TranslateFn>,
    presentation: Presentation,
    controlled: bool,

    input: QueryInput,
    visible: Vec<usize>,
    highlight: Option<usize>,
    selected: Option<T>,
    open: bool,
    focus_requested: bool,
}

impl<T: Clone + PartialEq> ComboBox<T> {
    /// Build a combo box, taking one instance id from `ids`.
    ///
    /// Starts closed. The query is the label of the seeded selection
    /// (`selected_item`, else `initial_selected_item`), or empty.
    pub fn new(props: ComboBoxProps<T>, ids: &InstanceIdGenerator) -> Self {
        let instance = ids.next_id();
        let accessibility_ids =
            AccessibilityIds::new(&props.id, instance, props.presentation.helper_text.is_some());

        let selected = if props.controlled {
            props.selected_item
        } else {
            props.initial_selected_item
        };
        let input = selected
            .as_ref()
            .map(|item| QueryInput::new((props.item_to_label)(item)))
            .unwrap_or_default();

        let mut combo = Self {
            id: props.id,
            instance,
            ids: accessibility_ids,
            items: props.items,
            item_to_label: props.item_to_label,
            filter: props.filter,
            on_change: props.on_change,
            on_input_change: props.on_input_change,
            on_toggle_click: props.on_toggle_click,
            translate_with_id: props.translate_with_id,
            presentation: props.presentation,
            controlled: props.controlled,
            input,
            visible: Vec::new(),
            highlight: None,
            selected,
            open: false,
            focus_requested: false,
        };
        combo.refilter();

        debug!(
            id = %combo.id,
            instance = %combo.instance,
            items = combo.items.len(),
            controlled = combo.controlled,
            "combo box created"
        );
        combo
    }

    // ===== Queries =====

    /// Caller-supplied id.
    pub fn id(&self) -> &ComboBoxId {
        &self.id
    }

    /// Instance number taken from the generator.
    pub fn instance(&self) -> InstanceId {
        self.instance
    }

    /// Element ids for accessibility wiring.
    pub fn ids(&self) -> &AccessibilityIds {
        &self.ids
    }

    /// Full item set.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Label of `item` through the configured label function.
    pub fn label_of(&self, item: &T) -> String {
        (self.item_to_label)(item)
    }

    /// Current query text.
    pub fn query(&self) -> &str {
        self.input.text()
    }

    /// Cursor position within the query, in characters.
    pub fn cursor(&self) -> usize {
        self.input.cursor()
    }

    /// Whether the menu is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether interaction is disabled.
    pub fn is_disabled(&self) -> bool {
        self.presentation.disabled
    }

    /// Whether the selection is owned by the caller.
    pub fn is_controlled(&self) -> bool {
        self.controlled
    }

    /// Presentation settings.
    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    /// Indices into [`items`](Self::items) of the visible rows, in order.
    pub fn visible_indices(&self) -> &[usize] {
        &self.visible
    }

    /// Visible rows, in order.
    pub fn visible_items(&self) -> impl ExactSizeIterator<Item = &T> + '_ {
        self.visible.iter().map(|&i| &self.items[i])
    }

    /// Number of visible rows.
    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// Highlighted row (index into the visible list).
    pub fn highlighted_index(&self) -> Option<usize> {
        self.highlight
    }

    /// Item under the highlight.
    pub fn highlighted_item(&self) -> Option<&T> {
        self.highlight
            .and_then(|row| self.visible.get(row))
            .map(|&i| &self.items[i])
    }

    /// Current selection.
    pub fn selected_item(&self) -> Option<&T> {
        self.selected.as_ref()
    }

    /// Whether `item` is the current selection.
    pub fn is_selected(&self, item: &T) -> bool {
        self.selected.as_ref() == Some(item)
    }

    /// Localized built-in string.
    pub fn translate(&self, message: MessageId) -> String {
        match &self.translate_with_id {
            Some(translate) => translate(message),
            None => message.default_text().to_string(),
        }
    }

    /// Accessibility attributes for the current state.
    pub fn accessibility(&self) -> AccessibilityState {
        AccessibilityState {
            aria_label: self.presentation.aria_label.clone(),
            aria_expanded: self.open,
            aria_activedescendant: self.highlight.map(|row| self.ids.item(row)),
            aria_invalid: self.presentation.invalid,
            aria_disabled: self.presentation.disabled,
            aria_describedby: if self.presentation.shows_helper_text() {
                self.ids.helper.clone()
            } else {
                None
            },
        }
    }

    /// Consume a pending request to focus the text input.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }

    // ===== Transitions =====

    /// Replace the query text.
    ///
    /// Recomputes the visible list and clears the highlight. Does not open or
    /// close the menu.
    pub fn set_query(&mut self, text: impl Into<String>) -> bool {
        if self.presentation.disabled {
            return false;
        }
        self.apply_input(QueryInput::new(text));
        true
    }

    /// Apply an edit to the query input.
    ///
    /// Text changes behave like [`set_query`](Self::set_query); cursor-only
    /// moves leave the list and highlight alone.
    pub fn edit_query(&mut self, edit: impl FnOnce(QueryInput) -> QueryInput) -> bool {
        if self.presentation.disabled {
            return false;
        }
        let edited = edit(self.input.clone());
        if edited.text() == self.input.text() {
            let moved = edited.cursor() != self.input.cursor();
            self.input = edited;
            return moved;
        }
        self.apply_input(edited);
        true
    }

    /// Open the menu.
    pub fn open(&mut self) -> bool {
        if self.presentation.disabled || self.open {
            return false;
        }
        self.open = true;
        debug!(id = %self.id, visible = self.visible.len(), "menu opened");
        true
    }

    /// Close the menu. The filter is kept for the next open.
    pub fn close(&mut self) -> bool {
        if !self.open {
            return false;
        }
        self.open = false;
        self.highlight = None;
        debug!(id = %self.id, "menu closed");
        true
    }

    /// Open when closed, close when open.
    pub fn toggle(&mut self) -> bool {
        if self.open {
            self.close()
        } else {
            self.open()
        }
    }

    /// Toggle after a click on the toggle control, notifying `on_toggle_click`.
    pub fn click_toggle(&mut self) -> bool {
        if self.presentation.disabled {
            return false;
        }
        if let Some(on_toggle_click) = self.on_toggle_click.as_mut() {
            on_toggle_click(self.open);
        }
        self.toggle()
    }

    /// Move the highlight by `delta` rows, clamped to the visible list.
    ///
    /// Only while open with at least one visible row. With no highlight, a
    /// downward move lands `delta - 1` rows from the top and an upward move
    /// lands on the first row.
    pub fn move_highlight(&mut self, delta: isize) -> bool {
        if self.presentation.disabled || !self.open || self.visible.is_empty() {
            return false;
        }
        let last = self.visible.len() - 1;
        let target = match self.highlight {
            None if delta > 0 => delta.unsigned_abs() - 1,
            None => 0,
            Some(row) if delta >= 0 => row.saturating_add(delta.unsigned_abs()),
            Some(row) => row.saturating_sub(delta.unsigned_abs()),
        }
        .min(last);
        let changed = self.highlight != Some(target);
        self.highlight = Some(target);
        changed
    }

    /// Highlight visible row `row` (mouse hover). Ignored when out of range or closed.
    pub fn set_highlight(&mut self, row: usize) -> bool {
        if self.presentation.disabled || !self.open || row >= self.visible.len() {
            return false;
        }
        let changed = self.highlight != Some(row);
        self.highlight = Some(row);
        changed
    }

    /// Commit the highlighted row.
    ///
    /// Sets the selection and the query to the item's label, closes the menu
    /// and notifies `on_change`. Without a highlight nothing happens.
    pub fn confirm_selection(&mut self) -> bool {
        if self.presentation.disabled {
            return false;
        }
        let Some(item) = self.highlighted_item().cloned() else {
            return false;
        };

        if self.controlled {
            debug!(id = %self.id, "selection requested (controlled)");
            (self.on_change)(Some(&item));
            self.close();
            return true;
        }

        let label = self.label_of(&item);
        debug!(id = %self.id, label = %label, "item selected");
        self.selected = Some(item);
        self.apply_input(QueryInput::new(label));
        self.close();
        (self.on_change)(self.selected.as_ref());
        true
    }

    /// Drop the selection and the query, and ask for input focus.
    pub fn clear_selection(&mut self) -> bool {
        if self.presentation.disabled {
            return false;
        }
        debug!(id = %self.id, controlled = self.controlled, "selection cleared");
        if !self.controlled {
            self.selected = None;
        }
        self.apply_input(QueryInput::default());
        self.focus_requested = true;
        (self.on_change)(None);
        true
    }

    /// Click on `item`: highlight its visible row, then confirm.
    ///
    /// No-op when the item is not in the visible list.
    pub fn select_by_click(&mut self, item: &T) -> bool {
        let row = self
            .visible
            .iter()
            .position(|&i| &self.items[i] == item);
        match row {
            Some(row) => self.select_visible_index(row),
            None => false,
        }
    }

    /// Click on visible row `row`.
    pub fn select_visible_index(&mut self, row: usize) -> bool {
        if self.presentation.disabled || row >= self.visible.len() {
            return false;
        }
        // A click is only possible on a rendered menu.
        self.open = true;
        self.highlight = Some(row);
        self.confirm_selection()
    }

    /// Replace the item set. Recomputes the visible list and clears the highlight.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.refilter();
        self.highlight = None;
    }

    /// Push a selection from the owner.
    ///
    /// Syncs the query to the item's label (or clears it). Does not notify.
    pub fn set_selected_item(&mut self, item: Option<T>) {
        let text = item
            .as_ref()
            .map(|item| self.label_of(item))
            .unwrap_or_default();
        self.selected = item;
        self.apply_input(QueryInput::new(text));
    }

    // ===== Internals =====

    fn apply_input(&mut self, input: QueryInput) {
        let text_changed = input.text() != self.input.text();
        self.input = input;
        self.highlight = None;
        if text_changed {
            self.refilter();
            debug!(
                id = %self.id,
                query = %self.input.text(),
                visible = self.visible.len(),
                "query changed"
            );
            if let Some(on_input_change) = self.on_input_change.as_mut() {
                on_input_change(self.input.text());
            }
        }
    }

    fn refilter(&mut self) {
        self.visible = filter_indices(
            &self.items,
            &*self.item_to_label,
            self.input.text(),
            &self.filter,
        );
    }
}

impl<T: fmt::Debug> fmt::Debug for ComboBox<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComboBox")
            .field("id", &self.id)
            .field("instance", &self.instance)
            .field("items", &self.items.len())
            .field("query", &self.input.text())
            .field("open", &self.open)
            .field("highlight", &self.highlight)
            .field("selected", &self.selected)
            .field("visible", &self.visible)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "combo_box_tests.rs"]
mod tests;
