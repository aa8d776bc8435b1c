//! Construction-time configuration of a combo box.
//!
//! Required settings (`id`, `items`, `placeholder`, `on_change`) are
//! constructor arguments; everything else is a builder method with a default.

use std::fmt;

use serde::Deserialize;

use crate::model::item::{default_label_fn, ItemLabel, LabelFn};
use crate::model::ComboBoxId;
use crate::state::filter::FilterPolicy;

/// Selection-changed callback. Receives the new selection, or `None` when cleared.
pub type ChangeFn<T> = Box<dyn FnMut(Option<&T>)>;

/// Query-changed callback.
pub type InputChangeFn = Box<dyn FnMut(&str)>;

/// Toggle-clicked callback. Receives the open state before the click.
pub type ToggleClickFn = Box<dyn FnMut(bool)>;

/// Localization hook for built-in strings.
pub type TranslateFn = Box<dyn Fn(MessageId) -> String>;

/// Side the dropdown opens towards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Menu is drawn above the input.
    Top,
    /// Menu is drawn below the input.
    #[default]
    Bottom,
}

/// Height class of the list box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListBoxSize {
    /// Compact.
    Sm,
    /// Regular.
    #[default]
    Default,
    /// Large.
    Lg,
    /// Extra large.
    Xl,
}

impl ListBoxSize {
    /// Number of menu rows shown before the list scrolls.
    ///
    /// Also used as the page length for Page Up / Page Down.
    pub fn max_visible_rows(self) -> usize {
        match self {
            ListBoxSize::Sm => 4,
            ListBoxSize::Default => 6,
            ListBoxSize::Lg => 8,
            ListBoxSize::Xl => 10,
        }
    }
}

/// Visual variant of the list box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListBoxType {
    /// Bordered field with the title above it.
    #[default]
    Default,
    /// Borderless field with the title on the same line.
    Inline,
}

/// Built-in strings that go through `translate_with_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageId {
    /// Label of the clear-selection affordance.
    ClearSelection,
    /// Label of the menu toggle while closed.
    OpenMenu,
    /// Label of the menu toggle while open.
    CloseMenu,
}

impl MessageId {
    /// Stable message identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            MessageId::ClearSelection => "clear.selection",
            MessageId::OpenMenu => "open.menu",
            MessageId::CloseMenu => "close.menu",
        }
    }

    /// Untranslated English text.
    pub fn default_text(self) -> &'static str {
        match self {
            MessageId::ClearSelection => "Clear selected item",
            MessageId::OpenMenu => "Open menu",
            MessageId::CloseMenu => "Close menu",
        }
    }
}

/// Presentation settings. Only `disabled` affects behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    /// Disables every interaction.
    pub disabled: bool,
    /// Marks the current value as invalid.
    pub invalid: bool,
    /// Message shown while `invalid` is set.
    pub invalid_text: Option<String>,
    /// Label shown with the input.
    pub title_text: Option<String>,
    /// Helper text shown under the field unless `invalid` is set.
    pub helper_text: Option<String>,
    /// Shown in the input while the query is empty.
    pub placeholder: String,
    /// Accessible name of the list box.
    pub aria_label: String,
    /// Side the menu opens towards.
    pub direction: Direction,
    /// Height class.
    pub size: ListBoxSize,
    /// Visual variant.
    pub list_box_type: ListBoxType,
    /// Light theme.
    pub light: bool,
}

impl Presentation {
    fn new(placeholder: String) -> Self {
        Self {
            disabled: false,
            invalid: false,
            invalid_text: None,
            title_text: None,
            helper_text: None,
            placeholder,
            aria_label: "Choose an item".to_string(),
            direction: Direction::default(),
            size: ListBoxSize::default(),
            list_box_type: ListBoxType::default(),
            light: false,
        }
    }

    /// Whether the helper text is currently shown.
    pub fn shows_helper_text(&self) -> bool {
        self.helper_text.is_some() && !self.invalid
    }
}

/// Everything a [`ComboBox`](crate::state::ComboBox) is built from.
pub struct ComboBoxProps<T> {
    pub(crate) id: ComboBoxId,
    pub(crate) items: Vec<T>,
    pub(crate) item_to_label: LabelFn<T>,
    pub(crate) filter: FilterPolicy<T>,
    pub(crate) initial_selected_item: Option<T>,
    pub(crate) selected_item: Option<T>,
    pub(crate) controlled: bool,
    pub(crate) on_change: ChangeFn<T>,
    pub(crate) on_input_change: Option<InputChangeFn>,
    pub(crate) on_toggle_click: Option<ToggleClickFn>,
    pub(crate) translate_with_id: Option<TranslateFn>,
    pub(crate) presentation: Presentation,
}

impl<T: ItemLabel + 'static> ComboBoxProps<T> {
    /// Props for items that label themselves through [`ItemLabel`].
    pub fn new(
        id: ComboBoxId,
        items: Vec<T>,
        placeholder: impl Into<String>,
        on_change: impl FnMut(Option<&T>) + 'static,
    ) -> Self {
        Self::with_label_fn(id, items, placeholder, on_change, default_label_fn::<T>())
    }
}

impl<T> ComboBoxProps<T> {
    /// Props for arbitrary items with an explicit label function.
    pub fn with_label_fn(
        id: ComboBoxId,
        items: Vec<T>,
        placeholder: impl Into<String>,
        on_change: impl FnMut(Option<&T>) + 'static,
        item_to_label: impl Fn(&T) -> String + 'static,
    ) -> Self {
        Self {
            id,
            items,
            item_to_label: Box::new(item_to_label),
            filter: FilterPolicy::default(),
            initial_selected_item: None,
            selected_item: None,
            controlled: false,
            on_change: Box::new(on_change),
            on_input_change: None,
            on_toggle_click: None,
            translate_with_id: None,
            presentation: Presentation::new(placeholder.into()),
        }
    }

    /// Replace the label function.
    pub fn item_to_label(mut self, f: impl Fn(&T) -> String + 'static) -> Self {
        self.item_to_label = Box::new(f);
        self
    }

    /// Replace the default prefix filter with a custom predicate.
    ///
    /// The predicate receives the item, the label function and the query.
    pub fn should_filter_item(
        mut self,
        f: impl Fn(&T, &dyn Fn(&T) -> String, &str) -> bool + 'static,
    ) -> Self {
        self.filter = FilterPolicy::custom(f);
        self
    }

    /// Seed the selection (uncontrolled).
    pub fn initial_selected_item(mut self, item: T) -> Self {
        self.initial_selected_item = Some(item);
        self
    }

    /// Control the selection externally.
    ///
    /// Confirm and clear then only notify `on_change`; the owner pushes the
    /// new value back with `ComboBox::set_selected_item`.
    pub fn selected_item(mut self, item: Option<T>) -> Self {
        self.selected_item = item;
        self.controlled = true;
        self
    }

    /// Called with the new query on every text change.
    pub fn on_input_change(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_input_change = Some(Box::new(f));
        self
    }

    /// Called when the menu toggle is clicked.
    pub fn on_toggle_click(mut self, f: impl FnMut(bool) + 'static) -> Self {
        self.on_toggle_click = Some(Box::new(f));
        self
    }

    /// Localization hook for built-in strings.
    pub fn translate_with_id(mut self, f: impl Fn(MessageId) -> String + 'static) -> Self {
        self.translate_with_id = Some(Box::new(f));
        self
    }

    /// Disable all interaction.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.presentation.disabled = disabled;
        self
    }

    /// Mark the value invalid.
    pub fn invalid(mut self, invalid: bool) -> Self {
        self.presentation.invalid = invalid;
        self
    }

    /// Message shown while invalid.
    pub fn invalid_text(mut self, text: impl Into<String>) -> Self {
        self.presentation.invalid_text = Some(text.into());
        self
    }

    /// Title label.
    pub fn title_text(mut self, text: impl Into<String>) -> Self {
        self.presentation.title_text = Some(text.into());
        self
    }

    /// Helper text.
    pub fn helper_text(mut self, text: impl Into<String>) -> Self {
        self.presentation.helper_text = Some(text.into());
        self
    }

    /// Accessible name of the list box.
    pub fn aria_label(mut self, text: impl Into<String>) -> Self {
        self.presentation.aria_label = text.into();
        self
    }

    /// Side the menu opens towards.
    pub fn direction(mut self, direction: Direction) -> Self {
        self.presentation.direction = direction;
        self
    }

    /// Height class.
    pub fn size(mut self, size: ListBoxSize) -> Self {
        self.presentation.size = size;
        self
    }

    /// Visual variant.
    pub fn list_box_type(mut self, list_box_type: ListBoxType) -> Self {
        self.presentation.list_box_type = list_box_type;
        self
    }

    /// Light theme.
    pub fn light(mut self, light: bool) -> Self {
        self.presentation.light = light;
        self
    }
}

impl<T: fmt::Debug> fmt::Debug for ComboBoxProps<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComboBoxProps")
            .field("id", &self.id)
            .field("items", &self.items)
            .field("filter", &self.filter)
            .field("initial_selected_item", &self.initial_selected_item)
            .field("selected_item", &self.selected_item)
            .field("controlled", &self.controlled)
            .field("presentation", &self.presentation)
            .finish_non_exhaustive()
    }
}
