//! Item labelling.
//!
//! Items are opaque to the combo box. The only thing it needs from an item is
//! its label: the text shown in the menu, matched by the filter and written
//! into the input when the item is selected.

use serde_json::Value;

/// Boxed label extractor, `itemToLabel` in widget terms.
pub type LabelFn<T> = Box<dyn Fn(&T) -> String>;

/// Default label extraction for common item types.
///
/// Strings are their own label. JSON values use the string itself, or the
/// `"label"` field of an object.
pub trait ItemLabel {
    /// Text used to display and filter this item.
    fn label(&self) -> String;
}

impl ItemLabel for String {
    fn label(&self) -> String {
        self.clone()
    }
}

impl ItemLabel for &str {
    fn label(&self) -> String {
        (*self).to_string()
    }
}

impl ItemLabel for Value {
    fn label(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Object(map) => match map.get("label") {
                Some(Value::String(s)) => s.clone(),
                Some(other @ (Value::Number(_) | Value::Bool(_))) => other.to_string(),
                _ => String::new(),
            },
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null | Value::Array(_) => String::new(),
        }
    }
}

/// Label function backed by [`ItemLabel`].
pub fn default_label_fn<T: ItemLabel>() -> LabelFn<T> {
    Box::new(|item: &T| item.label())
}
