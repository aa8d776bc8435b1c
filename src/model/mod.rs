//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod identifiers;
pub mod item;
pub mod key_action;

// Re-export for convenience
pub use error::{AppError, InputError};
pub use identifiers::{
    AccessibilityIds, ComboBoxId, InstanceId, InstanceIdGenerator, InvalidComboBoxId,
};
pub use item::{default_label_fn, ItemLabel, LabelFn};
pub use key_action::KeyAction;
