//! Identifier newtypes and instance-id generation.
//!
//! `ComboBoxId` validates non-empty strings at construction time.
//! Instance numbers come from an explicitly passed [`InstanceIdGenerator`],
//! never from a hidden global.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Caller-supplied identifier of a combo box (the input's id).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComboBoxId(String);

impl ComboBoxId {
    /// Smart constructor: validates non-empty id
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidComboBoxId> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(InvalidComboBoxId::Empty);
        }
        Ok(Self(raw))
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComboBoxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-instance number handed out by an [`InstanceIdGenerator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(usize);

impl InstanceId {
    /// Raw instance number.
    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic instance-number source.
///
/// Owned by whoever builds combo boxes and passed to each constructor.
/// Numbers start at 1 and are unique per generator.
#[derive(Debug, Default)]
pub struct InstanceIdGenerator {
    next: AtomicUsize,
}

impl InstanceIdGenerator {
    /// Create a generator whose first id is 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the next instance id.
    pub fn next_id(&self) -> InstanceId {
        InstanceId(self.next.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

/// Element ids used for accessibility wiring.
///
/// Derived once per combo box from its [`ComboBoxId`] and [`InstanceId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessibilityIds {
    /// Id of the text input.
    pub input: String,
    /// Id of the title label bound to the input.
    pub label: String,
    /// Id of the dropdown menu.
    pub menu: String,
    /// Id of the helper text, present only when helper text is configured.
    pub helper: Option<String>,
}

impl AccessibilityIds {
    /// Build ids for one combo box instance.
    pub fn new(id: &ComboBoxId, instance: InstanceId, has_helper_text: bool) -> Self {
        Self {
            input: id.to_string(),
            label: format!("{id}-label"),
            menu: format!("{id}-menu"),
            helper: has_helper_text.then(|| format!("combobox-helper-text-{instance}")),
        }
    }

    /// Id of the menu row at `index` of the visible list.
    pub fn item(&self, index: usize) -> String {
        format!("{}-item-{index}", self.input)
    }
}

// ===== Error Types =====

/// Rejected [`ComboBoxId`] input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidComboBoxId {
    /// The id was an empty string.
    #[error("Combo box id cannot be empty")]
    Empty,
}

// ===== Tests =====
