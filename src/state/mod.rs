//! Combo box state machine (pure).
//!
//! All state transitions are synchronous and testable without a terminal.

pub mod combo_box;
pub mod filter;
pub mod input_handler;
pub mod keyboard;
pub mod props;

// Re-export for convenience
pub use combo_box::{AccessibilityState, ComboBox};
pub use filter::{filter_indices, prefix_match, FilterPolicy};
pub use input_handler::QueryInput;
pub use keyboard::{handle_action, handle_key, KeyOutcome};
pub use props::{
    ComboBoxProps, Direction, ListBoxSize, ListBoxType, MessageId, Presentation,
};
