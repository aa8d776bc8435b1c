//! tui-combobox
//!
//! A filterable single-select combo box for ratatui, plus a small picker
//! binary built on it.
//!
//! The crate follows a pure core / impure shell split:
//!
//! - [`state`] holds the combo box state machine. Every transition is a plain
//!   method on [`state::ComboBox`]; nothing there touches the terminal.
//! - [`view`] projects that state onto a ratatui buffer and hosts it in a
//!   crossterm event loop.
//! - [`config`], [`logging`] and [`source`] are the shell around the picker
//!   binary: TOML configuration, tracing setup and item loading.
//!
//! ```
//! use tui_combobox::model::{ComboBoxId, InstanceIdGenerator};
//! use tui_combobox::state::{ComboBox, ComboBoxProps};
//!
//! let props = ComboBoxProps::new(
//!     ComboBoxId::new("fruit").unwrap(),
//!     vec!["Apple".to_string(), "Banana".to_string(), "Cherry".to_string()],
//!     "Pick a fruit",
//!     |_: Option<&String>| {},
//! );
//! let mut combo = ComboBox::new(props, &InstanceIdGenerator::new());
//!
//! combo.set_query("b");
//! combo.open();
//! combo.move_highlight(1);
//! combo.confirm_selection();
//!
//! assert_eq!(combo.selected_item().map(String::as_str), Some("Banana"));
//! assert!(!combo.is_open());
//! ```

pub mod config;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod view;
