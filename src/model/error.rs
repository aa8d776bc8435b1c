//! Error types for the tui-combobox application.
//!
//! This module defines a hierarchical error taxonomy using `thiserror` for structured error
//! handling. Errors compose via `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level application error wrapping all domain-specific failures
//!   - [`InputError`] - Item list reading failures (file not found, IO, bad JSON shape)
//!   - [`ConfigError`] - Config file read/parse failures
//!   - [`LoggingError`] - Tracing subscriber setup failures
//!   - [`InvalidComboBoxId`] - Rejected combo box id
//!   - `std::io::Error` - Terminal/TUI rendering failures
//!   - [`TuiError`] - Terminal setup and event loop failures
//!
//! The combo box state machine itself never fails: empty filter results and
//! "nothing selected" are ordinary states. Only the shell around it (reading
//! items, config, terminal) has error paths.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::model::identifiers::InvalidComboBoxId;
use crate::view::TuiError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all failure modes.
///
/// All domain-specific error types convert to `AppError` via `From`,
/// enabling clean error propagation with the `?` operator.
///
/// # Examples
///
/// ```no_run
/// use tui_combobox::model::error::{AppError, InputError};
///
/// fn run_app() -> Result<(), AppError> {
///     // InputError automatically converts to AppError via From
///     let _items = read_items()?;
///     Ok(())
/// }
/// # fn read_items() -> Result<(), InputError> { Ok(()) }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read the item list from file or stdin.
    #[error("Failed to read items: {0}")]
    Input(#[from] InputError),

    /// Configuration file exists but could not be used.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tracing could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// The combo box id was rejected.
    #[error("Invalid combo box id: {0}")]
    InvalidId(#[from] InvalidComboBoxId),

    /// Terminal or TUI rendering error.
    ///
    /// Failures in the crossterm/ratatui layer. Without a working terminal the
    /// picker cannot function, so this is always fatal.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// The picker could not set up the terminal or its event loop failed.
    #[error(transparent)]
    Tui(#[from] TuiError),
}

/// Errors encountered when reading the item list.
#[derive(Debug, Error)]
pub enum InputError {
    /// The specified item file does not exist at the given path.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use tui_combobox::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.txt")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.txt"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The filesystem path that was not found.
        path: PathBuf,
    },

    /// No item source was provided and stdin is an interactive terminal.
    #[error("No input source: provide a file path or pipe items to stdin")]
    NoInput,

    /// `--json` input was not a JSON array.
    #[error("Invalid JSON item list: {message}")]
    InvalidJson {
        /// Parser message, or a description of the wrong shape.
        message: String,
    },

    /// Generic I/O error reading from the input source.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
