//! Item sources.
//!
//! Reads the picker's item list once, from a file or piped stdin, either as
//! plain lines or as a JSON array. Items are `serde_json::Value`s so both
//! formats share the `ItemLabel` labelling: a line becomes a JSON string.

use crate::model::error::InputError;
use serde_json::Value;
use std::io::{BufRead, BufReader, IsTerminal, Read};
use std::path::PathBuf;
use tracing::info;

/// Encoding of the item list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ItemFormat {
    /// One item per line. Blank lines are skipped.
    #[default]
    Lines,
    /// A single JSON array; each element is an item.
    Json,
}

/// Read items from `reader`.
///
/// # Errors
///
/// Returns `InputError::Io` on read failure and `InputError::InvalidJson`
/// when JSON input is malformed or not an array.
pub fn read_items<R: Read>(reader: R, format: ItemFormat) -> Result<Vec<Value>, InputError> {
    match format {
        ItemFormat::Lines => {
            let mut items = Vec::new();
            for line in BufReader::new(reader).lines() {
                let line = line?;
                let line = line.trim_end_matches('\r');
                if !line.trim().is_empty() {
                    items.push(Value::String(line.to_string()));
                }
            }
            Ok(items)
        }
        ItemFormat::Json => {
            let value: Value =
                serde_json::from_reader(reader).map_err(|e| InputError::InvalidJson {
                    message: e.to_string(),
                })?;
            match value {
                Value::Array(items) => Ok(items),
                other => Err(InputError::InvalidJson {
                    message: format!("expected an array of items, found {}", json_kind(&other)),
                }),
            }
        }
    }
}

/// Load items from `file`, or from stdin when no file is given.
///
/// # Errors
///
/// Returns `InputError::FileNotFound` for a missing file and
/// `InputError::NoInput` when stdin is an interactive terminal.
pub fn load_items(file: Option<PathBuf>, format: ItemFormat) -> Result<Vec<Value>, InputError> {
    let items = match file {
        Some(path) => {
            if !path.exists() {
                return Err(InputError::FileNotFound { path });
            }
            let items = read_items(std::fs::File::open(&path)?, format)?;
            info!(path = %path.display(), count = items.len(), ?format, "items loaded from file");
            items
        }
        None => {
            let stdin = std::io::stdin();
            if stdin.is_terminal() {
                return Err(InputError::NoInput);
            }
            let items = read_items(stdin.lock(), format)?;
            info!(count = items.len(), ?format, "items loaded from stdin");
            items
        }
    };
    Ok(items)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
