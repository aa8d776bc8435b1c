//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

use crate::state::{Direction, ListBoxSize};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "TUI_COMBOBOX_CONFIG";

/// Environment variable overriding the theme.
pub const THEME_ENV_VAR: &str = "TUI_COMBOBOX_THEME";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// `[keybindings]` names an action that does not exist.
    #[error("Unknown key action in [keybindings]: {0}")]
    UnknownAction(String),

    /// `[keybindings]` contains a key that cannot be parsed.
    #[error("Invalid key '{spec}': {reason}")]
    InvalidKeySpec {
        /// Key spec as written.
        spec: String,
        /// What was wrong with it.
        reason: String,
    },
}

/// Color theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light text on a dark terminal.
    #[default]
    Dark,
    /// Dark text on a light terminal.
    Light,
}

impl Theme {
    /// Parse `"dark"` or `"light"` (case-insensitive).
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    /// Whether this is the light theme.
    pub fn is_light(self) -> bool {
        self == Theme::Light
    }
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/tui-combobox/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Theme name (`"dark"` or `"light"`).
    #[serde(default)]
    pub theme: Option<Theme>,

    /// Side the menu opens towards (`"top"` or `"bottom"`).
    #[serde(default)]
    pub direction: Option<Direction>,

    /// Menu height class (`"sm"`, `"default"`, `"lg"`, `"xl"`).
    #[serde(default)]
    pub size: Option<ListBoxSize>,

    /// Placeholder shown in the empty input.
    #[serde(default)]
    pub placeholder: Option<String>,

    /// Title above the input.
    #[serde(default)]
    pub title: Option<String>,

    /// Helper text below the input.
    #[serde(default)]
    pub helper_text: Option<String>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Key binding overrides: action name to list of key specs.
    ///
    /// ```toml
    /// [keybindings]
    /// move_down = ["down", "ctrl+j"]
    /// ```
    #[serde(default)]
    pub keybindings: Option<HashMap<String, Vec<String>>>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Theme.
    pub theme: Theme,
    /// Menu direction.
    pub direction: Direction,
    /// Menu height class.
    pub size: ListBoxSize,
    /// Placeholder text.
    pub placeholder: String,
    /// Optional title.
    pub title: Option<String>,
    /// Optional helper text.
    pub helper_text: Option<String>,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Key binding overrides, resolved later by `KeyBindings::from_overrides`.
    pub keybindings: HashMap<String, Vec<String>>,
}

/// Default placeholder text.
pub const DEFAULT_PLACEHOLDER: &str = "Type to filter...";

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            direction: Direction::Bottom,
            size: ListBoxSize::Default,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            title: None,
            helper_text: None,
            log_file_path: default_log_path(),
            keybindings: HashMap::new(),
        }
    }
}

/// Overrides taken from command-line flags.
///
/// `None` means the flag was not given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--theme`
    pub theme: Option<Theme>,
    /// `--direction`
    pub direction: Option<Direction>,
    /// `--placeholder`
    pub placeholder: Option<String>,
    /// `--title`
    pub title: Option<String>,
    /// `--helper-text`
    pub helper_text: Option<String>,
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/tui-combobox/tui-combobox.log` on Unix-like
/// systems, or the platform state directory elsewhere. Falls back to the
/// current directory when no state directory exists.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("tui-combobox").join("tui-combobox.log")
    } else {
        PathBuf::from("tui-combobox.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/tui-combobox/config.toml` on Unix, appropriate path on
/// other platforms. Returns `None` if no config directory can be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tui-combobox").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `TUI_COMBOBOX_CONFIG` environment variable
/// 3. Default path `~/.config/tui-combobox/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        if env_path.is_empty() {
            return Err(ConfigError::InvalidPath(format!("{CONFIG_ENV_VAR} is empty")));
        }
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// `TUI_COMBOBOX_THEME` overrides the theme. Unknown theme names are
/// ignored with a warning.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(name) = std::env::var(THEME_ENV_VAR) {
        match Theme::parse(&name) {
            Some(theme) => config.theme = theme,
            None => tracing::warn!(value = %name, "ignoring unknown {THEME_ENV_VAR}"),
        }
    }

    config
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        theme: config.theme.unwrap_or(defaults.theme),
        direction: config.direction.unwrap_or(defaults.direction),
        size: config.size.unwrap_or(defaults.size),
        placeholder: config.placeholder.unwrap_or(defaults.placeholder),
        title: config.title.or(defaults.title),
        helper_text: config.helper_text.or(defaults.helper_text),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        keybindings: config.keybindings.unwrap_or(defaults.keybindings),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only flags that were given are applied.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, overrides: CliOverrides) -> ResolvedConfig {
    if let Some(theme) = overrides.theme {
        config.theme = theme;
    }
    if let Some(direction) = overrides.direction {
        config.direction = direction;
    }
    if let Some(placeholder) = overrides.placeholder {
        config.placeholder = placeholder;
    }
    if overrides.title.is_some() {
        config.title = overrides.title;
    }
    if overrides.helper_text.is_some() {
        config.helper_text = overrides.helper_text;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
