//! tui-combobox - Entry Point

use clap::Parser;
use serde_json::Value;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tui_combobox::config::{
    apply_cli_overrides, apply_env_overrides, load_config_with_precedence, merge_config,
    CliOverrides, KeyBindings, ResolvedConfig, Theme,
};
use tui_combobox::model::{
    AppError, ComboBoxId, InstanceIdGenerator, InvalidComboBoxId, ItemLabel,
};
use tui_combobox::source::{load_items, ItemFormat};
use tui_combobox::state::{ComboBoxProps, Direction};
use tui_combobox::view::{run_picker, AppSettings, ColorConfig, ComboBoxStyles};

/// Id of the picker's combo box; prefixes the accessibility ids.
const PICKER_ID: &str = "picker";

/// tui-combobox - pick one item from a filterable list in the terminal
#[derive(Parser, Debug)]
#[command(name = "tui-combobox")]
#[command(version)]
#[command(about = "Filterable single-select picker; prints the chosen item's label")]
pub struct Args {
    /// File with one item per line (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Treat the input as a JSON array of items
    #[arg(long)]
    pub json: bool,

    /// Title shown above the input
    #[arg(short, long)]
    pub title: Option<String>,

    /// Placeholder shown while the input is empty
    #[arg(short, long)]
    pub placeholder: Option<String>,

    /// Helper text shown below the input
    #[arg(long)]
    pub helper_text: Option<String>,

    /// Label of the initially selected item
    #[arg(short, long)]
    pub initial: Option<String>,

    /// Side the menu opens towards
    #[arg(long, value_parser = ["top", "bottom"])]
    pub direction: Option<String>,

    /// Color theme
    #[arg(long, value_parser = ["dark", "light"])]
    pub theme: Option<String>,

    /// Quit as soon as an item is selected
    #[arg(short, long)]
    pub exit_on_select: bool,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    fn cli_overrides(&self) -> CliOverrides {
        CliOverrides {
            theme: self.theme.as_deref().and_then(Theme::parse),
            direction: self.direction.as_deref().map(|d| match d {
                "top" => Direction::Top,
                _ => Direction::Bottom,
            }),
            placeholder: self.placeholder.clone(),
            title: self.title.clone(),
            helper_text: self.helper_text.clone(),
        }
    }
}

/// Build the picker's props from the loaded items and resolved config.
///
/// `initial` is matched against item labels; an unknown label is ignored.
fn build_props(
    items: Vec<Value>,
    config: &ResolvedConfig,
    initial: Option<&str>,
) -> Result<ComboBoxProps<Value>, InvalidComboBoxId> {
    let initial_item = initial.and_then(|wanted| {
        let found = items.iter().find(|item| item.label() == wanted).cloned();
        if found.is_none() {
            warn!(label = wanted, "initial selection not found among items");
        }
        found
    });

    let mut props = ComboBoxProps::new(
        ComboBoxId::new(PICKER_ID)?,
        items,
        config.placeholder.clone(),
        |item: Option<&Value>| debug!(selected = ?item, "selection changed"),
    )
    .direction(config.direction)
    .size(config.size)
    .light(config.theme.is_light());

    if let Some(title) = &config.title {
        props = props.title_text(title.clone());
    }
    if let Some(helper_text) = &config.helper_text {
        props = props.helper_text(helper_text.clone());
    }
    if let Some(item) = initial_item {
        props = props.initial_selected_item(item);
    }
    Ok(props)
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = load_config_with_precedence(args.config.clone())?;
        let merged = merge_config(config_file);
        let with_env = apply_env_overrides(merged);
        apply_cli_overrides(with_env, args.cli_overrides())
    };

    tui_combobox::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let format = if args.json {
        ItemFormat::Json
    } else {
        ItemFormat::Lines
    };
    let items = load_items(args.file.clone(), format)?;

    let settings = AppSettings {
        key_bindings: KeyBindings::from_overrides(&config.keybindings)?,
        styles: ComboBoxStyles::select(
            config.theme.is_light(),
            ColorConfig::from_env_and_args(args.no_color),
        ),
        exit_on_select: args.exit_on_select,
    };
    let props = build_props(items, &config, args.initial.as_deref())?;

    let selected = run_picker(props, &InstanceIdGenerator::new(), settings)?;

    match selected {
        Some(item) => {
            info!(label = %item.label(), "picker finished with a selection");
            println!("{}", item.label());
            Ok(())
        }
        None => {
            info!("picker finished without a selection");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tui_combobox::state::ComboBox;

    #[test]
    fn test_help_does_not_error() {
        let result = Args::try_parse_from(["tui-combobox", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["tui-combobox", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_args_defaults() {
        let args = Args::parse_from(["tui-combobox"]);
        assert_eq!(args.file, None);
        assert!(!args.json);
        assert_eq!(args.title, None);
        assert_eq!(args.placeholder, None);
        assert_eq!(args.helper_text, None);
        assert_eq!(args.initial, None);
        assert_eq!(args.direction, None);
        assert_eq!(args.theme, None);
        assert!(!args.exit_on_select);
        assert!(!args.no_color);
        assert_eq!(args.config, None);
    }

    #[test]
    fn test_file_path_populates_file_field() {
        let args = Args::parse_from(["tui-combobox", "fruits.txt"]);
        assert_eq!(args.file, Some(PathBuf::from("fruits.txt")));
    }

    #[test]
    fn test_short_flags() {
        let args = Args::parse_from([
            "tui-combobox",
            "-t",
            "Fruit",
            "-p",
            "Pick one",
            "-i",
            "Apple",
            "-e",
        ]);
        assert_eq!(args.title, Some("Fruit".to_string()));
        assert_eq!(args.placeholder, Some("Pick one".to_string()));
        assert_eq!(args.initial, Some("Apple".to_string()));
        assert!(args.exit_on_select);
    }

    #[test]
    fn test_direction_accepts_top_and_bottom() {
        let args = Args::parse_from(["tui-combobox", "--direction", "top"]);
        assert_eq!(args.cli_overrides().direction, Some(Direction::Top));

        let args = Args::parse_from(["tui-combobox", "--direction", "bottom"]);
        assert_eq!(args.cli_overrides().direction, Some(Direction::Bottom));
    }

    #[test]
    fn test_direction_invalid_rejects() {
        let result = Args::try_parse_from(["tui-combobox", "--direction", "left"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn test_theme_invalid_rejects() {
        let result = Args::try_parse_from(["tui-combobox", "--theme", "solarized"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn test_theme_maps_to_override() {
        let args = Args::parse_from(["tui-combobox", "--theme", "light"]);
        assert_eq!(args.cli_overrides().theme, Some(Theme::Light));
    }

    #[test]
    fn test_config_path() {
        let args = Args::parse_from(["tui-combobox", "--config", "/custom/config.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_cli_title_overrides_config_file() {
        use tui_combobox::config::ConfigFile;

        let config_file = ConfigFile {
            title: Some("From file".to_string()),
            placeholder: Some("File placeholder".to_string()),
            ..ConfigFile::default()
        };
        let args = Args::parse_from(["tui-combobox", "--title", "From CLI"]);

        let config = apply_cli_overrides(merge_config(Some(config_file)), args.cli_overrides());

        assert_eq!(config.title, Some("From CLI".to_string()));
        assert_eq!(config.placeholder, "File placeholder");
    }

    #[test]
    fn test_build_props_matches_initial_by_label() {
        let items = vec![json!("Apple"), json!({"label": "Banana", "id": 2})];
        let props = build_props(items, &ResolvedConfig::default(), Some("Banana")).unwrap();

        let combo = ComboBox::new(props, &InstanceIdGenerator::new());

        assert_eq!(combo.selected_item(), Some(&json!({"label": "Banana", "id": 2})));
        assert_eq!(combo.query(), "Banana");
    }

    #[test]
    fn test_build_props_ignores_unknown_initial() {
        let items = vec![json!("Apple")];
        let props = build_props(items, &ResolvedConfig::default(), Some("Durian")).unwrap();

        let combo = ComboBox::new(props, &InstanceIdGenerator::new());

        assert_eq!(combo.selected_item(), None);
        assert_eq!(combo.query(), "");
    }

    #[test]
    fn test_build_props_applies_presentation() {
        let config = ResolvedConfig {
            title: Some("Fruit".to_string()),
            helper_text: Some("Start typing".to_string()),
            direction: Direction::Top,
            ..ResolvedConfig::default()
        };

        let props = build_props(vec![json!("Apple")], &config, None).unwrap();
        let combo = ComboBox::new(props, &InstanceIdGenerator::new());

        let presentation = combo.presentation();
        assert_eq!(presentation.title_text.as_deref(), Some("Fruit"));
        assert_eq!(presentation.helper_text.as_deref(), Some("Start typing"));
        assert_eq!(presentation.direction, Direction::Top);
        assert_eq!(presentation.placeholder, "Type to filter...");
    }
}
