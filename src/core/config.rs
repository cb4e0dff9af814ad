//! Configuration management with layered hierarchy

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use console::Term;
use serde::Deserialize;

use crate::core::context::{HelpSettings, DEFAULT_WIDTH};
use crate::core::error::{ConfigError, ConfigParseError};
use crate::style::Theme;

/// Upper bound on the help width unless configured otherwise
pub const DEFAULT_MAX_WIDTH: usize = 100;

/// When to emit ANSI styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "auto" => Some(ColorChoice::Auto),
            "always" => Some(ColorChoice::Always),
            "never" => Some(ColorChoice::Never),
            _ => None,
        }
    }

    pub fn enabled(&self) -> bool {
        match self {
            ColorChoice::Auto => console::colors_enabled(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

/// Help rendering configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fixed help width; the terminal width is used when unset
    pub width: Option<usize>,

    /// Upper bound on the help width
    pub max_width: Option<usize>,

    pub color: Option<ColorChoice>,

    /// Role name to style spec, e.g. `option: "bold magenta"`
    pub theme: BTreeMap<String, String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/rich-help/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                match Self::from_file(&global_path) {
                    Ok(global) => config.merge(global),
                    Err(err) => tracing::warn!(path = %global_path.display(), "ignoring config: {err}"),
                }
            }
        }

        // 3. Environment variables
        config.apply_env_from(|key| std::env::var(key).ok());

        config
    }

    /// Read a single YAML config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yml::from_str::<Config>(&contents).map_err(|err| {
            ConfigParseError::from_serde_error(&err, &contents, &path.display().to_string()).into()
        })
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "rich-help")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: Config) {
        if other.width.is_some() {
            self.width = other.width;
        }
        if other.max_width.is_some() {
            self.max_width = other.max_width;
        }
        if other.color.is_some() {
            self.color = other.color;
        }
        self.theme.extend(other.theme);
    }

    /// Apply `RICH_HELP_WIDTH`, `NO_COLOR` and `RICH_HELP_COLOR`, read
    /// through `lookup`
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(width) = lookup("RICH_HELP_WIDTH") {
            match width.trim().parse() {
                Ok(width) => self.width = Some(width),
                Err(_) => tracing::warn!(value = %width, "ignoring invalid RICH_HELP_WIDTH"),
            }
        }
        if lookup("NO_COLOR").is_some_and(|value| !value.is_empty()) {
            self.color = Some(ColorChoice::Never);
        }
        if let Some(color) = lookup("RICH_HELP_COLOR") {
            match ColorChoice::parse(&color) {
                Some(choice) => self.color = Some(choice),
                None => tracing::warn!(value = %color, "ignoring invalid RICH_HELP_COLOR"),
            }
        }
    }

    /// Effective settings, sized to the current terminal
    pub fn settings(&self) -> HelpSettings {
        let terminal = Term::stdout()
            .size_checked()
            .map(|(_, columns)| usize::from(columns));
        self.settings_for_terminal(terminal)
    }

    /// Effective settings for a terminal of `terminal` columns, if known
    pub fn settings_for_terminal(&self, terminal: Option<usize>) -> HelpSettings {
        let max_width = self.max_width.unwrap_or(DEFAULT_MAX_WIDTH);
        let width = self.width.or(terminal).unwrap_or(DEFAULT_WIDTH).min(max_width);
        HelpSettings {
            width,
            color: self.color.unwrap_or(ColorChoice::Auto).enabled(),
            theme: Theme::from_specs(&self.theme),
        }
    }
}
