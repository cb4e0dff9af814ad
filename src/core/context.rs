//! Rendering context passed down the command tree

use std::io::Write;
use std::sync::Arc;

use crate::render::HelpFormatter;
use crate::style::Theme;

/// Fallback width when neither configuration nor the terminal supply one
pub const DEFAULT_WIDTH: usize = 80;

/// Effective settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpSettings {
    pub width: usize,
    pub color: bool,
    pub theme: Theme,
}

impl Default for HelpSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            color: false,
            theme: Theme::default(),
        }
    }
}

/// Command path plus shared settings
#[derive(Debug, Clone)]
pub struct Context {
    path: Vec<String>,
    settings: Arc<HelpSettings>,
}

impl Context {
    pub fn new(prog: impl Into<String>, settings: HelpSettings) -> Self {
        Self {
            path: vec![prog.into()],
            settings: Arc::new(settings),
        }
    }

    /// Context for the subcommand `name`
    pub fn child(&self, name: &str) -> Self {
        let mut path = self.path.clone();
        path.push(name.to_string());
        Self {
            path,
            settings: Arc::clone(&self.settings),
        }
    }

    /// Full invocation path, e.g. `demo color blend`
    pub fn command_path(&self) -> String {
        self.path.join(" ")
    }

    pub fn info_name(&self) -> &str {
        self.path.last().map(String::as_str).unwrap_or_default()
    }

    pub fn width(&self) -> usize {
        self.settings.width
    }

    pub fn color(&self) -> bool {
        self.settings.color
    }

    pub fn theme(&self) -> &Theme {
        &self.settings.theme
    }

    /// Formatter used for every help page rendered under this context
    pub fn make_formatter<W: Write>(&self, out: W) -> HelpFormatter<W> {
        HelpFormatter::new(out, self.width(), self.color(), self.theme().clone())
    }
}
