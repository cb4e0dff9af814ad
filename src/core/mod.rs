//! Core module - registration, resolution, the clap adapter and dispatch

pub mod app;
pub mod command;
pub mod config;
pub mod context;
pub mod error;
pub mod group;
pub mod metadata;
pub mod params;

pub use app::RichApp;
pub use command::{Node, RichCommand};
pub use config::{ColorChoice, Config};
pub use context::{Context, HelpSettings};
pub use error::{ConfigError, ConfigParseError, RunError};
pub use group::{command_rows, format_commands, CommandListing, RichGroup};
pub use metadata::{resolve, resolve_opt, Callback, CommandInfo, DisplayInfo, GroupInfo, ResolvedDisplay};
pub use params::{help_arg, ClapParam, ParamRole, Parameter};
