//! Registration, configuration and dispatch errors

use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Errors raised while building the command tree or loading configuration
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("command '{name}' has no callback")]
    #[diagnostic(
        code(rich_help::config::missing_callback),
        help("attach a callback with CommandInfo::callback before registering the command")
    )]
    MissingCallback { name: String },

    #[error("group '{group}' already has a command named '{name}'")]
    #[diagnostic(
        code(rich_help::config::duplicate_command),
        help("command names must be unique within a group")
    )]
    DuplicateCommand { group: String, name: String },

    #[error("sub-application registered without a name")]
    #[diagnostic(
        code(rich_help::config::unnamed_group),
        help("name the group at the add_group call or on the sub-application itself")
    )]
    UnnamedGroup,

    #[error("failed to read config file {path:?}")]
    #[diagnostic(code(rich_help::config::read))]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    ConfigParse(#[from] ConfigParseError),
}

/// Malformed configuration file, with the offending location
#[derive(Debug, Error, Diagnostic)]
#[error("invalid configuration: {message}")]
#[diagnostic(code(rich_help::config::parse))]
pub struct ConfigParseError {
    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    span: SourceSpan,

    message: String,
}

impl ConfigParseError {
    pub fn from_serde_error(err: &serde_yml::Error, source: &str, filename: &str) -> Self {
        let (line, column) = err
            .location()
            .map(|loc| (loc.line(), loc.column()))
            .unwrap_or((1, 1));
        let offset = line_col_to_offset(source, line, column);

        Self {
            src: NamedSource::new(filename, source.to_string()),
            span: SourceSpan::from(offset..offset.saturating_add(1)),
            message: err.to_string(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Convert a 1-based line/column to a byte offset, clamped to the source
fn line_col_to_offset(source: &str, line: usize, column: usize) -> usize {
    let line_start: usize = source
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(source.len())
}

/// Errors surfaced by [`RichApp::run_from`](crate::core::RichApp::run_from)
#[derive(Debug, Error, Diagnostic)]
pub enum RunError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    /// Argument parsing failed; report it with [`clap::Error::exit`]
    #[error(transparent)]
    Parse(#[from] clap::Error),

    #[error("failed to write help output")]
    Io(#[from] std::io::Error),

    /// A command or group callback returned an error
    #[error("{0}")]
    Callback(miette::Report),
}
