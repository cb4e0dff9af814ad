//! Command groups and the Commands section

use std::io::{self, Write};

use clap::{Arg, ArgMatches};

use crate::core::command::Node;
use crate::core::context::Context;
use crate::core::error::ConfigError;
use crate::core::metadata::{resolve, resolve_opt, Callback, DisplayInfo, GroupInfo, ResolvedDisplay};
use crate::render::HelpFormatter;
use crate::style::StyledText;

/// Columns reserved around the command-name column of the Commands table
const COMMAND_LIST_CHROME: usize = 6;

/// Ordered subcommand listing with lookup by name
pub trait CommandListing {
    /// Subcommand names in listing order
    fn list_commands(&self, ctx: &Context) -> Vec<String>;

    /// Look up a listed subcommand; `None` for names with no definition
    fn get_command(&self, ctx: &Context, name: &str) -> Option<&Node>;
}

/// A group of subcommands with resolved display attributes
#[derive(Clone)]
pub struct RichGroup {
    name: String,
    callback: Option<Callback>,
    params: Vec<Arg>,
    display: ResolvedDisplay,
    invoke_without_command: bool,
    subcommand_metavar: Option<String>,
    commands: Vec<Node>,
}

impl RichGroup {
    /// Resolve a group across the local, inherited and instance tiers
    pub fn from_tiers(
        name: String,
        local: &GroupInfo,
        inherited: &GroupInfo,
        instance: &GroupInfo,
    ) -> Self {
        let invoke_without_command = resolve(
            local.invoke_without_command,
            inherited.invoke_without_command,
            instance.invoke_without_command,
            false,
        );
        let params = [&local.params, &inherited.params, &instance.params]
            .into_iter()
            .find(|params| !params.is_empty())
            .cloned()
            .unwrap_or_default();
        tracing::debug!(group = %name, invoke_without_command, "resolved group");

        Self {
            callback: resolve_opt(
                local.callback.clone(),
                inherited.callback.clone(),
                instance.callback.clone(),
            ),
            params,
            display: DisplayInfo::resolve(&local.display, &inherited.display, &instance.display),
            invoke_without_command,
            subcommand_metavar: resolve_opt(
                local.subcommand_metavar.clone(),
                inherited.subcommand_metavar.clone(),
                instance.subcommand_metavar.clone(),
            ),
            commands: Vec::new(),
            name,
        }
    }

    /// Append a subcommand; names must be unique within the group
    pub fn add_command(&mut self, node: Node) -> Result<(), ConfigError> {
        if self.get(node.name()).is_some() {
            return Err(ConfigError::DuplicateCommand {
                group: self.name.clone(),
                name: node.name().to_string(),
            });
        }
        self.commands.push(node);
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display(&self) -> &ResolvedDisplay {
        &self.display
    }

    pub fn params(&self) -> &[Arg] {
        &self.params
    }

    pub fn invoke_without_command(&self) -> bool {
        self.invoke_without_command
    }

    pub fn subcommand_metavar(&self) -> Option<&str> {
        self.subcommand_metavar.as_deref()
    }

    pub fn commands(&self) -> &[Node] {
        &self.commands
    }

    pub fn get(&self, name: &str) -> Option<&Node> {
        self.commands.iter().find(|node| node.name() == name)
    }

    /// Run the group callback, if any
    pub fn invoke(&self, matches: &ArgMatches) -> miette::Result<()> {
        match &self.callback {
            Some(callback) => callback(matches),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for RichGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RichGroup")
            .field("name", &self.name)
            .field("callback", &self.callback.is_some())
            .field("display", &self.display)
            .field("invoke_without_command", &self.invoke_without_command)
            .field("commands", &self.commands)
            .finish()
    }
}

impl CommandListing for RichGroup {
    fn list_commands(&self, _ctx: &Context) -> Vec<String> {
        self.commands.iter().map(|node| node.name().to_string()).collect()
    }

    fn get_command(&self, _ctx: &Context, name: &str) -> Option<&Node> {
        self.get(name)
    }
}

/// Rows of the Commands section: visible subcommands with short help cut
/// to `width - 6 - longest name`.
///
/// Names with no definition and hidden subcommands are skipped.
pub fn command_rows<L>(listing: &L, ctx: &Context, width: usize) -> Vec<(String, StyledText)>
where
    L: CommandListing + ?Sized,
{
    let mut visible = Vec::new();
    for name in listing.list_commands(ctx) {
        let Some(node) = listing.get_command(ctx, &name) else {
            tracing::debug!(command = %name, "skipping listed command with no definition");
            continue;
        };
        if node.is_hidden() {
            continue;
        }
        visible.push((name, node));
    }

    let longest = visible
        .iter()
        .map(|(name, _)| console::measure_text_width(name))
        .max()
        .unwrap_or(0);
    let limit = width.saturating_sub(COMMAND_LIST_CHROME + longest);

    visible
        .into_iter()
        .map(|(name, node)| {
            let help = node.short_help(limit);
            (name, help)
        })
        .collect()
}

/// Write the Commands section; nothing is written when no subcommand is
/// visible
pub fn format_commands<L, W>(
    listing: &L,
    ctx: &Context,
    formatter: &mut HelpFormatter<W>,
) -> io::Result<()>
where
    L: CommandListing + ?Sized,
    W: Write,
{
    let rows = command_rows(listing, ctx, formatter.width());
    if rows.is_empty() {
        return Ok(());
    }
    formatter.section("Commands", |f, table| f.add_commands(&rows, table))?;
    Ok(())
}
