//! Runnable commands and the node tree

use std::io::{self, Write};

use clap::{Arg, ArgMatches};

use crate::core::context::Context;
use crate::core::error::ConfigError;
use crate::core::group::{format_commands, RichGroup};
use crate::core::metadata::{Callback, CommandInfo, ResolvedDisplay};
use crate::core::params::{help_arg, help_sections};
use crate::render::{wrap, HelpFormatter};
use crate::style::{markup, StyledText};

const DEPRECATED_PREFIX: &str = "(Deprecated) ";

/// A command with a callback and resolved display attributes
#[derive(Clone)]
pub struct RichCommand {
    name: String,
    callback: Callback,
    params: Vec<Arg>,
    display: ResolvedDisplay,
}

impl RichCommand {
    /// Materialize a command; fails when no callback was attached
    pub fn from_info(info: CommandInfo) -> Result<Self, ConfigError> {
        let CommandInfo {
            name,
            callback,
            params,
            display,
        } = info;
        let callback = callback.ok_or_else(|| ConfigError::MissingCallback { name: name.clone() })?;
        tracing::debug!(command = %name, "built command");
        Ok(Self {
            display: display.resolve_alone(),
            name,
            callback,
            params,
        })
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

    pub fn invoke(&self, matches: &ArgMatches) -> miette::Result<()> {
        (self.callback)(matches)
    }
}

impl std::fmt::Debug for RichCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RichCommand")
            .field("name", &self.name)
            .field("params", &self.params.len())
            .field("display", &self.display)
            .finish()
    }
}

/// Positionals without a value name show their upper-cased id, matching
/// the help table
fn with_value_name(arg: Arg) -> Arg {
    if arg.is_positional() && arg.get_value_names().is_none() {
        let name = arg.get_id().as_str().to_uppercase();
        arg.value_name(name)
    } else {
        arg
    }
}

/// A built command tree node
#[derive(Debug, Clone)]
pub enum Node {
    Command(RichCommand),
    Group(RichGroup),
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::Command(command) => command.name(),
            Node::Group(group) => group.name(),
        }
    }

    pub fn display(&self) -> &ResolvedDisplay {
        match self {
            Node::Command(command) => command.display(),
            Node::Group(group) => group.display(),
        }
    }

    pub fn params(&self) -> &[Arg] {
        match self {
            Node::Command(command) => command.params(),
            Node::Group(group) => group.params(),
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.display().hidden
    }

    pub fn as_group(&self) -> Option<&RichGroup> {
        match self {
            Node::Group(group) => Some(group),
            Node::Command(_) => None,
        }
    }

    /// One-line help for a parent's command list, at most `limit` columns
    pub fn short_help(&self, limit: usize) -> StyledText {
        let display = self.display();
        let text = display
            .short_help
            .as_deref()
            .or(display.help.as_deref())
            .unwrap_or_default();
        if display.deprecated {
            wrap::short_help(&format!("{DEPRECATED_PREFIX}{text}"), limit)
        } else {
            wrap::short_help(text, limit)
        }
    }

    /// Help body shown under the usage line
    fn help_body(&self) -> Option<String> {
        let display = self.display();
        let help = display.help.as_deref().map(str::trim).unwrap_or_default();
        match (help.is_empty(), display.deprecated) {
            (true, false) => None,
            (true, true) => Some(DEPRECATED_PREFIX.trim_end().to_string()),
            (false, true) => Some(format!("{DEPRECATED_PREFIX}{help}")),
            (false, false) => Some(help.to_string()),
        }
    }

    /// Parameters listed in help, including the help flag when enabled
    fn help_params(&self) -> Vec<Arg> {
        let mut params = self.params().to_vec();
        if self.display().add_help_flag {
            params.push(help_arg());
        }
        params
    }

    /// The equivalent `clap::Command` tree, used for parsing
    pub fn to_clap(&self) -> clap::Command {
        let display = self.display();
        let mut command = clap::Command::new(self.name().to_string())
            .disable_help_flag(true)
            .hide(display.hidden)
            .args(self.help_params().into_iter().map(with_value_name));
        if let Some(help) = &display.help {
            command = command.about(markup::parse(help).as_str().to_string());
        }
        if let Node::Group(group) = self {
            command = command
                .subcommand_required(!group.invoke_without_command())
                .disable_help_subcommand(true)
                .subcommands(group.commands().iter().map(Node::to_clap));
            if let Some(metavar) = group.subcommand_metavar() {
                command = command.subcommand_value_name(metavar.to_string());
            }
        }
        command
    }

    /// Usage arguments after the command path, as computed by clap
    fn usage_args(&self, ctx: &Context) -> String {
        let path = ctx.command_path();
        let usage = self
            .to_clap()
            .name(ctx.info_name().to_string())
            .bin_name(path.clone())
            .render_usage()
            .to_string();
        let first = usage.lines().next().unwrap_or_default().trim();
        let first = first.strip_prefix("Usage:").unwrap_or(first).trim_start();
        let args = first.strip_prefix(path.as_str()).unwrap_or(first).trim();
        args.replace("[OPTIONS]", &self.display().options_metavar)
    }

    /// Write the full help page: banner, usage, help body, Arguments,
    /// Options, Commands and epilog
    pub fn format_help<W: Write>(
        &self,
        ctx: &Context,
        formatter: &mut HelpFormatter<W>,
    ) -> io::Result<()> {
        let display = self.display();
        tracing::debug!(command = %ctx.command_path(), "rendering help");

        if let Some(banner) = &display.banner {
            formatter.write_banner(banner, display.banner_align)?;
        }

        match &display.usage {
            Some(usage) => formatter.write(&markup::parse(usage))?,
            None => formatter.write_usage(&ctx.command_path(), &self.usage_args(ctx), None)?,
        }
        formatter.write_newline()?;

        if let Some(body) = self.help_body() {
            formatter.write_text(&markup::parse(&body))?;
            formatter.write_newline()?;
        }

        formatter.set_option_width(display.option_width);
        let (arguments, options) = help_sections(&self.help_params());
        if !arguments.is_empty() {
            formatter.section("Arguments", |f, table| f.add_params(&arguments, table))?;
        }
        if !options.is_empty() {
            formatter.section("Options", |f, table| f.add_params(&options, table))?;
        }
        if let Node::Group(group) = self {
            format_commands(group, ctx, formatter)?;
        }

        if let Some(epilog) = &display.epilog {
            formatter.write_epilog(epilog, display.epilog_blend)?;
        }
        Ok(())
    }

    /// Render help for this node into `out` with a formatter from `ctx`
    pub fn write_help<W: Write>(&self, ctx: &Context, out: W) -> io::Result<()> {
        let mut formatter = ctx.make_formatter(out);
        self.format_help(ctx, &mut formatter)?;
        formatter.into_inner().flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::context::HelpSettings;
    use crate::core::metadata::GroupInfo;
    use crate::render::BannerAlign;
    use crate::style::EpilogBlend;

    fn greet() -> CommandInfo {
        CommandInfo::new("greet")
            .help("Greet someone [bold]nicely[/bold]")
            .arg(Arg::new("name").help("Who to greet").required(true))
            .arg(
                Arg::new("message")
                    .short('m')
                    .long("message")
                    .help("The greeting")
                    .default_value("Hello"),
            )
            .callback(|_| Ok(()))
    }

    fn render(node: &Node) -> String {
        let ctx = Context::new("demo", HelpSettings::default());
        let mut out = Vec::new();
        node.write_help(&ctx, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_missing_callback() {
        let err = RichCommand::from_info(CommandInfo::new("lonely")).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCallback { ref name } if name == "lonely"));
    }

    #[test]
    fn test_help_layout_order() {
        let info = greet()
            .banner("BANNER")
            .banner_align(BannerAlign::Left)
            .epilog("the end")
            .epilog_blend(EpilogBlend::Disabled);
        let node = Node::Command(RichCommand::from_info(info).unwrap());
        let out = render(&node);

        let position = |needle: &str| out.find(needle).unwrap_or_else(|| panic!("{needle} in {out}"));
        assert!(position("BANNER") < position("Usage: demo"));
        assert!(position("Usage: demo") < position("Greet someone nicely"));
        assert!(position("Greet someone nicely") < position("─ Arguments"));
        assert!(position("─ Arguments") < position("─ Options"));
        assert!(position("─ Options") < position("the end"));
        assert!(out.contains("(default: Hello)"));
        assert!(out.contains("(required)"));
        assert!(out.contains("--help"));
    }

    #[test]
    fn test_usage_uses_options_metavar() {
        let node = Node::Command(RichCommand::from_info(greet().options_metavar("[FLAGS]")).unwrap());
        let out = render(&node);
        let usage = out.lines().next().unwrap();
        assert!(usage.starts_with("Usage: demo [FLAGS]"), "{usage}");
        assert!(usage.contains("<NAME>"), "{usage}");
    }

    #[test]
    fn test_usage_override_replaces_whole_line() {
        let node = Node::Command(
            RichCommand::from_info(greet().usage("[bold]my-tool[/bold] run FILE")).unwrap(),
        );
        assert_eq!(render(&node).lines().next(), Some("my-tool run FILE"));

        let ctx = Context::new(
            "demo",
            HelpSettings {
                color: true,
                ..HelpSettings::default()
            },
        );
        let mut out = Vec::new();
        node.write_help(&ctx, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        let usage = out.lines().next().unwrap();
        assert!(usage.starts_with("\u{1b}[1mmy-tool"), "{usage:?}");
        assert!(!out.contains("Usage:"));
    }

    #[test]
    fn test_subcommand_metavar_in_group_usage() {
        let empty = GroupInfo::default();
        let local = GroupInfo::new().subcommand_metavar("CMD");
        let mut group = RichGroup::from_tiers("tool".into(), &local, &empty, &empty);
        group
            .add_command(Node::Command(RichCommand::from_info(greet()).unwrap()))
            .unwrap();
        let out = render(&Node::Group(group));
        let usage = out.lines().next().unwrap();
        assert!(usage.starts_with("Usage: demo"), "{usage}");
        assert!(usage.contains("CMD"), "{usage}");
        assert!(!usage.contains("COMMAND"), "{usage}");
    }

    #[test]
    fn test_help_flag_can_be_disabled() {
        let node = Node::Command(RichCommand::from_info(greet().add_help_flag(false)).unwrap());
        assert!(!render(&node).contains("--help"));
    }

    #[test]
    fn test_deprecated_prefixes() {
        let node = Node::Command(
            RichCommand::from_info(greet().deprecated(true).short_help("Say hi")).unwrap(),
        );
        assert_eq!(node.short_help(40).as_str(), "(Deprecated) Say hi");
        assert!(render(&node).contains("(Deprecated) Greet someone nicely"));
    }

    #[test]
    fn test_short_help_falls_back_to_help() {
        let node = Node::Command(RichCommand::from_info(greet()).unwrap());
        assert_eq!(node.short_help(80).as_str(), "Greet someone nicely");
        assert!(node.short_help(80).paint_at(14).bold);
    }

    #[test]
    fn test_to_clap_parses() {
        let node = Node::Command(RichCommand::from_info(greet()).unwrap());
        let matches = node
            .to_clap()
            .try_get_matches_from(["greet", "World", "-m", "Hi"])
            .unwrap();
        assert_eq!(matches.get_one::<String>("name").map(String::as_str), Some("World"));
        assert_eq!(matches.get_one::<String>("message").map(String::as_str), Some("Hi"));
    }
}
