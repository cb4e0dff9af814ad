//! Application registration and entry point
//!
//! A [`RichApp`] collects commands, a group callback and nested
//! sub-applications. [`RichApp::build`] turns the registrations into a
//! [`Node`] tree; [`RichApp::run_from`] renders styled help when asked for
//! and otherwise parses with clap and dispatches to the callbacks.

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::Path;

use clap::ArgMatches;

use crate::core::command::{Node, RichCommand};
use crate::core::config::Config;
use crate::core::context::{Context, HelpSettings};
use crate::core::error::{ConfigError, RunError};
use crate::core::group::RichGroup;
use crate::core::metadata::{resolve_opt, CommandInfo, GroupInfo};

/// Program name used when neither the app nor argv supply one
const FALLBACK_PROG: &str = "app";

#[derive(Debug, Clone)]
enum Registration {
    Command(CommandInfo),
    Group { app: RichApp, local: GroupInfo },
}

/// A command-line application with styled help
#[derive(Debug, Clone, Default)]
pub struct RichApp {
    info: GroupInfo,
    registered_callback: Option<GroupInfo>,
    registered: Vec<Registration>,
}

impl RichApp {
    /// Create an application from its instance-level declaration
    pub fn new(info: GroupInfo) -> Self {
        Self {
            info,
            ..Self::default()
        }
    }

    pub fn command(mut self, info: CommandInfo) -> Self {
        self.registered.push(Registration::Command(info));
        self
    }

    /// Register the group callback and its display attributes
    pub fn callback(mut self, info: GroupInfo) -> Self {
        self.registered_callback = Some(info);
        self
    }

    /// Nest `app` as a subgroup. `local` takes precedence over both the
    /// sub-application's callback and its own declaration.
    pub fn add_group(mut self, app: RichApp, local: GroupInfo) -> Self {
        self.registered.push(Registration::Group { app, local });
        self
    }

    /// Build the node tree.
    ///
    /// An application with exactly one command and no callback or
    /// subgroups builds as that command.
    pub fn build(&self) -> Result<Node, ConfigError> {
        if let Some(single) = self.single_command() {
            return Ok(Node::Command(RichCommand::from_info(single.clone())?));
        }
        Ok(Node::Group(self.build_group(&GroupInfo::default(), true)?))
    }

    fn single_command(&self) -> Option<&CommandInfo> {
        if self.registered_callback.is_some() || self.info.callback.is_some() {
            return None;
        }
        match self.registered.as_slice() {
            [Registration::Command(info)] => Some(info),
            _ => None,
        }
    }

    fn build_group(&self, local: &GroupInfo, root: bool) -> Result<RichGroup, ConfigError> {
        let empty = GroupInfo::default();
        let inherited = self.registered_callback.as_ref().unwrap_or(&empty);
        let name = resolve_opt(
            local.name.clone(),
            inherited.name.clone(),
            self.info.name.clone(),
        );
        let name = match name {
            Some(name) => name,
            None if root => String::new(),
            None => return Err(ConfigError::UnnamedGroup),
        };

        let mut group = RichGroup::from_tiers(name, local, inherited, &self.info);
        for registration in &self.registered {
            let node = match registration {
                Registration::Command(info) => Node::Command(RichCommand::from_info(info.clone())?),
                Registration::Group { app, local } => Node::Group(app.build_group(local, false)?),
            };
            group.add_command(node)?;
        }
        Ok(group)
    }

    /// Run against the process arguments; parse errors exit the clap way
    pub fn run(&self) -> miette::Result<()> {
        match self.run_from(std::env::args_os()) {
            Err(RunError::Parse(err)) => err.exit(),
            Err(RunError::Callback(report)) => Err(report),
            other => Ok(other?),
        }
    }

    /// Run against `args` with settings from the layered configuration,
    /// writing help to stdout
    pub fn run_from<I, T>(&self, args: I) -> Result<(), RunError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let settings = Config::load().settings();
        self.run_with(settings, args, io::stdout().lock())
    }

    /// Run against `args`, writing help to `out`
    pub fn run_with<I, T, W>(&self, settings: HelpSettings, args: I, out: W) -> Result<(), RunError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
        W: Write,
    {
        let root = self.build()?;
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        let prog = program_name(&root, args.first());

        let ctx = Context::new(prog.clone(), settings);
        if let Some((node, ctx)) = help_target(&root, ctx, args.get(1..).unwrap_or_default()) {
            tracing::debug!(command = %ctx.command_path(), "help requested");
            node.write_help(&ctx, out)?;
            return Ok(());
        }

        let matches = root.to_clap().name(prog).try_get_matches_from(args)?;
        dispatch(&root, &matches)
    }
}

fn program_name(root: &Node, argv0: Option<&OsString>) -> String {
    if let Some(group) = root.as_group().filter(|group| !group.name().is_empty()) {
        return group.name().to_string();
    }
    argv0
        .and_then(|arg| Path::new(arg).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| FALLBACK_PROG.to_string())
}

/// Find the node whose help should be shown instead of running.
///
/// Walks subcommand names from the root. Help is shown for the deepest node
/// reached when `-h`/`--help` appears, or when that node shows help on no
/// arguments and none were given to it. Scanning stops at `--`.
fn help_target<'a>(
    root: &'a Node,
    ctx: Context,
    args: &[OsString],
) -> Option<(&'a Node, Context)> {
    let mut node = root;
    let mut ctx = ctx;
    let mut own_args = 0;

    for arg in args {
        let Some(arg) = arg.to_str() else {
            own_args += 1;
            continue;
        };
        if arg == "--" {
            own_args += 1;
            break;
        }
        if (arg == "-h" || arg == "--help") && node.display().add_help_flag {
            return Some((node, ctx));
        }
        if let Some(child) = node.as_group().and_then(|group| group.get(arg)) {
            ctx = ctx.child(child.name());
            node = child;
            own_args = 0;
            continue;
        }
        own_args += 1;
    }

    (own_args == 0 && node.display().no_args_is_help).then_some((node, ctx))
}

fn dispatch(node: &Node, matches: &ArgMatches) -> Result<(), RunError> {
    if node.display().deprecated {
        let warning = format!("DeprecationWarning: The command '{}' is deprecated.", node.name());
        eprintln!("{}", console::style(warning).red().for_stderr());
    }

    match node {
        Node::Command(command) => command.invoke(matches).map_err(RunError::Callback),
        Node::Group(group) => {
            group.invoke(matches).map_err(RunError::Callback)?;
            if let Some((name, sub_matches)) = matches.subcommand() {
                match group.get(name) {
                    Some(child) => dispatch(child, sub_matches)?,
                    None => tracing::debug!(command = %name, "no definition for parsed subcommand"),
                }
            }
            Ok(())
        }
    }
}
