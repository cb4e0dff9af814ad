//! Parameter adapter over `clap::Arg`

use clap::{Arg, ArgAction};

use crate::render::HelpRecord;

/// Help text of the `-h, --help` flag
pub const HELP_FLAG_TEXT: &str = "Show this message and exit.";

/// Which help section a parameter belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamRole {
    Argument,
    Option,
}

/// A declared parameter as seen by the help renderer
pub trait Parameter {
    fn role(&self) -> ParamRole;

    /// `(spellings, help)` for the help table, or `None` when hidden
    fn help_record(&self) -> Option<HelpRecord>;
}

/// [`Parameter`] view of a `clap::Arg`
#[derive(Debug, Clone, Copy)]
pub struct ClapParam<'a>(pub &'a Arg);

impl ClapParam<'_> {
    fn takes_values(&self) -> bool {
        self.0.get_action().takes_values()
    }

    fn value_name(&self) -> String {
        match self.0.get_value_names() {
            Some(names) if !names.is_empty() => names
                .iter()
                .map(|name| name.as_str())
                .collect::<Vec<_>>()
                .join(" "),
            _ => self.0.get_id().as_str().to_uppercase(),
        }
    }

    fn spellings(&self) -> String {
        let arg = self.0;
        if arg.is_positional() {
            return self.value_name();
        }

        let mut names = Vec::new();
        if let Some(short) = arg.get_short() {
            names.push(format!("-{short}"));
        }
        if let Some(long) = arg.get_long() {
            names.push(format!("--{long}"));
        }
        if names.is_empty() {
            names.push(arg.get_id().as_str().to_string());
        }

        let mut spellings = names.join(", ");
        if self.takes_values() {
            spellings.push_str(&format!(" <{}>", self.value_name()));
        }
        spellings
    }

    /// Visible aliases, listed as notes so the spellings column keeps one
    /// short and one long name
    fn aliases(&self) -> Vec<String> {
        let arg = self.0;
        let long = arg.get_visible_aliases().unwrap_or_default();
        let short = arg.get_visible_short_aliases().unwrap_or_default();
        long.into_iter()
            .map(|alias| format!("--{alias}"))
            .chain(short.into_iter().map(|alias| format!("-{alias}")))
            .collect()
    }

    /// `aliases`, `default`, `env var`, `possible values` and `required`
    /// notes
    fn extras(&self) -> Vec<String> {
        let arg = self.0;
        let mut extras = Vec::new();

        let aliases = self.aliases();
        if !aliases.is_empty() {
            extras.push(format!("aliases: {}", aliases.join(", ")));
        }

        if self.takes_values() {
            let defaults: Vec<String> = arg
                .get_default_values()
                .iter()
                .map(|value| value.to_string_lossy().into_owned())
                .collect();
            if !defaults.is_empty() {
                extras.push(format!("default: {}", defaults.join(", ")));
            }
        }
        if let Some(env) = arg.get_env() {
            extras.push(format!("env var: {}", env.to_string_lossy()));
        }
        if self.takes_values() {
            let possible: Vec<String> = arg
                .get_possible_values()
                .iter()
                .filter(|value| !value.is_hide_set())
                .map(|value| value.get_name().to_string())
                .collect();
            if !possible.is_empty() {
                extras.push(format!("possible values: {}", possible.join(", ")));
            }
        }
        if arg.is_required_set() {
            extras.push("required".to_string());
        }
        extras
    }
}

impl Parameter for ClapParam<'_> {
    fn role(&self) -> ParamRole {
        if self.0.is_positional() {
            ParamRole::Argument
        } else {
            ParamRole::Option
        }
    }

    fn help_record(&self) -> Option<HelpRecord> {
        if self.0.is_hide_set() {
            return None;
        }
        let help = self
            .0
            .get_help()
            .map(|help| help.to_string())
            .unwrap_or_default();
        let extras = self.extras();
        let help = match (help.is_empty(), extras.is_empty()) {
            (_, true) => help,
            (true, false) => format!("[{}]", extras.join("; ")),
            (false, false) => format!("{help}  [{}]", extras.join("; ")),
        };
        Some(HelpRecord::new(self.spellings(), help))
    }
}

/// The `-h, --help` flag added to every node unless disabled
pub fn help_arg() -> Arg {
    Arg::new("help")
        .short('h')
        .long("help")
        .action(ArgAction::Help)
        .help(HELP_FLAG_TEXT)
}

/// Help records of `args` split into the Arguments and Options sections,
/// keeping declaration order
pub fn help_sections<'a>(
    args: impl IntoIterator<Item = &'a Arg>,
) -> (Vec<HelpRecord>, Vec<HelpRecord>) {
    let mut arguments = Vec::new();
    let mut options = Vec::new();
    for arg in args {
        let param = ClapParam(arg);
        let Some(record) = param.help_record() else {
            continue;
        };
        match param.role() {
            ParamRole::Argument => arguments.push(record),
            ParamRole::Option => options.push(record),
        }
    }
    (arguments, options)
}
