//! Registration records and tiered resolution
//!
//! A [`CommandInfo`] or [`GroupInfo`] is captured once at registration and
//! only read afterwards. Every display attribute is optional; `None` means
//! "inherit". Groups resolve their attributes across three tiers:
//!
//! 1. local: the record given where the group is added
//! 2. inherited: the record registered as the group's callback
//! 3. instance: the record the sub-application was created with
//!
//! and fall back to a built-in default only when no tier set a value.

use std::fmt;
use std::sync::Arc;

use clap::{Arg, ArgMatches};

use crate::render::BannerAlign;
use crate::style::EpilogBlend;

/// Executable body of a command or group
pub type Callback = Arc<dyn Fn(&ArgMatches) -> miette::Result<()> + Send + Sync>;

/// Default options metavar shown in usage lines
pub const DEFAULT_OPTIONS_METAVAR: &str = "[OPTIONS]";

/// First present value across the tiers, else `fallback`
pub fn resolve<T>(local: Option<T>, inherited: Option<T>, instance: Option<T>, fallback: T) -> T {
    resolve_opt(local, inherited, instance).unwrap_or(fallback)
}

/// First present value across the tiers
pub fn resolve_opt<T>(local: Option<T>, inherited: Option<T>, instance: Option<T>) -> Option<T> {
    local.or(inherited).or(instance)
}

/// Display attributes shared by commands and groups
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayInfo {
    pub help: Option<String>,
    pub short_help: Option<String>,
    pub usage: Option<String>,
    pub banner: Option<String>,
    pub banner_align: Option<BannerAlign>,
    pub epilog: Option<String>,
    pub epilog_blend: Option<EpilogBlend>,
    pub options_metavar: Option<String>,
    pub option_width: Option<usize>,
    pub add_help_flag: Option<bool>,
    pub no_args_is_help: Option<bool>,
    pub hidden: Option<bool>,
    pub deprecated: Option<bool>,
}

/// Concrete display attributes for one node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDisplay {
    pub help: Option<String>,
    pub short_help: Option<String>,
    pub usage: Option<String>,
    pub banner: Option<String>,
    pub banner_align: BannerAlign,
    pub epilog: Option<String>,
    pub epilog_blend: EpilogBlend,
    pub options_metavar: String,
    pub option_width: Option<usize>,
    pub add_help_flag: bool,
    pub no_args_is_help: bool,
    pub hidden: bool,
    pub deprecated: bool,
}

impl DisplayInfo {
    /// Resolve field by field, in declaration order
    pub fn resolve(
        local: &DisplayInfo,
        inherited: &DisplayInfo,
        instance: &DisplayInfo,
    ) -> ResolvedDisplay {
        macro_rules! tier {
            ($field:ident) => {
                resolve_opt(
                    local.$field.clone(),
                    inherited.$field.clone(),
                    instance.$field.clone(),
                )
            };
            ($field:ident, $fallback:expr) => {
                resolve(
                    local.$field.clone(),
                    inherited.$field.clone(),
                    instance.$field.clone(),
                    $fallback,
                )
            };
        }

        ResolvedDisplay {
            help: tier!(help),
            short_help: tier!(short_help),
            usage: tier!(usage),
            banner: tier!(banner),
            banner_align: tier!(banner_align, BannerAlign::Default),
            epilog: tier!(epilog),
            epilog_blend: tier!(epilog_blend, EpilogBlend::Default),
            options_metavar: tier!(options_metavar, DEFAULT_OPTIONS_METAVAR.to_string()),
            option_width: tier!(option_width),
            add_help_flag: tier!(add_help_flag, true),
            no_args_is_help: tier!(no_args_is_help, false),
            hidden: tier!(hidden, false),
            deprecated: tier!(deprecated, false),
        }
    }

    /// Resolve a single record against library defaults
    pub fn resolve_alone(&self) -> ResolvedDisplay {
        let empty = DisplayInfo::default();
        Self::resolve(self, &empty, &empty)
    }
}

macro_rules! display_setters {
    ($ty:ty) => {
        impl $ty {
            /// Full help text, markup allowed
            pub fn help(mut self, help: impl Into<String>) -> Self {
                self.display.help = Some(help.into());
                self
            }

            /// Text shown in a parent's command list
            pub fn short_help(mut self, short_help: impl Into<String>) -> Self {
                self.display.short_help = Some(short_help.into());
                self
            }

            /// Replaces the whole usage line, markup allowed
            pub fn usage(mut self, usage: impl Into<String>) -> Self {
                self.display.usage = Some(usage.into());
                self
            }

            pub fn banner(mut self, banner: impl Into<String>) -> Self {
                self.display.banner = Some(banner.into());
                self
            }

            pub fn banner_align(mut self, align: BannerAlign) -> Self {
                self.display.banner_align = Some(align);
                self
            }

            pub fn epilog(mut self, epilog: impl Into<String>) -> Self {
                self.display.epilog = Some(epilog.into());
                self
            }

            pub fn epilog_blend(mut self, blend: EpilogBlend) -> Self {
                self.display.epilog_blend = Some(blend);
                self
            }

            pub fn options_metavar(mut self, metavar: impl Into<String>) -> Self {
                self.display.options_metavar = Some(metavar.into());
                self
            }

            /// Minimum width of the option-name column
            pub fn option_width(mut self, width: usize) -> Self {
                self.display.option_width = Some(width);
                self
            }

            pub fn add_help_flag(mut self, add: bool) -> Self {
                self.display.add_help_flag = Some(add);
                self
            }

            pub fn no_args_is_help(mut self, yes: bool) -> Self {
                self.display.no_args_is_help = Some(yes);
                self
            }

            pub fn hidden(mut self, hidden: bool) -> Self {
                self.display.hidden = Some(hidden);
                self
            }

            pub fn deprecated(mut self, deprecated: bool) -> Self {
                self.display.deprecated = Some(deprecated);
                self
            }

            pub fn arg(mut self, arg: Arg) -> Self {
                self.params.push(arg);
                self
            }

            pub fn args(mut self, args: impl IntoIterator<Item = Arg>) -> Self {
                self.params.extend(args);
                self
            }

            pub fn callback<F>(mut self, callback: F) -> Self
            where
                F: Fn(&ArgMatches) -> miette::Result<()> + Send + Sync + 'static,
            {
                self.callback = Some(Arc::new(callback));
                self
            }

            pub fn display(&self) -> &DisplayInfo {
                &self.display
            }
        }
    };
}

/// Registration record for a command
#[derive(Clone, Default)]
pub struct CommandInfo {
    pub(crate) name: String,
    pub(crate) callback: Option<Callback>,
    pub(crate) params: Vec<Arg>,
    pub(crate) display: DisplayInfo,
}

impl CommandInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

display_setters!(CommandInfo);

impl fmt::Debug for CommandInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandInfo")
            .field("name", &self.name)
            .field("callback", &self.callback.is_some())
            .field("params", &self.params.len())
            .field("display", &self.display)
            .finish()
    }
}

/// Registration record for a group, at any of the three tiers
#[derive(Clone, Default)]
pub struct GroupInfo {
    pub(crate) name: Option<String>,
    pub(crate) callback: Option<Callback>,
    pub(crate) params: Vec<Arg>,
    pub(crate) display: DisplayInfo,
    pub(crate) invoke_without_command: Option<bool>,
    pub(crate) subcommand_metavar: Option<String>,
}

impl GroupInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Run the group callback even when no subcommand is given
    pub fn invoke_without_command(mut self, yes: bool) -> Self {
        self.invoke_without_command = Some(yes);
        self
    }

    pub fn subcommand_metavar(mut self, metavar: impl Into<String>) -> Self {
        self.subcommand_metavar = Some(metavar.into());
        self
    }

    pub fn get_name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

display_setters!(GroupInfo);

impl fmt::Debug for GroupInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupInfo")
            .field("name", &self.name)
            .field("callback", &self.callback.is_some())
            .field("params", &self.params.len())
            .field("display", &self.display)
            .field("invoke_without_command", &self.invoke_without_command)
            .field("subcommand_metavar", &self.subcommand_metavar)
            .finish()
    }
}
