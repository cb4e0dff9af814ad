//! Semantic roles and their default paints

use std::collections::BTreeMap;
use std::fmt;

use console::Color;

use super::text::Paint;

/// Display role attached to a piece of help text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Long option name, e.g. `--message`
    Option,
    /// Short switch, e.g. `-m`
    Switch,
    /// Value placeholder after an option
    Metavar,
    /// Trailing `(default: ..)` / `(required)` note
    HelpRequire,
    /// Bare argument or command name
    ArgsAndCmds,
    /// Panel border
    Border,
    /// Program path in the usage line
    UsageProg,
    /// Arguments part of the usage line
    UsageArgs,
}

impl Role {
    pub const ALL: [Role; 8] = [
        Role::Option,
        Role::Switch,
        Role::Metavar,
        Role::HelpRequire,
        Role::ArgsAndCmds,
        Role::Border,
        Role::UsageProg,
        Role::UsageArgs,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Role::Option => "option",
            Role::Switch => "switch",
            Role::Metavar => "metavar",
            Role::HelpRequire => "help_require",
            Role::ArgsAndCmds => "args_and_cmds",
            Role::Border => "border",
            Role::UsageProg => "usage_prog",
            Role::UsageArgs => "usage_args",
        }
    }

    pub fn from_name(name: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|role| role.name() == name)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Paint per role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    paints: [Paint; 8],
}

impl Default for Theme {
    fn default() -> Self {
        let mut theme = Theme {
            paints: [Paint::default(); 8],
        };
        theme.set(Role::Option, Paint::new().bold().named(Color::Cyan));
        theme.set(Role::Switch, Paint::new().bold().named(Color::Green));
        theme.set(Role::Metavar, Paint::new().bold().named(Color::Yellow));
        theme.set(Role::HelpRequire, Paint::new().dim());
        theme.set(Role::ArgsAndCmds, Paint::new().named(Color::Yellow));
        theme.set(Role::Border, Paint::new().dim());
        theme.set(Role::UsageProg, Paint::new().bold());
        theme.set(Role::UsageArgs, Paint::new().bold().named(Color::Cyan));
        theme
    }
}

impl Theme {
    pub fn paint(&self, role: Role) -> Paint {
        self.paints[role as usize]
    }

    pub fn set(&mut self, role: Role, paint: Paint) {
        self.paints[role as usize] = paint;
    }

    pub fn with(mut self, role: Role, paint: Paint) -> Self {
        self.set(role, paint);
        self
    }

    /// Default theme with overrides from `role name -> style spec` pairs.
    ///
    /// Unknown roles and unparsable specs are skipped with a warning.
    pub fn from_specs(specs: &BTreeMap<String, String>) -> Self {
        let mut theme = Theme::default();
        for (name, spec) in specs {
            let Some(role) = Role::from_name(name) else {
                tracing::warn!(role = %name, "ignoring unknown theme role");
                continue;
            };
            match Paint::parse(spec) {
                Some(paint) => theme.set(role, paint),
                None => tracing::warn!(%role, spec = %spec, "ignoring invalid style spec"),
            }
        }
        theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::text::Tone;

    #[test]
    fn test_role_names_round_trip() {
        for role in Role::ALL {
            assert_eq!(Role::from_name(role.name()), Some(role));
        }
        assert_eq!(Role::from_name("nope"), None);
    }

    #[test]
    fn test_default_theme() {
        let theme = Theme::default();
        assert_eq!(theme.paint(Role::Option).fg, Some(Tone::Named(Color::Cyan)));
        assert!(theme.paint(Role::Option).bold);
        assert!(theme.paint(Role::HelpRequire).dim);
    }

    #[test]
    fn test_from_specs_overrides_and_skips() {
        let mut specs = BTreeMap::new();
        specs.insert("option".to_string(), "magenta".to_string());
        specs.insert("switch".to_string(), "not a style".to_string());
        specs.insert("bogus".to_string(), "bold".to_string());

        let theme = Theme::from_specs(&specs);
        assert_eq!(theme.paint(Role::Option), Paint::new().named(Color::Magenta));
        assert_eq!(theme.paint(Role::Switch), Theme::default().paint(Role::Switch));
    }
}
